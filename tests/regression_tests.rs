use fastpixelmap::*;
use pretty_assertions::assert_eq;

fn assert_matches_full_search(mapper: &PixelMapper, pixels: &[Color]) {
    for &px in pixels {
        assert_eq!(
            mapper.nearest_index(px),
            mapper.full_search_nearest_index(px),
            "pixel {:?}",
            px
        );
    }
}

// A pixel sitting between two palette colors with equal but opposite
// channel deltas, plus a third color that is closer but far away in mean.
#[test]
fn test_opposite_deltas_do_not_hide_minimum() {
    let palette = Palette::new(vec![
        Color::new(120, 100, 80),
        Color::new(80, 100, 120),
        Color::new(101, 99, 100),
        Color::new(0, 0, 0),
        Color::new(255, 255, 255),
    ])
    .unwrap();
    let mapper = PixelMapper::new(palette).unwrap();

    let px = Color::new(100, 100, 100);
    let index = mapper.nearest_index(px) as usize;
    assert_eq!(mapper.palette().get(index), Color::new(101, 99, 100));
    assert_matches_full_search(&mapper, &[px, Color::new(100, 100, 101), Color::new(99, 100, 100)]);
}

// The predicted entry is a poor match: its mean equals the pixel's but it is
// a saturated color, while the true nearest entry lies several buckets away.
#[test]
fn test_prediction_far_from_minimum() {
    let palette = Palette::new(vec![
        Color::new(0, 0, 0),
        Color::new(255, 0, 0),   // mean 85
        Color::new(90, 90, 90),  // mean 90
        Color::new(0, 255, 30),  // mean 95
        Color::new(100, 100, 100),
        Color::new(255, 255, 255),
    ])
    .unwrap();
    let mapper = PixelMapper::new(palette).unwrap();

    let px = Color::new(240, 10, 10);
    let index = mapper.nearest_index(px) as usize;
    assert_eq!(mapper.palette().get(index), Color::new(255, 0, 0));
    assert_matches_full_search(&mapper, &[px, Color::new(10, 240, 20), Color::new(92, 92, 92)]);
}

// Colors with the same mean but different channel sums; the direction stop
// must not cut off a candidate whose sum lies on the near side of the pixel.
#[test]
fn test_equal_means_different_sums() {
    let palette = Palette::new(vec![
        Color::new(0, 0, 0),
        Color::new(60, 60, 60),  // sum 180, mean 60
        Color::new(60, 60, 62),  // sum 182, mean 60
        Color::new(61, 61, 60),  // sum 182, mean 60
        Color::new(62, 61, 59),  // sum 182, mean 60
        Color::new(200, 200, 200),
    ])
    .unwrap();
    let mapper = PixelMapper::new(palette).unwrap();

    let mut pixels = Vec::new();
    for r in 55..68 {
        for g in 55..68 {
            for b in 55..68 {
                pixels.push(Color::new(r, g, b));
            }
        }
    }
    assert_matches_full_search(&mapper, &pixels);
}

#[test]
fn test_duplicate_palette_colors() {
    let palette = Palette::new(vec![
        Color::new(50, 50, 50),
        Color::new(0, 0, 0),
        Color::new(50, 50, 50),
        Color::new(255, 255, 255),
        Color::new(50, 50, 50),
    ])
    .unwrap();
    let mapper = PixelMapper::new(palette).unwrap();

    // All three grays tie; the first of them in sorted order wins
    assert_eq!(mapper.nearest_index(Color::new(52, 50, 49)), 1);
    assert_eq!(mapper.full_search_nearest_index(Color::new(52, 50, 49)), 1);
}

#[test]
fn test_palette_without_white() {
    let palette = Palette::new(vec![
        Color::new(0, 0, 0),
        Color::new(40, 20, 10),
        Color::new(10, 60, 30),
    ])
    .unwrap();
    let mapper = PixelMapper::new(palette).unwrap();

    assert_eq!(mapper.mean_lut().as_slice()[255], 2);
    assert_matches_full_search(
        &mapper,
        &[
            Color::new(255, 255, 255),
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
        ],
    );
}

#[test]
fn test_construction_errors() {
    assert!(matches!(Palette::new(vec![]), Err(Error::EmptyPalette)));
    assert!(matches!(
        Palette::new(vec![Color::default(); 300]),
        Err(Error::PaletteTooLarge { len: 300 })
    ));
    assert!(matches!(
        Palette::from_packed(&[0u8; 4 * 257], ChannelOrder::Rgba),
        Err(Error::PaletteTooLarge { len: 257 })
    ));
    assert!(matches!(
        Palette::from_packed(&[], ChannelOrder::Bgra),
        Err(Error::EmptyPalette)
    ));
}

#[test]
fn test_bad_buffer_does_not_poison_mapper() {
    let mapper = PixelMapper::new(presets::watlington16()).unwrap();

    let short = vec![0u8; 4 * 4 - 1];
    assert!(matches!(
        PixelBuffer::new(&short, 2, 2),
        Err(Error::BufferSizeMismatch {
            expected: 16,
            actual: 15
        })
    ));
    assert!(PixelBuffer::padded(&short, 2, 2).is_err());

    let data = vec![255u8; 16];
    let image = PixelBuffer::new(&data, 2, 2).unwrap();
    let out = mapper.convert_image(&image).unwrap();
    let white = mapper.palette().len() - 1;
    assert_eq!(out.as_slice(), &[white as u8; 4]);
}

#[test]
fn test_oversized_geometry_is_rejected() {
    let data = vec![0u8; 16];

    // width * height * 4 wraps to 0 and to 16 respectively
    assert!(matches!(
        PixelBuffer::new(&[], 1 << 62, 1),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(matches!(
        PixelBuffer::new(&data, (1 << 62) + 4, 1),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(matches!(
        PixelBuffer::with_stride(&data, 1, 2, usize::MAX / 4 + 1),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(matches!(
        PixelBuffer::with_stride(&data, usize::MAX, 2, usize::MAX),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(matches!(
        PixelBuffer::padded(&data, usize::MAX - 3, 1),
        Err(Error::InvalidDimensions { .. })
    ));
}

#[test]
fn test_full_palette_of_grays() {
    let colors: Vec<Color> = (0..=255u8).rev().map(|v| Color::new(v, v, v)).collect();
    let mapper = PixelMapper::new(Palette::new(colors).unwrap()).unwrap();

    for v in 0..=255u8 {
        assert_eq!(mapper.nearest_index(Color::new(v, v, v)), v);
    }
    assert_matches_full_search(&mapper, &[Color::new(3, 200, 90), Color::new(255, 0, 255)]);
}
