use criterion::{criterion_group, criterion_main, Criterion};
use fastpixelmap::{presets, ChannelOrder, MapperOptions, PixelBuffer, PixelMapper};
use std::hint::black_box;

fn generate_gradient_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = ((x + y) * 255 / (width + height).max(1)) as u8;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
            pixels.push(255); // Alpha
        }
    }
    pixels
}

fn blend256_mapper() -> PixelMapper {
    let options = MapperOptions {
        channel_order: ChannelOrder::Rgba,
    };
    PixelMapper::with_options(presets::watlington_blend256(), options)
        .expect("built-in palette is valid")
}

fn bench_construct(c: &mut Criterion) {
    c.bench_function("construct_blend256", |b| {
        b.iter(|| PixelMapper::new(black_box(presets::watlington_blend256())))
    });
}

fn bench_convert_320x240(c: &mut Criterion) {
    let mapper = blend256_mapper();
    let rgba = generate_gradient_rgba(320, 240);
    let image = PixelBuffer::new(&rgba, 320, 240).unwrap();

    c.bench_function("convert_gradient_320x240", |b| {
        b.iter(|| {
            let result = mapper.convert_image(black_box(&image));
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_full_search_320x240(c: &mut Criterion) {
    let mapper = blend256_mapper();
    let rgba = generate_gradient_rgba(320, 240);
    let image = PixelBuffer::new(&rgba, 320, 240).unwrap();

    c.bench_function("full_search_gradient_320x240", |b| {
        b.iter(|| {
            let result = mapper.full_search_convert_image(black_box(&image));
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_convert_padded(c: &mut Criterion) {
    let mapper = blend256_mapper();
    // 300 pixel rows padded to 320
    let rgba = generate_gradient_rgba(320, 240);
    let image = PixelBuffer::padded(&rgba, 300, 240).unwrap();

    c.bench_function("convert_padded_300x240", |b| {
        b.iter(|| {
            let result = mapper.convert_image(black_box(&image));
            assert!(result.is_ok());
            result
        })
    });
}

#[cfg(feature = "parallel")]
fn bench_par_convert_1280x720(c: &mut Criterion) {
    let mapper = blend256_mapper();
    let rgba = generate_gradient_rgba(1280, 720);
    let image = PixelBuffer::new(&rgba, 1280, 720).unwrap();

    c.bench_function("par_convert_gradient_1280x720", |b| {
        b.iter(|| {
            let result = mapper.par_convert_image(black_box(&image));
            assert!(result.is_ok());
            result
        })
    });
}

#[cfg(not(feature = "parallel"))]
fn bench_par_convert_1280x720(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_construct,
    bench_convert_320x240,
    bench_full_search_320x240,
    bench_convert_padded,
    bench_par_convert_1280x720,
);
criterion_main!(benches);
