#![no_main]

use arbitrary::Arbitrary;
use fastpixelmap::{ChannelOrder, Color, MapperOptions, Palette, PixelBuffer, PixelMapper};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    palette: Vec<[u8; 3]>,
    width: u8,
    height: u8,
    padded: bool,
    bgra: bool,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let colors: Vec<Color> = input
        .palette
        .iter()
        .take(256)
        .map(|&[r, g, b]| Color::new(r, g, b))
        .collect();
    let Ok(palette) = Palette::new(colors) else {
        return;
    };

    let options = MapperOptions {
        channel_order: if input.bgra { ChannelOrder::Bgra } else { ChannelOrder::Rgba },
    };
    let mapper = PixelMapper::with_options(palette, options).expect("valid palette always builds");

    let width = (input.width as usize).max(1).min(64);
    let height = (input.height as usize).max(1).min(64);
    let stride = if input.padded {
        fastpixelmap::buffer::padded_stride(width).expect("width is at most 64")
    } else {
        width
    };
    let Some(data) = input.pixels.get(..stride * height * 4) else {
        return;
    };
    let image = PixelBuffer::with_stride(data, width, height, stride).expect("exact size");

    let fast = mapper.convert_image(&image).expect("geometry already validated");
    let full = mapper.full_search_convert_image(&image).expect("geometry already validated");
    assert_eq!(fast, full);
});
