//! pal8 - Map images onto a fixed palette
//!
//! A command-line tool for converting images to palette-indexed form and for
//! comparing the accelerated search with the exhaustive one.

mod palette_file;

use clap::{ArgAction, Parser, Subcommand};
use fastpixelmap::{IndexImage, PixelBuffer, PixelMapper};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pal8")]
#[command(version)]
#[command(about = "Map images onto a fixed color palette", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map an image onto a palette and write the result
    Map {
        /// Input image file (PNG, JPEG, GIF, WebP, PPM)
        input: PathBuf,

        /// Output image file (default: input with .pal8.png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Palette: watlington16, blend256 or a palette file
        #[arg(short, long, default_value = "blend256")]
        palette: String,

        /// Use the exhaustive search instead of the accelerated one
        #[arg(long, conflicts_with = "parallel")]
        full_search: bool,

        /// Map rows in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Print a palette in mapper order
    Palette {
        /// Palette: watlington16, blend256 or a palette file
        #[arg(short, long, default_value = "blend256")]
        palette: String,
    },

    /// Time the accelerated search against the exhaustive search
    Bench {
        /// Input image file (PNG, JPEG, GIF, WebP, PPM)
        input: PathBuf,

        /// Palette: watlington16, blend256 or a palette file
        #[arg(short, long, default_value = "blend256")]
        palette: String,

        /// Number of conversions per variant
        #[arg(short = 'n', long, default_value = "10")]
        iterations: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Map {
            input,
            output,
            palette,
            full_search,
            parallel,
        } => {
            let mapper = PixelMapper::new(palette_file::resolve(&palette)?)?;
            let (pixels, width, height) = load_rgba(&input)?;
            let image = PixelBuffer::new(&pixels, width, height)?;

            eprintln!(
                "Mapping '{}' ({}x{}) onto {} colors",
                input.display(),
                width,
                height,
                mapper.palette_len()
            );

            let start = Instant::now();
            let indexed = if full_search {
                mapper.full_search_convert_image(&image)?
            } else if parallel {
                mapper.par_convert_image(&image)?
            } else {
                mapper.convert_image(&image)?
            };
            tracing::info!(elapsed = ?start.elapsed(), full_search, parallel, "image mapped");

            let output_path = output.unwrap_or_else(|| {
                let mut p = input.clone();
                p.set_extension("pal8.png");
                p
            });
            save_indexed(&indexed, &mapper, &output_path)?;

            eprintln!("Written {}x{} pixels to '{}'", width, height, output_path.display());
        }

        Commands::Palette { palette } => {
            let mapper = PixelMapper::new(palette_file::resolve(&palette)?)?;
            let palette = mapper.palette();

            println!("Size: {}", palette.len());
            for (i, color) in palette.colors().iter().enumerate() {
                println!("{:3} (source {:3}) {}", i, palette.source_index(i), color);
            }
        }

        Commands::Bench {
            input,
            palette,
            iterations,
        } => {
            let mapper = PixelMapper::new(palette_file::resolve(&palette)?)?;
            let (pixels, width, height) = load_rgba(&input)?;
            let image = PixelBuffer::new(&pixels, width, height)?;
            let iterations = iterations.max(1);

            eprintln!(
                "Benchmarking '{}' ({}x{}) onto {} colors, {} iterations",
                input.display(),
                width,
                height,
                mapper.palette_len(),
                iterations
            );

            let (full, full_time) = time(iterations, || mapper.full_search_convert_image(&image))?;
            let (fast, fast_time) = time(iterations, || mapper.convert_image(&image))?;
            let (par, par_time) = time(iterations, || mapper.par_convert_image(&image))?;

            print_timing("Full-Search (naive)", full_time, iterations);
            print_timing("Mean prediction + PDS + TIE", fast_time, iterations);
            print_timing("Mean prediction + PDS + TIE, parallel", par_time, iterations);
            println!(
                "Speed-up compared to full search: {:.3}x",
                full_time.as_secs_f64() / fast_time.as_secs_f64().max(f64::EPSILON)
            );

            if fast != full || par != full {
                return Err("accelerated and full search results differ".into());
            }
            println!("Outputs identical: {} pixels", full.as_slice().len());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_rgba(input: &Path) -> Result<(Vec<u8>, usize, usize), Box<dyn std::error::Error>> {
    let img = image::open(input)
        .map_err(|e| format!("Failed to open '{}': {}", input.display(), e))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    Ok((rgba_img.into_raw(), width as usize, height as usize))
}

fn save_indexed(
    indexed: &IndexImage,
    mapper: &PixelMapper,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let rgba = indexed.to_rgba(mapper.palette());
    let img = image::RgbaImage::from_raw(indexed.width() as u32, indexed.height() as u32, rgba)
        .ok_or("Failed to create image from mapped data")?;
    image::DynamicImage::ImageRgba8(img)
        .to_rgb8()
        .save(path)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    Ok(())
}

fn time<F>(iterations: u32, mut run: F) -> Result<(IndexImage, Duration), Box<dyn std::error::Error>>
where
    F: FnMut() -> fastpixelmap::Result<IndexImage>,
{
    let start = Instant::now();
    let mut last = run()?;
    for _ in 1..iterations {
        last = run()?;
    }
    Ok((last, start.elapsed()))
}

fn print_timing(name: &str, total: Duration, iterations: u32) {
    println!(
        "{:<40} {:>10.3}s {:>10.5}s/frame",
        name,
        total.as_secs_f64(),
        total.as_secs_f64() / iterations as f64
    );
}
