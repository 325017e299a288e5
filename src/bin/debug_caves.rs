//! Debug tool for comparing cave presets visually
//! Generates a grid of cave maps: one row per seed, one column per preset

use cave_generator::config::{CaveConfig, CavePreset};
use cave_generator::export::render_grid_image;
use cave_generator::generator::generate;
use image::{imageops, ImageBuffer, Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

const WIDTH: usize = 96;
const HEIGHT: usize = 64;
const SCALE: u32 = 3;
const SEEDS: &[&str] = &["debug-1", "debug-2", "debug-3", "debug-4"];

/// Route library `log` records to stderr. `RUST_LOG` overrides the default
/// `warn` filter. A second call keeps the first subscriber.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    println!("Generating cave comparison grid...");

    let mut images: Vec<(String, RgbImage)> = Vec::new();
    for seed in SEEDS {
        for preset in CavePreset::all() {
            let name = format!("{} / {}", seed, preset);
            println!("  Processing: {}", name);
            let config = CaveConfig {
                width: WIDTH,
                height: HEIGHT,
                seed: Some(seed.to_string()),
                ..preset.config()
            };
            match generate(&config) {
                Ok(cave) => {
                    println!(
                        "    {} regions, {} bridges, {} floor triangles",
                        cave.region_count(),
                        cave.bridges().len(),
                        cave.stats().floor_triangles
                    );
                    let img = render_grid_image(cave.grid(), cave.region_count());
                    let scaled = imageops::resize(
                        &img,
                        img.width() * SCALE,
                        img.height() * SCALE,
                        imageops::FilterType::Nearest,
                    );
                    images.push((name, scaled));
                }
                Err(e) => eprintln!("    failed: {}", e),
            }
        }
    }

    let grid = create_grid(&images, CavePreset::all().len(), SEEDS.len());
    match grid.save("cave_comparison.png") {
        Ok(()) => println!("Saved cave_comparison.png ({}x{})", grid.width(), grid.height()),
        Err(e) => eprintln!("Failed to save grid: {}", e),
    }
}

fn create_grid(images: &[(String, RgbImage)], cols: usize, rows: usize) -> RgbImage {
    if images.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let cell_width = images.iter().map(|(_, img)| img.width()).max().unwrap_or(1);
    let cell_height = images.iter().map(|(_, img)| img.height()).max().unwrap_or(1);
    let gap = 4u32;
    let total_cell_width = cell_width + gap;
    let total_cell_height = cell_height + gap;

    let grid_width = total_cell_width * cols as u32;
    let grid_height = total_cell_height * rows as u32;

    let mut grid: RgbImage = ImageBuffer::from_pixel(grid_width, grid_height, Rgb([40, 40, 40]));

    for (idx, (_, img)) in images.iter().enumerate() {
        let col = idx % cols;
        let row = idx / cols;
        if row >= rows {
            break;
        }

        let x_offset = col as u32 * total_cell_width;
        let y_offset = row as u32 * total_cell_height;
        imageops::replace(&mut grid, img, x_offset as i64, y_offset as i64);
    }

    grid
}
