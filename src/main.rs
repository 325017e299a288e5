use clap::Parser;
use tracing_subscriber::EnvFilter;

use cave_generator::ascii;
use cave_generator::config::{CaveConfig, CavePreset};
use cave_generator::export;
use cave_generator::generator::{generate, GeneratedCave};

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate procedural 2D caves and their contour meshes")]
struct Args {
    /// Width of the cave grid in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the cave grid in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Seed text (derived from the clock if not specified)
    #[arg(short, long)]
    seed: Option<String>,

    /// Parameter preset (classic, enhanced)
    #[arg(short, long, default_value = "classic")]
    preset: CavePreset,

    /// Load parameters from a JSON file instead of a preset
    #[arg(long)]
    config: Option<String>,

    /// Write the effective parameters to a JSON file
    #[arg(long)]
    save_config: Option<String>,

    /// Initial wall chance (0-100)
    #[arg(short, long)]
    fill: Option<u32>,

    /// Number of smoothing passes
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Wall pockets smaller than this are opened up
    #[arg(long)]
    wall_threshold: Option<usize>,

    /// Rooms smaller than this are filled in
    #[arg(long)]
    room_threshold: Option<usize>,

    /// Bridge brush radius
    #[arg(short, long)]
    radius: Option<i32>,

    /// Border thickness added around the finished grid
    #[arg(short, long)]
    border: Option<usize>,

    /// Height of the extruded walls
    #[arg(long)]
    wall_height: Option<f32>,

    /// Print the cave as ASCII
    #[arg(long)]
    ascii: bool,

    /// Export the grid to PNG (specify output path)
    #[arg(long)]
    export_png: Option<String>,

    /// Pixel scale for the PNG export
    #[arg(long, default_value = "4")]
    png_scale: u32,

    /// Export the meshes as Wavefront OBJ
    #[arg(long)]
    export_obj: Option<String>,

    /// Export grid, regions and meshes as JSON
    #[arg(long)]
    export_json: Option<String>,

    /// Export a text report
    #[arg(long)]
    export_report: Option<String>,
}

impl Args {
    fn build_config(&self) -> cave_generator::Result<CaveConfig> {
        let mut config = match &self.config {
            Some(path) => CaveConfig::from_json_file(path)?,
            None => self.preset.config(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = &self.seed {
            config.seed = Some(seed.clone());
        }
        if let Some(fill) = self.fill {
            config.fill_percent = fill;
        }
        if let Some(iterations) = self.iterations {
            config.smoothing_iterations = iterations;
        }
        if let Some(threshold) = self.wall_threshold {
            config.wall_threshold = threshold;
        }
        if let Some(threshold) = self.room_threshold {
            config.room_threshold = threshold;
        }
        if let Some(radius) = self.radius {
            config.bridge_radius = radius;
        }
        if let Some(border) = self.border {
            config.border_size = border;
        }
        if let Some(wall_height) = self.wall_height {
            config.wall_height = wall_height;
        }

        Ok(config)
    }
}

fn run_exports(args: &Args, cave: &GeneratedCave) -> cave_generator::Result<()> {
    if let Some(path) = &args.export_png {
        println!("Exporting grid to {}...", path);
        export::export_grid_png(cave.grid(), cave.region_count(), args.png_scale, path)?;
    }
    if let Some(path) = &args.export_obj {
        println!("Exporting meshes to {}...", path);
        export::export_obj(cave.meshes(), path)?;
    }
    if let Some(path) = &args.export_json {
        println!("Exporting cave data to {}...", path);
        export::export_json(cave, path)?;
    }
    if let Some(path) = &args.export_report {
        println!("Exporting report to {}...", path);
        ascii::export_report(cave, path)?;
    }
    Ok(())
}

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
    let args = Args::parse();
    init_logging();

    let config = match args.build_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.save_config {
        if let Err(e) = config.to_json_file(path) {
            eprintln!("Failed to save config: {}", e);
        } else {
            println!("Saved config to {}", path);
        }
    }

    match &config.seed {
        Some(seed) => println!("Generating cave with seed: {}", seed),
        None => println!("Generating cave with a clock seed"),
    }
    println!("Grid size: {}x{} ({})", config.width, config.height, args.preset);

    let cave = match generate(&config) {
        Ok(cave) => cave,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            std::process::exit(1);
        }
    };

    let stats = cave.stats();
    println!("Seed: {}", cave.seed());
    println!(
        "Regions: {} ({} small rooms filled, {} wall specks opened)",
        cave.region_count(),
        stats.discarded_rooms,
        stats.dissolved_walls
    );
    println!("Bridges: {} ({} cells carved)", cave.bridges().len(), stats.bridge_cells);
    println!(
        "Meshes: {} floor triangles, {} wall quads",
        stats.floor_triangles, stats.wall_quads
    );
    if cave.meshes().interior.is_some() {
        println!("Interior surface: {} triangles", stats.interior_triangles);
    }

    if args.ascii {
        println!();
        ascii::print_grid(cave.grid());
    }

    if let Err(e) = run_exports(&args, &cave) {
        eprintln!("Export failed: {}", e);
        std::process::exit(1);
    }
}
