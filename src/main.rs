use std::process::ExitCode;

use clap::Parser;

use island_generator::{export, IslandMap, MapError, MapOptions, MapSeeds, MeshOptions};

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island maps on a dual mesh")]
struct Args {
    /// Master seed; derives mesh, noise, drainage and river seeds (random if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with map options (missing fields use defaults)
    #[arg(short, long)]
    config: Option<String>,

    /// Map size in map units (square)
    #[arg(long, default_value = "1000")]
    size: f64,

    /// Distance between mesh points
    #[arg(long, default_value = "16")]
    spacing: f64,

    /// Number of rivers (overrides the config file)
    #[arg(short = 'r', long)]
    rivers: Option<usize>,

    /// Drainage tie-break seed (overrides the derived seed)
    #[arg(long)]
    drainage_seed: Option<u64>,

    /// River selection seed (overrides the derived seed)
    #[arg(long)]
    river_seed: Option<u64>,

    /// Export the biome map to PNG (e.g., "island.png")
    #[arg(long)]
    export_png: Option<String>,

    /// PNG size in pixels along the longer side
    #[arg(long, default_value = "1024")]
    png_size: u32,

    /// Export all derived arrays to JSON
    #[arg(long)]
    export_json: Option<String>,
}

fn run(args: &Args) -> Result<IslandMap, MapError> {
    let master = args.seed.unwrap_or_else(rand::random);
    let mut seeds = MapSeeds::builder(master);
    if let Some(seed) = args.drainage_seed {
        seeds = seeds.drainage(seed);
    }
    if let Some(seed) = args.river_seed {
        seeds = seeds.rivers(seed);
    }
    let seeds = seeds.build();
    println!("Generating island with seed: {}", master);
    log::debug!("{}", seeds);

    let mut options = match &args.config {
        Some(path) => MapOptions::from_json_file(path)?,
        None => MapOptions::default(),
    }
    .with_seeds(&seeds);
    if let Some(rivers) = args.rivers {
        options.num_rivers = rivers;
    }

    let mesh_options = MeshOptions {
        width: args.size,
        height: args.size,
        spacing: args.spacing,
        seed: seeds.mesh,
        ..MeshOptions::default()
    };

    println!("Building mesh and running pipeline...");
    let map = IslandMap::generate(&mesh_options, &options)?;
    let mesh = map.mesh();
    println!(
        "Mesh: {} regions, {} triangles, {} sides",
        mesh.num_regions(),
        mesh.num_triangles(),
        mesh.num_sides()
    );
    Ok(map)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let map = match run(&args) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    map.stats().print_summary();

    if let Some(path) = &args.export_png {
        println!("Exporting biome map to {}...", path);
        if let Err(e) = export::export_biome_map(&map, args.png_size, path) {
            eprintln!("Failed to export PNG: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = &args.export_json {
        println!("Exporting map data to {}...", path);
        if let Err(e) = export::export_json(&map, path) {
            eprintln!("Failed to export JSON: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
