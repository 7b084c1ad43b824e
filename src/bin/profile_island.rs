//! Profiling tool for the island pipeline

use std::time::Instant;

use island_generator::{
    biomes, elevation, moisture, noise_field, random::RandInt, rivers, water, MapOptions, MeshBuilder,
    MeshOptions,
};

fn main() {
    env_logger::init();

    let mesh_options = MeshOptions { spacing: 8.0, ..MeshOptions::default() };
    let options = MapOptions::default();

    println!("=== Performance Profiling ===");

    let start = Instant::now();
    let mesh = match MeshBuilder::from_options(&mesh_options) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Mesh construction failed: {}", e);
            return;
        }
    };
    let mesh_time = start.elapsed();
    println!("Mesh: {} regions ({:?})", mesh.num_regions(), mesh_time);
    println!();

    let noise = noise_field::default_noise(options.noise_seed);

    let start = Instant::now();
    let is_water = water::assign_water(&mesh, &noise, &options.shape);
    let is_ocean = water::assign_ocean(&mesh, &is_water);
    let water_time = start.elapsed();
    println!("Water/ocean: {:?}", water_time);

    let start = Instant::now();
    let coast_distance = elevation::assign_coast_distance(&mesh, &is_water);
    let raw = elevation::assign_raw_elevation(&coast_distance);
    let downslope = elevation::assign_downslope(&mesh, &raw, &mut RandInt::new(options.drainage_seed));
    let t_elevation = elevation::redistribute_elevation(&mesh, &raw);
    let r_elevation = elevation::assign_region_elevation(&mesh, &t_elevation);
    let elevation_time = start.elapsed();
    println!("Elevation: {:?}", elevation_time);

    let start = Instant::now();
    let mut springs = rivers::find_springs(&mesh, &is_water, &t_elevation, &downslope);
    let river_sources = rivers::choose_rivers(&mut springs, options.num_rivers, &mut RandInt::new(options.river_seed));
    let flow = rivers::assign_flow(&mesh, &downslope, &river_sources);
    let river_time = start.elapsed();
    println!("Rivers: {:?} ({} springs)", river_time, springs.len());

    let start = Instant::now();
    let seeds = moisture::find_moisture_seeds(&mesh, &flow, &is_ocean, &is_water);
    let (r_moisture, _) = moisture::assign_moisture(&mesh, &is_water, &seeds);
    let r_moisture = moisture::redistribute_moisture(&mesh, &is_water, &r_moisture, 0.0, 1.0);
    let moisture_time = start.elapsed();
    println!("Moisture: {:?}", moisture_time);

    let start = Instant::now();
    let coast = biomes::assign_coast(&mesh, &is_ocean);
    let temperature = biomes::assign_temperature(&mesh, &r_elevation, 0.0, 0.0);
    let _biome = biomes::assign_biome(&mesh, &is_ocean, &is_water, &coast, &temperature, &r_moisture);
    let biome_time = start.elapsed();
    println!("Coast/temperature/biome: {:?}", biome_time);

    let total = water_time + elevation_time + river_time + moisture_time + biome_time;
    let pct = |d: std::time::Duration| 100.0 * d.as_secs_f64() / total.as_secs_f64();
    println!("\n=== Summary ===");
    println!("Water:      {:>8.2}% ({:?})", pct(water_time), water_time);
    println!("Elevation:  {:>8.2}% ({:?})", pct(elevation_time), elevation_time);
    println!("Rivers:     {:>8.2}% ({:?})", pct(river_time), river_time);
    println!("Moisture:   {:>8.2}% ({:?})", pct(moisture_time), moisture_time);
    println!("Biomes:     {:>8.2}% ({:?})", pct(biome_time), biome_time);
    println!("─────────────────────────────────");
    println!("Total:      {:?}", total);
}
