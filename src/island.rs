//! Island map: the mesh plus every array derived from it
//!
//! [`IslandMap::calculate`] runs the whole pipeline
//! water → ocean → elevation → rivers → moisture → coast/temperature → biome
//! and replaces every derived array. Consumers only get shared references.

use std::collections::BTreeMap;

use crate::biomes::{assign_biome, assign_coast, assign_temperature, Biome};
use crate::config::MapOptions;
use crate::elevation::{
    assign_coast_distance, assign_downslope, assign_raw_elevation, assign_region_elevation,
    redistribute_elevation,
};
use crate::error::{ConfigError, MapError};
use crate::mesh::{DualMesh, MeshBuilder, MeshOptions};
use crate::moisture::{assign_moisture, find_moisture_seeds, redistribute_moisture};
use crate::noise_field::{default_noise, NoiseSource};
use crate::random::RandInt;
use crate::rivers::{assign_flow, choose_rivers, find_springs};
use crate::water::{assign_ocean, assign_water};

/// Per-region arrays
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RegionData {
    pub water: Vec<bool>,
    pub ocean: Vec<bool>,
    pub elevation: Vec<f64>,
    pub water_distance: Vec<Option<u32>>,
    pub moisture: Vec<f64>,
    pub coast: Vec<bool>,
    pub temperature: Vec<f64>,
    pub biome: Vec<Biome>,
}

/// Per-triangle arrays
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TriangleData {
    pub elevation: Vec<f64>,
    pub coast_distance: Vec<Option<u32>>,
    pub downslope: Vec<Option<usize>>,
}

/// Per-side arrays
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SideData {
    pub flow: Vec<u32>,
}

/// Summary numbers for a calculated map
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapStats {
    pub land_regions: usize,
    pub ocean_regions: usize,
    pub lake_regions: usize,
    pub coast_regions: usize,
    pub springs: usize,
    pub rivers: usize,
    pub max_flow: u32,
    pub max_coast_distance: u32,
    pub biome_counts: BTreeMap<Biome, usize>,
}

impl MapStats {
    pub fn print_summary(&self) {
        println!("Land regions:  {}", self.land_regions);
        println!("Ocean regions: {}", self.ocean_regions);
        println!("Lake regions:  {}", self.lake_regions);
        println!("Coast regions: {}", self.coast_regions);
        println!("Rivers: {} of {} springs (max flow {})", self.rivers, self.springs, self.max_flow);
        println!("Max coast distance: {}", self.max_coast_distance);
        println!("Biomes:");
        for (biome, count) in &self.biome_counts {
            println!("  {:<28} {:>6}", biome.display_name(), count);
        }
    }
}

/// Generated island. Owns the mesh and all derived arrays.
pub struct IslandMap {
    mesh: DualMesh,
    regions: RegionData,
    triangles: TriangleData,
    sides: SideData,
    springs: Vec<usize>,
    rivers: Vec<usize>,
}

impl IslandMap {
    /// Wrap a mesh. Derived arrays stay empty until [`IslandMap::calculate`].
    pub fn new(mesh: DualMesh) -> Self {
        Self {
            mesh,
            regions: RegionData::default(),
            triangles: TriangleData::default(),
            sides: SideData::default(),
            springs: Vec::new(),
            rivers: Vec::new(),
        }
    }

    /// Build a mesh and calculate it with the default noise seeded from `options`.
    pub fn generate(mesh_options: &MeshOptions, options: &MapOptions) -> Result<Self, MapError> {
        let mesh = MeshBuilder::from_options(mesh_options)?;
        let mut map = IslandMap::new(mesh);
        map.calculate(&default_noise(options.noise_seed), options)?;
        Ok(map)
    }

    pub fn mesh(&self) -> &DualMesh {
        &self.mesh
    }

    pub fn regions(&self) -> &RegionData {
        &self.regions
    }

    pub fn triangles(&self) -> &TriangleData {
        &self.triangles
    }

    pub fn sides(&self) -> &SideData {
        &self.sides
    }

    /// Every spring candidate, in shuffled order.
    pub fn springs(&self) -> &[usize] {
        &self.springs
    }

    /// Source triangles of the traced rivers.
    pub fn rivers(&self) -> &[usize] {
        &self.rivers
    }

    /// Run the full pipeline. On error the previous arrays are left untouched.
    pub fn calculate<N: NoiseSource + ?Sized>(&mut self, noise: &N, options: &MapOptions) -> Result<(), ConfigError> {
        options.validate()?;
        let mesh = &self.mesh;

        let water = assign_water(mesh, noise, &options.shape);
        let ocean = assign_ocean(mesh, &water);
        log::debug!(
            "Water: {} land, {} ocean, {} lake regions",
            water.iter().filter(|&&w| !w).count(),
            ocean.iter().filter(|&&o| o).count(),
            water.iter().zip(&ocean).filter(|&(&w, &o)| w && !o).count()
        );

        let coast_distance = assign_coast_distance(mesh, &water);
        let raw_elevation = assign_raw_elevation(&coast_distance);
        let downslope = assign_downslope(mesh, &raw_elevation, &mut RandInt::new(options.drainage_seed));
        let triangle_elevation = redistribute_elevation(mesh, &raw_elevation);
        let region_elevation = assign_region_elevation(mesh, &triangle_elevation);
        log::debug!(
            "Elevation: max coast distance {}",
            coast_distance.iter().flatten().max().copied().unwrap_or(0)
        );

        let mut springs = find_springs(mesh, &water, &triangle_elevation, &downslope);
        let rivers = choose_rivers(&mut springs, options.num_rivers, &mut RandInt::new(options.river_seed));
        let flow = assign_flow(mesh, &downslope, &rivers);
        log::debug!("Rivers: {} traced from {} springs", rivers.len(), springs.len());

        let seeds = find_moisture_seeds(mesh, &flow, &ocean, &water);
        let (moisture, water_distance) = assign_moisture(mesh, &water, &seeds);
        let bias = options.biome_bias.moisture;
        let moisture = redistribute_moisture(mesh, &water, &moisture, bias, 1.0 + bias);
        log::debug!("Moisture: {} seed regions", seeds.len());

        let coast = assign_coast(mesh, &ocean);
        let temperature = assign_temperature(
            mesh,
            &region_elevation,
            options.biome_bias.north_temperature,
            options.biome_bias.south_temperature,
        );
        let biome = assign_biome(mesh, &ocean, &water, &coast, &temperature, &moisture);

        self.regions = RegionData {
            water,
            ocean,
            elevation: region_elevation,
            water_distance,
            moisture,
            coast,
            temperature,
            biome,
        };
        self.triangles = TriangleData {
            elevation: triangle_elevation,
            coast_distance,
            downslope,
        };
        self.sides = SideData { flow };
        self.springs = springs;
        self.rivers = rivers;

        log::info!(
            "Calculated island: {} regions, {} rivers",
            self.mesh.num_regions(),
            self.rivers.len()
        );
        Ok(())
    }

    pub fn stats(&self) -> MapStats {
        let r = &self.regions;
        let mut biome_counts = BTreeMap::new();
        for &b in &r.biome {
            *biome_counts.entry(b).or_insert(0) += 1;
        }
        MapStats {
            land_regions: r.water.iter().filter(|&&w| !w).count(),
            ocean_regions: r.ocean.iter().filter(|&&o| o).count(),
            lake_regions: r.water.iter().zip(&r.ocean).filter(|&(&w, &o)| w && !o).count(),
            coast_regions: r.coast.iter().filter(|&&c| c).count(),
            springs: self.springs.len(),
            rivers: self.rivers.len(),
            max_flow: self.sides.flow.iter().copied().max().unwrap_or(0),
            max_coast_distance: self.triangles.coast_distance.iter().flatten().copied().max().unwrap_or(0),
            biome_counts,
        }
    }
}
