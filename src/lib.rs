//! Island map generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod biomes;
pub mod config;
pub mod elevation;
pub mod error;
pub mod export;
pub mod island;
pub mod mesh;
pub mod moisture;
pub mod noise_field;
pub mod random;
pub mod rivers;
pub mod seeds;
pub mod water;

pub use biomes::Biome;
pub use config::{BiomeBias, MapOptions, NoisyEdgeOptions, ShapeParams};
pub use error::{ConfigError, MapError, MeshError};
pub use island::{IslandMap, MapStats};
pub use mesh::{DualMesh, MeshBuilder, MeshOptions, Triangulation};
pub use noise_field::NoiseSource;
pub use seeds::MapSeeds;
