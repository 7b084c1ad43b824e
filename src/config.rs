//! Map generation options
//!
//! All options have defaults, and JSON config files may set any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::seeds::MapSeeds;

/// Landmass silhouette controls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    /// Blend of the noise value toward 0.5 (0 = raw noise, 1 = flat)
    pub round: f64,
    /// Reduction of the radial falloff (1 = no falloff)
    pub inflate: f64,
    /// Octave weights, lowest frequency first
    pub amplitudes: Vec<f64>,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            round: 0.5,
            inflate: 0.4,
            amplitudes: vec![1.0 / 2.0, 1.0 / 4.0, 1.0 / 8.0, 1.0 / 16.0],
        }
    }
}

/// Edge jittering for external renderers that draw noisy region outlines.
/// Neither the pipeline nor [`crate::export::render_biome_map`], which draws
/// straight cell edges, reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoisyEdgeOptions {
    pub length: f64,
    pub amplitude: f64,
    pub seed: u64,
}

impl Default for NoisyEdgeOptions {
    fn default() -> Self {
        Self {
            length: 10.0,
            amplitude: 0.2,
            seed: 0,
        }
    }
}

/// Climate offsets
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeBias {
    /// Temperature added at the north edge (y = 0)
    pub north_temperature: f64,
    /// Temperature added at the south edge (y = height)
    pub south_temperature: f64,
    /// Shift of the moisture range; land moisture spans [moisture, 1 + moisture]
    pub moisture: f64,
}

/// Options for one run of the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub shape: ShapeParams,
    /// Maximum number of rivers traced
    pub num_rivers: usize,
    pub drainage_seed: u64,
    pub river_seed: u64,
    /// Seed for the default noise source
    pub noise_seed: u32,
    pub noisy_edge: NoisyEdgeOptions,
    pub biome_bias: BiomeBias,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            shape: ShapeParams::default(),
            num_rivers: 30,
            drainage_seed: 0,
            river_seed: 0,
            noise_seed: 0,
            noisy_edge: NoisyEdgeOptions::default(),
            biome_bias: BiomeBias::default(),
        }
    }
}

impl MapOptions {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let options: MapOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Replace every seed with the ones in `seeds`.
    pub fn with_seeds(mut self, seeds: &MapSeeds) -> Self {
        self.noise_seed = seeds.noise;
        self.drainage_seed = seeds.drainage;
        self.river_seed = seeds.rivers;
        self.noisy_edge.seed = seeds.noisy_edge;
        self
    }

    /// Reject options the pipeline cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shape.amplitudes.is_empty() {
            return Err(ConfigError::EmptyAmplitudes);
        }
        let sum: f64 = self.shape.amplitudes.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Err(ConfigError::BadAmplitudeSum(sum));
        }
        let scalars = [
            ("shape.round", self.shape.round),
            ("shape.inflate", self.shape.inflate),
            ("biome_bias.north_temperature", self.biome_bias.north_temperature),
            ("biome_bias.south_temperature", self.biome_bias.south_temperature),
            ("biome_bias.moisture", self.biome_bias.moisture),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        Ok(())
    }
}
