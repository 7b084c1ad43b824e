//! Seed management for island generation
//!
//! Provides separate seeds for each randomised part of the pipeline, so one
//! aspect (say, river placement) can be varied while the rest stays fixed.

/// Seeds for every randomised part of island generation.
///
/// By default each seed is derived from a master seed. Individual seeds can
/// be overridden through the builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Point field jitter
    pub mesh: u64,
    /// Noise field that shapes the coastline
    pub noise: u32,
    /// Tie-breaking between equally low neighbours when assigning drainage
    pub drainage: u64,
    /// Shuffling of spring candidates
    pub rivers: u64,
    /// Edge jittering for rendering
    pub noisy_edge: u64,
}

impl MapSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            mesh: derive_seed(master, "mesh"),
            noise: derive_seed(master, "noise") as u32,
            drainage: derive_seed(master, "drainage"),
            rivers: derive_seed(master, "rivers"),
            noisy_edge: derive_seed(master, "noisy_edge"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> MapSeedsBuilder {
        MapSeedsBuilder::new(master)
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct MapSeedsBuilder {
    seeds: MapSeeds,
}

impl MapSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: MapSeeds::from_master(master),
        }
    }

    pub fn mesh(mut self, seed: u64) -> Self {
        self.seeds.mesh = seed;
        self
    }

    pub fn noise(mut self, seed: u32) -> Self {
        self.seeds.noise = seed;
        self
    }

    pub fn drainage(mut self, seed: u64) -> Self {
        self.seeds.drainage = seed;
        self
    }

    pub fn rivers(mut self, seed: u64) -> Self {
        self.seeds.rivers = seed;
        self
    }

    pub fn build(self) -> MapSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a system name.
/// FNV-1a over the name followed by a splitmix64 finaliser, so derived seeds
/// do not depend on the standard library's hasher.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in system.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    let mut z = master ^ hash;
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl std::fmt::Display for MapSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MapSeeds {{ master: {}, mesh: {}, noise: {}, drainage: {}, rivers: {}, noisy_edge: {} }}",
            self.master, self.mesh, self.noise, self.drainage, self.rivers, self.noisy_edge,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        assert_eq!(MapSeeds::from_master(12345), MapSeeds::from_master(12345));
    }

    #[test]
    fn test_different_systems_get_different_seeds() {
        let seeds = MapSeeds::from_master(12345);

        assert_ne!(seeds.mesh, seeds.drainage);
        assert_ne!(seeds.drainage, seeds.rivers);
        assert_ne!(seeds.rivers, seeds.noisy_edge);
    }

    #[test]
    fn test_builder_override() {
        let seeds = MapSeeds::builder(12345).rivers(99999).build();

        assert_eq!(seeds.rivers, 99999);

        let default_seeds = MapSeeds::from_master(12345);
        assert_eq!(seeds.drainage, default_seeds.drainage);
        assert_eq!(seeds.noise, default_seeds.noise);
    }
}
