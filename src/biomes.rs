//! Coast, temperature and biome assignment

use crate::mesh::DualMesh;
use crate::water::mix;

/// Final terrain classification of a region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Biome {
    Ocean,
    Marsh,
    Ice,
    Lake,
    Beach,
    Snow,
    Tundra,
    Bare,
    Scorched,
    Taiga,
    Shrubland,
    TemperateDesert,
    TemperateRainForest,
    TemperateDeciduousForest,
    Grassland,
    TropicalRainForest,
    TropicalSeasonalForest,
    SubtropicalDesert,
}

impl Biome {
    pub fn all() -> &'static [Self] {
        &[
            Self::Ocean,
            Self::Marsh,
            Self::Ice,
            Self::Lake,
            Self::Beach,
            Self::Snow,
            Self::Tundra,
            Self::Bare,
            Self::Scorched,
            Self::Taiga,
            Self::Shrubland,
            Self::TemperateDesert,
            Self::TemperateRainForest,
            Self::TemperateDeciduousForest,
            Self::Grassland,
            Self::TropicalRainForest,
            Self::TropicalSeasonalForest,
            Self::SubtropicalDesert,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Biome::Ocean => "Ocean",
            Biome::Marsh => "Marsh",
            Biome::Ice => "Ice",
            Biome::Lake => "Lake",
            Biome::Beach => "Beach",
            Biome::Snow => "Snow",
            Biome::Tundra => "Tundra",
            Biome::Bare => "Bare",
            Biome::Scorched => "Scorched",
            Biome::Taiga => "Taiga",
            Biome::Shrubland => "Shrubland",
            Biome::TemperateDesert => "Temperate Desert",
            Biome::TemperateRainForest => "Temperate Rain Forest",
            Biome::TemperateDeciduousForest => "Temperate Deciduous Forest",
            Biome::Grassland => "Grassland",
            Biome::TropicalRainForest => "Tropical Rain Forest",
            Biome::TropicalSeasonalForest => "Tropical Seasonal Forest",
            Biome::SubtropicalDesert => "Subtropical Desert",
        }
    }

    /// RGB colour for map rendering
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Biome::Ocean => (68, 68, 122),
            Biome::Marsh => (47, 102, 102),
            Biome::Ice => (153, 255, 255),
            Biome::Lake => (51, 102, 153),
            Biome::Beach => (160, 144, 119),
            Biome::Snow => (255, 255, 255),
            Biome::Tundra => (187, 187, 170),
            Biome::Bare => (136, 136, 136),
            Biome::Scorched => (85, 85, 85),
            Biome::Taiga => (153, 170, 119),
            Biome::Shrubland => (136, 153, 119),
            Biome::TemperateDesert => (201, 210, 155),
            Biome::TemperateRainForest => (68, 136, 85),
            Biome::TemperateDeciduousForest => (103, 148, 89),
            Biome::Grassland => (136, 170, 85),
            Biome::TropicalRainForest => (51, 119, 85),
            Biome::TropicalSeasonalForest => (85, 153, 68),
            Biome::SubtropicalDesert => (210, 185, 139),
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Biome::Ocean | Biome::Marsh | Biome::Ice | Biome::Lake)
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Biome lookup. Depends on nothing but its arguments.
pub fn biome(ocean: bool, water: bool, coast: bool, temperature: f64, moisture: f64) -> Biome {
    if ocean {
        Biome::Ocean
    } else if water {
        if temperature > 0.9 {
            Biome::Marsh
        } else if temperature < 0.2 {
            Biome::Ice
        } else {
            Biome::Lake
        }
    } else if coast {
        Biome::Beach
    } else if temperature < 0.2 {
        if moisture > 0.50 {
            Biome::Snow
        } else if moisture > 0.33 {
            Biome::Tundra
        } else if moisture > 0.16 {
            Biome::Bare
        } else {
            Biome::Scorched
        }
    } else if temperature < 0.4 {
        if moisture > 0.66 {
            Biome::Taiga
        } else if moisture > 0.33 {
            Biome::Shrubland
        } else {
            Biome::TemperateDesert
        }
    } else if temperature < 0.7 {
        if moisture > 0.83 {
            Biome::TemperateRainForest
        } else if moisture > 0.50 {
            Biome::TemperateDeciduousForest
        } else if moisture > 0.16 {
            Biome::Grassland
        } else {
            Biome::TemperateDesert
        }
    } else if moisture > 0.66 {
        Biome::TropicalRainForest
    } else if moisture > 0.33 {
        Biome::TropicalSeasonalForest
    } else if moisture > 0.16 {
        Biome::Grassland
    } else {
        Biome::SubtropicalDesert
    }
}

/// A coast region is land with at least one ocean neighbour.
pub fn assign_coast(mesh: &DualMesh, ocean: &[bool]) -> Vec<bool> {
    (0..mesh.num_regions())
        .map(|r| !ocean[r] && mesh.circulate_regions(r).any(|n| ocean[n]))
        .collect()
}

/// Temperature from elevation and latitude.
///
/// 0 is cold and 1 hot at zero bias, but the result is not clamped. The north
/// edge (y = 0) gets `bias_north` added, the south edge `bias_south`, and
/// rows in between a blend of the two.
pub fn assign_temperature(mesh: &DualMesh, elevation: &[f64], bias_north: f64, bias_south: f64) -> Vec<f64> {
    (0..mesh.num_regions())
        .map(|r| {
            let latitude = mesh.region_y(r) / mesh.height();
            1.0 - elevation[r] + mix(bias_north, bias_south, latitude)
        })
        .collect()
}

pub fn assign_biome(
    mesh: &DualMesh,
    ocean: &[bool],
    water: &[bool],
    coast: &[bool],
    temperature: &[f64],
    moisture: &[f64],
) -> Vec<Biome> {
    (0..mesh.num_regions())
        .map(|r| biome(ocean[r], water[r], coast[r], temperature[r], moisture[r]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshBuilder, MeshOptions};

    #[test]
    fn test_priority_order() {
        // Ocean wins over everything
        assert_eq!(biome(true, true, true, 0.0, 0.0), Biome::Ocean);
        // Inland water by temperature
        assert_eq!(biome(false, true, true, 0.95, 0.5), Biome::Marsh);
        assert_eq!(biome(false, true, false, 0.1, 0.5), Biome::Ice);
        assert_eq!(biome(false, true, false, 0.5, 0.5), Biome::Lake);
        // Coast before climate bands
        assert_eq!(biome(false, false, true, 0.1, 0.9), Biome::Beach);
    }

    #[test]
    fn test_cold_band() {
        assert_eq!(biome(false, false, false, 0.1, 0.51), Biome::Snow);
        assert_eq!(biome(false, false, false, 0.1, 0.50), Biome::Tundra);
        assert_eq!(biome(false, false, false, 0.1, 0.33), Biome::Bare);
        assert_eq!(biome(false, false, false, 0.1, 0.16), Biome::Scorched);
    }

    #[test]
    fn test_cool_band() {
        assert_eq!(biome(false, false, false, 0.2, 0.67), Biome::Taiga);
        assert_eq!(biome(false, false, false, 0.3, 0.66), Biome::Shrubland);
        assert_eq!(biome(false, false, false, 0.39, 0.33), Biome::TemperateDesert);
    }

    #[test]
    fn test_temperate_band() {
        assert_eq!(biome(false, false, false, 0.4, 0.84), Biome::TemperateRainForest);
        assert_eq!(biome(false, false, false, 0.5, 0.83), Biome::TemperateDeciduousForest);
        assert_eq!(biome(false, false, false, 0.6, 0.5), Biome::Grassland);
        assert_eq!(biome(false, false, false, 0.69, 0.16), Biome::TemperateDesert);
    }

    #[test]
    fn test_warm_band() {
        assert_eq!(biome(false, false, false, 0.7, 0.67), Biome::TropicalRainForest);
        assert_eq!(biome(false, false, false, 1.5, 0.66), Biome::TropicalSeasonalForest);
        assert_eq!(biome(false, false, false, 0.8, 0.2), Biome::Grassland);
        assert_eq!(biome(false, false, false, 0.8, 0.0), Biome::SubtropicalDesert);
    }

    #[test]
    fn test_coast_and_temperature() {
        let mesh = MeshBuilder::from_options(&MeshOptions {
            width: 400.0,
            height: 400.0,
            spacing: 100.0,
            jitter: 0.0,
            seed: 0,
        })
        .unwrap();
        let ocean: Vec<bool> = (0..mesh.num_regions())
            .map(|r| mesh.is_boundary_region(r) || mesh.is_ghost_region(r))
            .collect();
        let coast = assign_coast(&mesh, &ocean);
        // 5x5 grid: the 8 regions around the centre touch the ring, the centre does not
        let centre = 2 * 5 + 2;
        assert!(!coast[centre]);
        for r in [6, 7, 8, 11, 13, 16, 17, 18] {
            assert!(coast[r], "region {}", r);
        }
        assert!(!coast[0]);

        let elevation = vec![0.25; mesh.num_regions()];
        let temperature = assign_temperature(&mesh, &elevation, -0.5, 0.5);
        assert!((temperature[0] - 0.25).abs() < 1e-12);
        assert!((temperature[centre] - 0.75).abs() < 1e-12);
        assert!((temperature[24] - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_every_biome_has_a_name_and_color() {
        for b in Biome::all() {
            assert!(!b.display_name().is_empty());
            let _ = b.color();
        }
        assert_eq!(Biome::all().len(), 18);
    }
}
