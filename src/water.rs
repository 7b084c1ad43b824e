//! Water and ocean classification
//!
//! A region is water when its noise value, pulled toward 0.5 and pushed down
//! with distance from the map centre, is negative. Water reachable from the
//! ghost region through other water is ocean; the rest are lakes.

use crate::config::ShapeParams;
use crate::mesh::DualMesh;
use crate::noise_field::{fbm_noise, NoiseSource};

/// Linear interpolation between `a` and `b`.
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Water flag per region. Boundary and ghost regions are always water.
pub fn assign_water<N: NoiseSource + ?Sized>(mesh: &DualMesh, noise: &N, shape: &ShapeParams) -> Vec<bool> {
    let half_width = mesh.width() / 2.0;
    let half_height = mesh.height() / 2.0;

    (0..mesh.num_regions())
        .map(|r| {
            if mesh.is_ghost_region(r) || mesh.is_boundary_region(r) {
                return true;
            }
            let nx = (mesh.region_x(r) - half_width) / half_width;
            let ny = (mesh.region_y(r) - half_height) / half_height;
            let distance = nx.abs().max(ny.abs());
            let n = mix(fbm_noise(noise, &shape.amplitudes, nx, ny), 0.5, shape.round);
            n - (1.0 - shape.inflate) * distance * distance < 0.0
        })
        .collect()
}

/// Ocean flag per region: water connected to the ghost region.
pub fn assign_ocean(mesh: &DualMesh, water: &[bool]) -> Vec<bool> {
    let mut ocean = vec![false; mesh.num_regions()];
    let ghost = mesh.ghost_region();
    ocean[ghost] = water[ghost];
    let mut stack = vec![ghost];
    while let Some(current) = stack.pop() {
        for neighbor in mesh.circulate_regions(current) {
            if water[neighbor] && !ocean[neighbor] {
                ocean[neighbor] = true;
                stack.push(neighbor);
            }
        }
    }
    ocean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshBuilder, MeshOptions};

    struct Constant(f64);

    impl noise::NoiseFn<f64, 2> for Constant {
        fn get(&self, _point: [f64; 2]) -> f64 {
            self.0
        }
    }

    fn mesh(cells: usize) -> DualMesh {
        MeshBuilder::from_options(&MeshOptions {
            width: 1000.0,
            height: 1000.0,
            spacing: 1000.0 / cells as f64,
            jitter: 0.0,
            seed: 0,
        })
        .unwrap()
    }

    #[test]
    fn test_boundary_forced_to_water() {
        let mesh = mesh(6);
        let water = assign_water(&mesh, &Constant(1.0), &ShapeParams::default());
        assert_eq!(water.len(), mesh.num_regions());
        for r in 0..mesh.num_regions() {
            if mesh.is_boundary_region(r) || mesh.is_ghost_region(r) {
                assert!(water[r]);
            }
        }
        // Centre point: distance 0, noise 1 blended to 0.75
        assert!(!water[3 * 7 + 3]);
    }

    #[test]
    fn test_low_noise_floods_everything() {
        let mesh = mesh(6);
        let water = assign_water(&mesh, &Constant(-1.0), &ShapeParams { round: 0.0, ..ShapeParams::default() });
        assert!(water.iter().all(|&w| w));
    }

    #[test]
    fn test_lake_is_not_ocean() {
        // 7x7 points: land ring around a single water region at the centre
        let mesh = mesh(6);
        let mut water = vec![false; mesh.num_regions()];
        for r in 0..mesh.num_regions() {
            water[r] = mesh.is_boundary_region(r) || mesh.is_ghost_region(r);
        }
        let centre = 3 * 7 + 3;
        water[centre] = true;

        let ocean = assign_ocean(&mesh, &water);
        assert!(!ocean[centre]);
        for r in 0..mesh.num_regions() {
            if mesh.is_boundary_region(r) {
                assert!(ocean[r]);
            }
            if ocean[r] {
                assert!(water[r]);
            }
        }
    }

    #[test]
    fn test_mix() {
        assert_eq!(mix(0.0, 1.0, 0.25), 0.25);
        assert_eq!(mix(2.0, 4.0, 0.0), 2.0);
        assert_eq!(mix(2.0, 4.0, 1.0), 4.0);
    }
}
