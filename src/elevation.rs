//! Elevation and drainage
//!
//! Triangles are the unit of elevation. Each triangle's distance from the
//! coast is found with a breadth first search seeded at the triangles that
//! touch both land and water. Raw elevation is that distance normalised by
//! the largest distance found, so it rises strictly inland and is zero on the
//! coast and over open water.
//!
//! Drainage follows the steepest way down: every triangle points at the
//! neighbouring triangle with the lowest elevation strictly below its own.
//! Afterwards elevations are redistributed by rank so that lowlands are more
//! common than peaks, and regions take the mean of their triangles.

use std::collections::VecDeque;

use crate::mesh::DualMesh;
use crate::random::RandInt;

fn has_land(mesh: &DualMesh, water: &[bool], t: usize) -> bool {
    mesh.triangle_regions(t).iter().any(|&r| !water[r])
}

fn has_water(mesh: &DualMesh, water: &[bool], t: usize) -> bool {
    mesh.triangle_regions(t).iter().any(|&r| water[r])
}

/// Steps from the coast per triangle. `None` for triangles entirely in water.
pub fn assign_coast_distance(mesh: &DualMesh, water: &[bool]) -> Vec<Option<u32>> {
    let mut distance = vec![None; mesh.num_triangles()];
    let mut queue = VecDeque::new();

    for t in 0..mesh.num_triangles() {
        if has_land(mesh, water, t) && has_water(mesh, water, t) {
            distance[t] = Some(0);
            queue.push_back(t);
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some(current_distance) = distance[current] else {
            panic!("triangle {} entered the coast distance frontier without a distance", current);
        };
        for neighbor in mesh.triangle_neighbors(current) {
            if distance[neighbor].is_none() && has_land(mesh, water, neighbor) {
                distance[neighbor] = Some(current_distance + 1);
                queue.push_back(neighbor);
            }
        }
    }

    distance
}

/// Raw triangle elevation: coast distance over the largest coast distance.
pub fn assign_raw_elevation(coast_distance: &[Option<u32>]) -> Vec<f64> {
    let max_distance = coast_distance.iter().flatten().copied().max().unwrap_or(0).max(1) as f64;
    coast_distance
        .iter()
        .map(|d| d.map_or(0.0, |d| d as f64 / max_distance))
        .collect()
}

/// Downslope side per triangle, or `None` for local minima.
///
/// Equally low neighbours are resolved with `rand_int`, which is only drawn
/// from when such a tie occurs.
pub fn assign_downslope(mesh: &DualMesh, elevation: &[f64], rand_int: &mut RandInt) -> Vec<Option<usize>> {
    let mut candidates: Vec<usize> = Vec::with_capacity(3);
    (0..mesh.num_triangles())
        .map(|t| {
            let own = elevation[t];
            let mut lowest = own;
            candidates.clear();
            for s in mesh.triangle_sides(t) {
                let e = elevation[mesh.side_outer_triangle(s)];
                if e < lowest {
                    lowest = e;
                    candidates.clear();
                    candidates.push(s);
                } else if e == lowest && e < own {
                    candidates.push(s);
                }
            }
            match candidates.len() {
                0 => None,
                1 => Some(candidates[0]),
                n => Some(candidates[rand_int.next(n)]),
            }
        })
        .collect()
}

/// Remap land triangle elevations (raw elevation > 0) to `sqrt(rank / count)`.
/// Ties keep their index order. Other triangles keep their raw value.
pub fn redistribute_elevation(mesh: &DualMesh, raw: &[f64]) -> Vec<f64> {
    let mut land: Vec<usize> = (0..mesh.num_solid_triangles()).filter(|&t| raw[t] > 0.0).collect();
    land.sort_by(|&a, &b| raw[a].total_cmp(&raw[b]));

    let mut elevation = raw.to_vec();
    let count = land.len() as f64;
    for (rank, &t) in land.iter().enumerate() {
        elevation[t] = (rank as f64 / count).sqrt();
    }
    elevation
}

/// Region elevation: mean of the elevations of its triangles.
pub fn assign_region_elevation(mesh: &DualMesh, triangle_elevation: &[f64]) -> Vec<f64> {
    (0..mesh.num_regions())
        .map(|r| {
            let (sum, count) = mesh
                .circulate_triangles(r)
                .fold((0.0, 0usize), |(sum, count), t| (sum + triangle_elevation[t], count + 1));
            sum / count as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshBuilder, MeshOptions};

    /// 9x9 grid with only the outer ring as water.
    fn island() -> (DualMesh, Vec<bool>) {
        let mesh = MeshBuilder::from_options(&MeshOptions {
            width: 800.0,
            height: 800.0,
            spacing: 100.0,
            jitter: 0.15,
            seed: 3,
        })
        .unwrap();
        let water = (0..mesh.num_regions())
            .map(|r| mesh.is_boundary_region(r) || mesh.is_ghost_region(r))
            .collect();
        (mesh, water)
    }

    #[test]
    fn test_coast_distance_bfs() {
        let (mesh, water) = island();
        let distance = assign_coast_distance(&mesh, &water);
        assert_eq!(distance.len(), mesh.num_triangles());

        for t in 0..mesh.num_triangles() {
            let regions = mesh.triangle_regions(t);
            let land = regions.iter().filter(|&&r| !water[r]).count();
            match land {
                0 => assert_eq!(distance[t], None),
                3 => {
                    let d = distance[t].unwrap();
                    assert!(d >= 1);
                    let min_neighbor = mesh
                        .triangle_neighbors(t)
                        .iter()
                        .filter_map(|&n| distance[n])
                        .min()
                        .unwrap();
                    assert_eq!(d, min_neighbor + 1);
                }
                _ => assert_eq!(distance[t], Some(0)),
            }
        }
        // Ghost triangles only touch water
        for t in mesh.num_solid_triangles()..mesh.num_triangles() {
            assert_eq!(distance[t], None);
        }
    }

    #[test]
    fn test_raw_elevation_increases_with_distance() {
        let distance = vec![None, Some(0), Some(1), Some(2), Some(4)];
        let raw = assign_raw_elevation(&distance);
        assert_eq!(raw, vec![0.0, 0.0, 0.25, 0.5, 1.0]);

        let flat = assign_raw_elevation(&[None, Some(0)]);
        assert_eq!(flat, vec![0.0, 0.0]);
    }

    #[test]
    fn test_downslope_points_strictly_down() {
        let (mesh, water) = island();
        let raw = assign_raw_elevation(&assign_coast_distance(&mesh, &water));
        let downslope = assign_downslope(&mesh, &raw, &mut RandInt::new(0));

        for t in 0..mesh.num_triangles() {
            match downslope[t] {
                Some(s) => {
                    assert_eq!(mesh.side_inner_triangle(s), t);
                    assert!(raw[mesh.side_outer_triangle(s)] < raw[t]);
                }
                None => {
                    for n in mesh.triangle_neighbors(t) {
                        assert!(raw[n] >= raw[t]);
                    }
                }
            }
        }
        // Every inland triangle can drain
        for t in 0..mesh.num_triangles() {
            if raw[t] > 0.0 {
                assert!(downslope[t].is_some());
            }
        }
    }

    #[test]
    fn test_downslope_reproducible_per_seed() {
        let (mesh, water) = island();
        let raw = assign_raw_elevation(&assign_coast_distance(&mesh, &water));
        let a = assign_downslope(&mesh, &raw, &mut RandInt::new(11));
        let b = assign_downslope(&mesh, &raw, &mut RandInt::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_redistribution_preserves_order() {
        let (mesh, water) = island();
        let raw = assign_raw_elevation(&assign_coast_distance(&mesh, &water));
        let elevation = redistribute_elevation(&mesh, &raw);

        for a in 0..mesh.num_solid_triangles() {
            assert!((0.0..1.0).contains(&elevation[a]));
            if raw[a] == 0.0 {
                assert_eq!(elevation[a], 0.0);
            }
            for b in 0..mesh.num_solid_triangles() {
                if raw[a] > 0.0 && raw[a] < raw[b] {
                    assert!(elevation[a] < elevation[b]);
                }
            }
        }
    }

    #[test]
    fn test_region_elevation_is_mean() {
        let (mesh, water) = island();
        let raw = assign_raw_elevation(&assign_coast_distance(&mesh, &water));
        let elevation = redistribute_elevation(&mesh, &raw);
        let region = assign_region_elevation(&mesh, &elevation);

        assert_eq!(region.len(), mesh.num_regions());
        assert_eq!(region[mesh.ghost_region()], 0.0);
        // Centre of the 9x9 grid
        let centre = 4 * 9 + 4;
        let triangles: Vec<usize> = mesh.circulate_triangles(centre).collect();
        let mean = triangles.iter().map(|&t| elevation[t]).sum::<f64>() / triangles.len() as f64;
        assert!((region[centre] - mean).abs() < 1e-12);
        assert!(region[centre] > 0.0);
        assert!(region.iter().all(|&e| (0.0..=1.0).contains(&e)));
    }
}
