//! Moisture from fresh water
//!
//! Riverbanks and lakeshores are the wettest land. Moisture falls off with
//! the number of region steps to the nearest of them, measured over land
//! only, and is then spread evenly across the configured range by rank.

use std::collections::{BTreeSet, VecDeque};

use crate::mesh::DualMesh;

/// Regions on either side of a side carrying river flow.
pub fn find_riverbanks(mesh: &DualMesh, flow: &[u32]) -> BTreeSet<usize> {
    let mut banks = BTreeSet::new();
    for s in 0..mesh.num_solid_sides() {
        if flow[s] > 0 {
            banks.insert(mesh.side_begin_region(s));
            banks.insert(mesh.side_end_region(s));
        }
    }
    banks
}

/// Lake regions and the regions next to them.
pub fn find_lakeshores(mesh: &DualMesh, ocean: &[bool], water: &[bool]) -> BTreeSet<usize> {
    let mut shores = BTreeSet::new();
    for s in 0..mesh.num_solid_sides() {
        let begin = mesh.side_begin_region(s);
        if water[begin] && !ocean[begin] {
            shores.insert(begin);
            shores.insert(mesh.side_end_region(s));
        }
    }
    shores
}

/// Riverbanks and lakeshores together.
pub fn find_moisture_seeds(mesh: &DualMesh, flow: &[u32], ocean: &[bool], water: &[bool]) -> BTreeSet<usize> {
    let mut seeds = find_riverbanks(mesh, flow);
    seeds.extend(find_lakeshores(mesh, ocean, water));
    seeds
}

/// Distance to fresh water over land, and the moisture derived from it.
///
/// Returns `(moisture, water_distance)`. Water regions have moisture 1.0.
/// Land that cannot reach any seed counts as being at the largest distance.
pub fn assign_moisture(mesh: &DualMesh, water: &[bool], seeds: &BTreeSet<usize>) -> (Vec<f64>, Vec<Option<u32>>) {
    let mut water_distance: Vec<Option<u32>> = vec![None; mesh.num_regions()];
    let mut queue: VecDeque<usize> = seeds.iter().copied().collect();
    for &r in seeds {
        water_distance[r] = Some(0);
    }

    let mut max_distance = 1;
    while let Some(current) = queue.pop_front() {
        let Some(current_distance) = water_distance[current] else {
            panic!("region {} entered the moisture frontier without a distance", current);
        };
        for neighbor in mesh.circulate_regions(current) {
            if !water[neighbor] && water_distance[neighbor].is_none() {
                let distance = current_distance + 1;
                water_distance[neighbor] = Some(distance);
                max_distance = max_distance.max(distance);
                queue.push_back(neighbor);
            }
        }
    }

    let moisture = (0..mesh.num_regions())
        .map(|r| {
            if water[r] {
                1.0
            } else {
                let d = water_distance[r].unwrap_or(max_distance);
                1.0 - (d as f64 / max_distance as f64).sqrt()
            }
        })
        .collect();

    (moisture, water_distance)
}

/// Spread land moisture evenly over `[min_moisture, max_moisture]` by rank.
/// Ties keep their index order; water regions are left unchanged.
pub fn redistribute_moisture(
    mesh: &DualMesh,
    water: &[bool],
    moisture: &[f64],
    min_moisture: f64,
    max_moisture: f64,
) -> Vec<f64> {
    let mut land: Vec<usize> = (0..mesh.num_solid_regions()).filter(|&r| !water[r]).collect();
    land.sort_by(|&a, &b| moisture[a].total_cmp(&moisture[b]));

    let mut redistributed = moisture.to_vec();
    let steps = land.len().saturating_sub(1).max(1) as f64;
    for (rank, &r) in land.iter().enumerate() {
        redistributed[r] = min_moisture + (max_moisture - min_moisture) * rank as f64 / steps;
    }
    redistributed
}
