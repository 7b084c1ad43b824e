//! River sources and flow accumulation
//!
//! Springs are ridge triangles: inland, able to drain, and not drained into
//! by any neighbour. A shuffled prefix of them becomes the rivers, which are
//! traced down the drainage pointers adding one unit of flow to every side
//! they cross.

use crate::mesh::DualMesh;
use crate::random::{random_shuffle, RandInt};

/// Elevation band springs are taken from.
pub const MIN_SPRING_ELEVATION: f64 = 0.3;
pub const MAX_SPRING_ELEVATION: f64 = 0.9;

/// Number of triangles draining directly into each triangle.
pub fn drainage_in_degree(mesh: &DualMesh, downslope: &[Option<usize>]) -> Vec<u32> {
    let mut in_degree = vec![0u32; mesh.num_triangles()];
    for s in downslope.iter().flatten() {
        in_degree[mesh.side_outer_triangle(*s)] += 1;
    }
    in_degree
}

/// Spring candidates in triangle order.
pub fn find_springs(
    mesh: &DualMesh,
    water: &[bool],
    elevation: &[f64],
    downslope: &[Option<usize>],
) -> Vec<usize> {
    let in_degree = drainage_in_degree(mesh, downslope);
    (0..mesh.num_solid_triangles())
        .filter(|&t| {
            mesh.triangle_regions(t).iter().all(|&r| !water[r])
                && downslope[t].is_some()
                && in_degree[t] == 0
                && (MIN_SPRING_ELEVATION..=MAX_SPRING_ELEVATION).contains(&elevation[t])
        })
        .collect()
}

/// Shuffle the springs in place and return the first `num_rivers` of them.
pub fn choose_rivers(springs: &mut [usize], num_rivers: usize, rand_int: &mut RandInt) -> Vec<usize> {
    random_shuffle(springs, rand_int);
    springs[..num_rivers.min(springs.len())].to_vec()
}

/// Flow per side: the number of rivers crossing it.
pub fn assign_flow(mesh: &DualMesh, downslope: &[Option<usize>], rivers: &[usize]) -> Vec<u32> {
    let mut flow = vec![0u32; mesh.num_sides()];
    for &source in rivers {
        let mut t = source;
        let mut steps = 0;
        while let Some(s) = downslope[t] {
            flow[s] += 1;
            let next = mesh.side_outer_triangle(s);
            if next == t || mesh.is_ghost_triangle(next) {
                break;
            }
            steps += 1;
            assert!(
                steps <= mesh.num_triangles(),
                "drainage from triangle {} does not terminate",
                source
            );
            t = next;
        }
    }
    flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::{assign_coast_distance, assign_downslope, assign_raw_elevation, redistribute_elevation};
    use crate::mesh::{MeshBuilder, MeshOptions, Triangulation};

    struct Drainage {
        mesh: DualMesh,
        water: Vec<bool>,
        elevation: Vec<f64>,
        downslope: Vec<Option<usize>>,
    }

    fn drainage() -> Drainage {
        let mesh = MeshBuilder::from_options(&MeshOptions {
            width: 1000.0,
            height: 1000.0,
            spacing: 50.0,
            jitter: 0.2,
            seed: 8,
        })
        .unwrap();
        let water: Vec<bool> = (0..mesh.num_regions())
            .map(|r| mesh.is_boundary_region(r) || mesh.is_ghost_region(r))
            .collect();
        let raw = assign_raw_elevation(&assign_coast_distance(&mesh, &water));
        let downslope = assign_downslope(&mesh, &raw, &mut RandInt::new(1));
        let elevation = redistribute_elevation(&mesh, &raw);
        Drainage { mesh, water, elevation, downslope }
    }

    /// Sides crossed by one river, in order.
    fn river_path(d: &Drainage, source: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut t = source;
        while let Some(s) = d.downslope[t] {
            path.push(s);
            t = d.mesh.side_outer_triangle(s);
            if d.mesh.is_ghost_triangle(t) {
                break;
            }
        }
        path
    }

    #[test]
    fn test_springs_are_ridges() {
        let d = drainage();
        let springs = find_springs(&d.mesh, &d.water, &d.elevation, &d.downslope);
        assert!(!springs.is_empty());

        let in_degree = drainage_in_degree(&d.mesh, &d.downslope);
        for &t in &springs {
            assert!(!d.mesh.is_ghost_triangle(t));
            assert!(d.downslope[t].is_some());
            assert_eq!(in_degree[t], 0);
            assert!(d.elevation[t] >= MIN_SPRING_ELEVATION && d.elevation[t] <= MAX_SPRING_ELEVATION);
        }
    }

    #[test]
    fn test_choose_rivers_prefix_of_shuffle() {
        let springs: Vec<usize> = (100..140).collect();
        let mut first = springs.clone();
        let mut second = springs.clone();
        let a = choose_rivers(&mut first, 10, &mut RandInt::new(4));
        let b = choose_rivers(&mut second, 10, &mut RandInt::new(4));
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
        assert_eq!(a[..], first[..10]);
        assert!(a.iter().all(|t| springs.contains(t)));

        let all = choose_rivers(&mut springs.clone(), 100, &mut RandInt::new(4));
        assert_eq!(all.len(), springs.len());
    }

    #[test]
    fn test_flow_counts_rivers_per_side() {
        let d = drainage();
        let mut springs = find_springs(&d.mesh, &d.water, &d.elevation, &d.downslope);
        let rivers = choose_rivers(&mut springs, 25, &mut RandInt::new(2));
        let flow = assign_flow(&d.mesh, &d.downslope, &rivers);
        assert_eq!(flow.len(), d.mesh.num_sides());

        let mut expected = vec![0u32; d.mesh.num_sides()];
        for &t in &rivers {
            for s in river_path(&d, t) {
                expected[s] += 1;
            }
        }
        assert_eq!(flow, expected);
        assert!(flow.iter().sum::<u32>() > 0);
    }

    #[test]
    fn test_merging_rivers_accumulate() {
        let d = drainage();
        let springs = find_springs(&d.mesh, &d.water, &d.elevation, &d.downslope);
        let flow = assign_flow(&d.mesh, &d.downslope, &springs);

        for &t in &springs {
            let single = assign_flow(&d.mesh, &d.downslope, &[t]);
            for s in 0..flow.len() {
                assert!(flow[s] >= single[s]);
            }
        }
    }

    #[test]
    fn test_rivers_end_on_the_coast() {
        let d = drainage();
        let springs = find_springs(&d.mesh, &d.water, &d.elevation, &d.downslope);
        for &t in &springs {
            let path = river_path(&d, t);
            let last = d.mesh.side_outer_triangle(*path.last().unwrap());
            assert_eq!(d.elevation[last], 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "does not terminate")]
    fn test_cyclic_drainage_panics() {
        let mesh = MeshBuilder::new(10.0, 10.0)
            .build(Triangulation {
                points: vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [10.0, 10.0]],
                triangles: vec![0, 1, 3, 0, 3, 2],
            })
            .unwrap();
        // The two solid triangles drain into each other across the diagonal
        let mut downslope = vec![None; mesh.num_triangles()];
        downslope[0] = (0..3).find(|&s| mesh.side_outer_triangle(s) == 1);
        downslope[1] = (3..6).find(|&s| mesh.side_outer_triangle(s) == 0);
        assert!(downslope[0].is_some() && downslope[1].is_some());

        assign_flow(&mesh, &downslope, &[0]);
    }
}
