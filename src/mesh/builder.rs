//! Mesh construction from a point set and its triangulation
//!
//! [`MeshBuilder`] accepts any [`Triangulation`] whose triangles are wound
//! consistently and whose hull is a single closed loop. It pairs half-edges,
//! marks hull points as boundary regions and closes the hull with the ghost
//! region and ghost triangles.
//!
//! [`jittered_grid`] is the point field shipped with the crate: a regular
//! grid with a straight outer ring and randomly displaced interior points,
//! triangulated two triangles per cell.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{next_side, DualMesh};
use crate::error::{ConfigError, MapError, MeshError};

const NONE: usize = usize::MAX;

/// Largest interior displacement as a fraction of the cell size. Keeps every
/// triangle of the grid triangulation positively oriented.
const MAX_JITTER: f64 = 0.2;

/// Raw triangulation: point coordinates plus three point indices per triangle.
#[derive(Clone, Debug, Default)]
pub struct Triangulation {
    pub points: Vec<[f64; 2]>,
    pub triangles: Vec<usize>,
}

/// Point field parameters for [`jittered_grid`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Map width in map units
    pub width: f64,
    /// Map height in map units
    pub height: f64,
    /// Approximate distance between neighbouring points
    pub spacing: f64,
    /// Interior displacement as a fraction of the cell size (clamped to 0.2)
    pub jitter: f64,
    /// Seed for the displacement
    pub seed: u64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            spacing: 32.0,
            jitter: 0.2,
            seed: 0,
        }
    }
}

/// Generate a jittered grid of points covering `[0, width] x [0, height]`.
pub fn jittered_grid(options: &MeshOptions) -> Result<Triangulation, ConfigError> {
    if !(options.spacing.is_finite() && options.spacing > 0.0) {
        return Err(ConfigError::BadSpacing(options.spacing));
    }
    for (name, value) in [("mesh.width", options.width), ("mesh.height", options.height)] {
        if !value.is_finite() {
            return Err(ConfigError::NotFinite { name, value });
        }
    }

    let cols = ((options.width / options.spacing).round() as usize).max(2) + 1;
    let rows = ((options.height / options.spacing).round() as usize).max(2) + 1;
    let dx = options.width / (cols - 1) as f64;
    let dy = options.height / (rows - 1) as f64;
    let jitter = options.jitter.clamp(0.0, MAX_JITTER);

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut points = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            let mut x = i as f64 * dx;
            let mut y = j as f64 * dy;
            let on_ring = i == 0 || j == 0 || i == cols - 1 || j == rows - 1;
            if !on_ring && jitter > 0.0 {
                x += rng.gen_range(-jitter..=jitter) * dx;
                y += rng.gen_range(-jitter..=jitter) * dy;
            }
            points.push([x, y]);
        }
    }

    let mut triangles = Vec::with_capacity((cols - 1) * (rows - 1) * 6);
    for j in 0..rows - 1 {
        for i in 0..cols - 1 {
            let a = j * cols + i;
            let b = a + 1;
            let c = a + cols;
            let d = c + 1;
            triangles.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }

    Ok(Triangulation { points, triangles })
}

/// Builds a [`DualMesh`] for a map of the given extent.
#[derive(Clone, Debug)]
pub struct MeshBuilder {
    width: f64,
    height: f64,
}

impl MeshBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Jittered grid followed by [`MeshBuilder::build`].
    pub fn from_options(options: &MeshOptions) -> Result<DualMesh, MapError> {
        let triangulation = jittered_grid(options)?;
        let mesh = MeshBuilder::new(options.width, options.height).build(triangulation)?;
        log::debug!(
            "Built mesh: {} regions, {} triangles, {} sides",
            mesh.num_regions(),
            mesh.num_triangles(),
            mesh.num_sides()
        );
        Ok(mesh)
    }

    pub fn build(&self, triangulation: Triangulation) -> Result<DualMesh, MeshError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(MeshError::BadExtent {
                width: self.width,
                height: self.height,
            });
        }
        let Triangulation { mut points, triangles } = triangulation;
        let num_points = points.len();
        if num_points < 3 {
            return Err(MeshError::TooFewPoints(num_points));
        }
        if triangles.is_empty() || triangles.len() % 3 != 0 {
            return Err(MeshError::BadTriangleList(triangles.len()));
        }
        validate_triangles(&points, &triangles)?;

        let num_solid_sides = triangles.len();
        let mut opposite = pair_half_edges(&triangles)?;
        let hull = walk_hull(&triangles, &opposite, num_points)?;

        let mut boundary = vec![false; num_points + 1];
        for &s in &hull {
            boundary[triangles[s]] = true;
        }

        // Close the hull: one ghost triangle (end, begin, ghost) per hull side
        let ghost = num_points;
        let num_hull = hull.len();
        let mut side_begin = triangles;
        side_begin.resize(num_solid_sides + 3 * num_hull, NONE);
        opposite.resize(num_solid_sides + 3 * num_hull, NONE);
        for (i, &s) in hull.iter().enumerate() {
            let ghost_side = num_solid_sides + 3 * i;
            opposite[s] = ghost_side;
            opposite[ghost_side] = s;
            side_begin[ghost_side] = side_begin[next_side(s)];
            side_begin[ghost_side + 1] = side_begin[s];
            side_begin[ghost_side + 2] = ghost;
            let k = num_solid_sides + (3 * i + 4) % (3 * num_hull);
            opposite[ghost_side + 2] = k;
            opposite[k] = ghost_side + 2;
        }

        points.push([self.width / 2.0, self.height / 2.0]);

        Ok(DualMesh::from_parts(
            points,
            side_begin,
            opposite,
            boundary,
            num_solid_sides,
            self.width,
            self.height,
        ))
    }
}

fn signed_area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn validate_triangles(points: &[[f64; 2]], triangles: &[usize]) -> Result<(), MeshError> {
    let mut winding = 0.0f64;
    let mut used = vec![false; points.len()];
    for (t, corners) in triangles.chunks_exact(3).enumerate() {
        for &point in corners {
            if point >= points.len() {
                return Err(MeshError::PointOutOfRange {
                    triangle: t,
                    point,
                    num_points: points.len(),
                });
            }
            used[point] = true;
        }
        let (a, b, c) = (corners[0], corners[1], corners[2]);
        if a == b || b == c || a == c {
            return Err(MeshError::DegenerateTriangle(t));
        }
        let area = signed_area(points[a], points[b], points[c]);
        if area == 0.0 || !area.is_finite() {
            return Err(MeshError::DegenerateTriangle(t));
        }
        if winding == 0.0 {
            winding = area.signum();
        } else if area.signum() != winding {
            return Err(MeshError::InconsistentWinding(t));
        }
    }
    if let Some(point) = used.iter().position(|&u| !u) {
        return Err(MeshError::UnusedPoint(point));
    }
    Ok(())
}

/// Opposite side for every side, `NONE` on the hull.
fn pair_half_edges(triangles: &[usize]) -> Result<Vec<usize>, MeshError> {
    let mut edges: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len());
    for s in 0..triangles.len() {
        let key = (triangles[s], triangles[next_side(s)]);
        if edges.insert(key, s).is_some() {
            return Err(MeshError::NonManifold {
                begin: key.0,
                end: key.1,
            });
        }
    }

    let mut opposite = vec![NONE; triangles.len()];
    for s in 0..triangles.len() {
        let reversed = (triangles[next_side(s)], triangles[s]);
        if let Some(&o) = edges.get(&reversed) {
            opposite[s] = o;
        }
    }
    Ok(opposite)
}

/// Unpaired sides in hull order, each one starting where the previous ended.
fn walk_hull(triangles: &[usize], opposite: &[usize], num_points: usize) -> Result<Vec<usize>, MeshError> {
    let mut outgoing = vec![NONE; num_points];
    let mut count = 0;
    let mut first = NONE;
    for s in 0..triangles.len() {
        if opposite[s] != NONE {
            continue;
        }
        if outgoing[triangles[s]] != NONE {
            return Err(MeshError::BrokenHull("point with two hull sides"));
        }
        outgoing[triangles[s]] = s;
        count += 1;
        if first == NONE {
            first = s;
        }
    }
    if count < 3 {
        return Err(MeshError::BrokenHull("fewer than 3 hull sides"));
    }

    let mut hull = Vec::with_capacity(count);
    let mut s = first;
    for i in 0..count {
        if i > 0 && s == first {
            return Err(MeshError::BrokenHull("more than one hull loop"));
        }
        hull.push(s);
        let end = triangles[next_side(s)];
        s = outgoing[end];
        if s == NONE {
            return Err(MeshError::BrokenHull("hull loop does not close"));
        }
    }
    if s != first {
        return Err(MeshError::BrokenHull("hull loop does not close"));
    }
    Ok(hull)
}
