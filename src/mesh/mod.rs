//! Dual mesh over regions, triangles and directed sides
//!
//! Regions are the points of a planar triangulation (the cells of its dual),
//! triangles are its faces and sides are directed half-edges, three per
//! triangle. Side `s` belongs to triangle `s / 3` and runs from
//! `side_begin_region(s)` to `side_end_region(s)`; its opposite runs the other
//! way in the neighbouring triangle.
//!
//! The hull of the triangulation is closed off with one ghost region placed
//! outside the map and a ring of ghost triangles, so every side has an
//! opposite and circulation around any region, including the ghost, forms a
//! closed loop. Solid entities come first in every index space; the ghost
//! region is the last region and ghost triangles/sides follow the solid ones.

pub mod builder;

pub use builder::{jittered_grid, MeshBuilder, MeshOptions, Triangulation};

/// Immutable dual mesh. Built once by [`MeshBuilder`], read by every stage.
#[derive(Clone, Debug)]
pub struct DualMesh {
    points: Vec<[f64; 2]>,
    triangle_centers: Vec<[f64; 2]>,
    side_begin: Vec<usize>,
    side_opposite: Vec<usize>,
    region_in_side: Vec<usize>,
    boundary: Vec<bool>,
    num_solid_sides: usize,
    width: f64,
    height: f64,
}

impl DualMesh {
    pub(crate) fn from_parts(
        points: Vec<[f64; 2]>,
        side_begin: Vec<usize>,
        side_opposite: Vec<usize>,
        boundary: Vec<bool>,
        num_solid_sides: usize,
        width: f64,
        height: f64,
    ) -> Self {
        let num_regions = points.len();
        let mut region_in_side = vec![usize::MAX; num_regions];
        for s in 0..side_begin.len() {
            let endpoint = side_begin[next_side(s)];
            if region_in_side[endpoint] == usize::MAX {
                region_in_side[endpoint] = s;
            }
        }

        let num_triangles = side_begin.len() / 3;
        let mut triangle_centers = Vec::with_capacity(num_triangles);
        for t in 0..num_triangles {
            let s = 3 * t;
            if s < num_solid_sides {
                let [a, b, c] = [side_begin[s], side_begin[s + 1], side_begin[s + 2]];
                triangle_centers.push([
                    (points[a][0] + points[b][0] + points[c][0]) / 3.0,
                    (points[a][1] + points[b][1] + points[c][1]) / 3.0,
                ]);
            } else {
                // Ghost triangle: the first two corners are the hull edge
                let [a, b] = [side_begin[s], side_begin[s + 1]];
                triangle_centers.push([
                    (points[a][0] + points[b][0]) / 2.0,
                    (points[a][1] + points[b][1]) / 2.0,
                ]);
            }
        }

        Self {
            points,
            triangle_centers,
            side_begin,
            side_opposite,
            region_in_side,
            boundary,
            num_solid_sides,
            width,
            height,
        }
    }

    pub fn num_regions(&self) -> usize {
        self.points.len()
    }

    /// Regions excluding the ghost region.
    pub fn num_solid_regions(&self) -> usize {
        self.points.len() - 1
    }

    pub fn num_triangles(&self) -> usize {
        self.side_begin.len() / 3
    }

    pub fn num_solid_triangles(&self) -> usize {
        self.num_solid_sides / 3
    }

    pub fn num_sides(&self) -> usize {
        self.side_begin.len()
    }

    pub fn num_solid_sides(&self) -> usize {
        self.num_solid_sides
    }

    /// Width of the map coordinate space (x runs from 0 to width).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the map coordinate space (y runs from 0 at the north edge to height).
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ghost_region(&self) -> usize {
        self.points.len() - 1
    }

    pub fn is_ghost_region(&self, r: usize) -> bool {
        r == self.ghost_region()
    }

    /// True for the regions on the hull of the triangulation.
    pub fn is_boundary_region(&self, r: usize) -> bool {
        self.boundary[r]
    }

    pub fn is_ghost_side(&self, s: usize) -> bool {
        s >= self.num_solid_sides
    }

    pub fn is_ghost_triangle(&self, t: usize) -> bool {
        self.is_ghost_side(3 * t)
    }

    pub fn region_x(&self, r: usize) -> f64 {
        self.points[r][0]
    }

    pub fn region_y(&self, r: usize) -> f64 {
        self.points[r][1]
    }

    pub fn region_position(&self, r: usize) -> [f64; 2] {
        self.points[r]
    }

    /// Centroid of a solid triangle, or the hull edge midpoint for a ghost triangle.
    pub fn triangle_center(&self, t: usize) -> [f64; 2] {
        self.triangle_centers[t]
    }

    pub fn side_begin_region(&self, s: usize) -> usize {
        self.side_begin[s]
    }

    pub fn side_end_region(&self, s: usize) -> usize {
        self.side_begin[next_side(s)]
    }

    pub fn side_opposite(&self, s: usize) -> usize {
        self.side_opposite[s]
    }

    /// Triangle the side belongs to.
    pub fn side_inner_triangle(&self, s: usize) -> usize {
        s / 3
    }

    /// Triangle on the other side of the edge.
    pub fn side_outer_triangle(&self, s: usize) -> usize {
        self.side_opposite[s] / 3
    }

    pub fn triangle_sides(&self, t: usize) -> [usize; 3] {
        [3 * t, 3 * t + 1, 3 * t + 2]
    }

    pub fn triangle_regions(&self, t: usize) -> [usize; 3] {
        [
            self.side_begin[3 * t],
            self.side_begin[3 * t + 1],
            self.side_begin[3 * t + 2],
        ]
    }

    /// The three triangles sharing an edge with `t`, in side order.
    pub fn triangle_neighbors(&self, t: usize) -> [usize; 3] {
        [
            self.side_outer_triangle(3 * t),
            self.side_outer_triangle(3 * t + 1),
            self.side_outer_triangle(3 * t + 2),
        ]
    }

    /// Sides ending at `r`, in circulation order.
    pub fn circulate_sides(&self, r: usize) -> SideCirculator<'_> {
        let start = self.region_in_side[r];
        SideCirculator {
            mesh: self,
            start,
            current: Some(start),
        }
    }

    /// Neighbouring regions of `r`, in circulation order.
    pub fn circulate_regions(&self, r: usize) -> impl Iterator<Item = usize> + '_ {
        self.circulate_sides(r).map(move |s| self.side_begin[s])
    }

    /// Triangles touching `r`, in circulation order.
    pub fn circulate_triangles(&self, r: usize) -> impl Iterator<Item = usize> + '_ {
        self.circulate_sides(r).map(|s| s / 3)
    }

    /// Ordered ring of neighbouring regions as a vector.
    pub fn regions_around_region(&self, r: usize) -> Vec<usize> {
        self.circulate_regions(r).collect()
    }
}

/// Side `s`'s successor within its triangle.
pub fn next_side(s: usize) -> usize {
    if s % 3 == 2 {
        s - 2
    } else {
        s + 1
    }
}

/// Walks the sides ending at one region.
pub struct SideCirculator<'a> {
    mesh: &'a DualMesh,
    start: usize,
    current: Option<usize>,
}

impl Iterator for SideCirculator<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let incoming = self.current?;
        let outgoing = next_side(incoming);
        let following = self.mesh.side_opposite[outgoing];
        self.current = if following == self.start {
            None
        } else {
            Some(following)
        };
        Some(incoming)
    }
}
