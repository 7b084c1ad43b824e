//! Map export: biome raster and JSON dump of the derived arrays

use std::fs::File;
use std::io::BufWriter;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::island::{IslandMap, RegionData, SideData, TriangleData};

const RIVER_COLOR: [u8; 3] = [34, 85, 136];

/// Render the biome map with rivers. The longer map side becomes `size` pixels.
pub fn render_biome_map(map: &IslandMap, size: u32) -> RgbImage {
    let mesh = map.mesh();
    let scale = size as f64 / mesh.width().max(mesh.height());
    let width = ((mesh.width() * scale).round() as u32).max(1);
    let height = ((mesh.height() * scale).round() as u32).max(1);
    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb([0, 0, 0]));

    let to_pixel = |p: [f64; 2]| [p[0] * scale, p[1] * scale];

    // Each side contributes the wedge of its begin region's cell between the
    // centres of the two triangles it separates
    let biomes = &map.regions().biome;
    for s in 0..mesh.num_sides() {
        let r = mesh.side_begin_region(s);
        if mesh.is_ghost_region(r) {
            continue;
        }
        let (red, green, blue) = biomes[r].color();
        fill_triangle(
            &mut img,
            to_pixel(mesh.region_position(r)),
            to_pixel(mesh.triangle_center(mesh.side_inner_triangle(s))),
            to_pixel(mesh.triangle_center(mesh.side_outer_triangle(s))),
            [red, green, blue],
        );
    }

    let flow = &map.sides().flow;
    for s in 0..mesh.num_solid_sides() {
        if flow[s] == 0 {
            continue;
        }
        let thickness = (flow[s] as f64).sqrt() * scale * 1.5;
        draw_line(
            &mut img,
            to_pixel(mesh.triangle_center(mesh.side_inner_triangle(s))),
            to_pixel(mesh.triangle_center(mesh.side_outer_triangle(s))),
            thickness.max(1.0),
            RIVER_COLOR,
        );
    }

    img
}

/// Save the biome map as PNG.
pub fn export_biome_map(map: &IslandMap, size: u32, path: &str) -> Result<(), image::ImageError> {
    render_biome_map(map, size).save(path)
}

fn edge(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Fill pixels whose centres lie inside the triangle, either winding.
fn fill_triangle(img: &mut RgbImage, a: [f64; 2], b: [f64; 2], c: [f64; 2], color: [u8; 3]) {
    let area = edge(a, b, c);
    if area == 0.0 {
        return;
    }
    let sign = area.signum();
    let min_x = a[0].min(b[0]).min(c[0]).floor().max(0.0) as u32;
    let min_y = a[1].min(b[1]).min(c[1]).floor().max(0.0) as u32;
    let max_x = (a[0].max(b[0]).max(c[0]).ceil() as u32).min(img.width());
    let max_y = (a[1].max(b[1]).max(c[1]).ceil() as u32).min(img.height());

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = [x as f64 + 0.5, y as f64 + 0.5];
            if edge(a, b, p) * sign >= 0.0 && edge(b, c, p) * sign >= 0.0 && edge(c, a, p) * sign >= 0.0 {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

fn draw_line(img: &mut RgbImage, a: [f64; 2], b: [f64; 2], thickness: f64, color: [u8; 3]) {
    let length = ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt();
    let steps = length.ceil().max(1.0) as usize;
    let radius = (thickness / 2.0).max(0.5);
    let r = radius.ceil() as i64;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let cx = a[0] + (b[0] - a[0]) * t;
        let cy = a[1] + (b[1] - a[1]) * t;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f64) > radius * radius {
                    continue;
                }
                let x = cx.floor() as i64 + dx;
                let y = cy.floor() as i64 + dy;
                if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                    img.put_pixel(x as u32, y as u32, Rgb(color));
                }
            }
        }
    }
}

#[derive(serde::Serialize)]
struct MapDump<'a> {
    width: f64,
    height: f64,
    ghost_region: usize,
    region_positions: Vec<[f64; 2]>,
    regions: &'a RegionData,
    triangles: &'a TriangleData,
    sides: &'a SideData,
    springs: &'a [usize],
    rivers: &'a [usize],
}

/// Write every derived array, plus region positions, as JSON.
pub fn export_json(map: &IslandMap, path: &str) -> std::io::Result<()> {
    let mesh = map.mesh();
    let dump = MapDump {
        width: mesh.width(),
        height: mesh.height(),
        ghost_region: mesh.ghost_region(),
        region_positions: (0..mesh.num_regions()).map(|r| mesh.region_position(r)).collect(),
        regions: map.regions(),
        triangles: map.triangles(),
        sides: map.sides(),
        springs: map.springs(),
        rivers: map.rivers(),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &dump)?;
    Ok(())
}
