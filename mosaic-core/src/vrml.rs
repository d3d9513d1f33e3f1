//! VRML 2.0 indexed-face-set serialization.
//!
//! One `Shape` block per primitive (triangle or cell polygon), each with its
//! own coordinate list and a `coordIndex` of local 0-based indices closed by
//! the `-1` sentinel. Inputs are numeric, so no escaping is needed.

use std::fmt::Write;

use crate::{Point, Rgb, FALLBACK_GRAY};

/// Fixed VRML 2.0 header line
pub const VRML_HEADER: &str = "#VRML V2.0 utf8";

/// z-coordinate convention for exported vertices.
///
/// The two modes correspond to the two conventions the tool has shipped
/// with; neither is canonical, so both are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZMode {
    /// Every vertex at z = 0
    Flat,
    /// z carries the owning cell's averaged color intensity, (r+g+b)/3
    ColorIntensity,
}

fn intensity(color: Rgb) -> f64 {
    ((color[0] as u32 + color[1] as u32 + color[2] as u32) / 3) as f64
}

/// z for a vertex owned by cell `index`
fn vertex_z(z_mode: ZMode, colors: &[Rgb], index: usize) -> f64 {
    match z_mode {
        ZMode::Flat => 0.0,
        ZMode::ColorIntensity => {
            intensity(colors.get(index).copied().unwrap_or(FALLBACK_GRAY))
        }
    }
}

/// Append one shape block for a primitive's vertices, with local indices.
fn push_shape(out: &mut String, vertices: &[(f64, f64, f64)]) {
    out.push_str("Shape {\n  geometry IndexedFaceSet {\n    coord Coordinate {\n      point [\n");
    for &(x, y, z) in vertices {
        let _ = writeln!(out, "        {} {} {},", x, y, z);
    }
    out.push_str("      ]\n    }\n    coordIndex [\n      ");
    for i in 0..vertices.len() {
        let _ = write!(out, "{}, ", i);
    }
    out.push_str("-1\n    ]\n  }\n}\n");
}

/// Serialize the Delaunay triangle list, one shape per triangle.
///
/// Triangle entries index `points`; in `ColorIntensity` mode each vertex
/// takes the intensity of the cell owned by its point.
pub fn delaunay_scene(
    points: &[Point],
    triangles: &[usize],
    colors: &[Rgb],
    z_mode: ZMode,
) -> String {
    let mut out = String::from(VRML_HEADER);
    out.push('\n');

    for tri in triangles.chunks_exact(3) {
        let vertices: Vec<(f64, f64, f64)> = tri
            .iter()
            .map(|&i| (points[i].x, points[i].y, vertex_z(z_mode, colors, i)))
            .collect();
        push_shape(&mut out, &vertices);
    }

    out
}

/// Serialize the Voronoi cell polygons, one shape per cell. Degenerate
/// cells are skipped.
pub fn voronoi_scene(cells: &[Option<Vec<Point>>], colors: &[Rgb], z_mode: ZMode) -> String {
    let mut out = String::from(VRML_HEADER);
    out.push('\n');

    for (index, cell) in cells.iter().enumerate() {
        let Some(polygon) = cell else { continue };
        let z = vertex_z(z_mode, colors, index);
        let vertices: Vec<(f64, f64, f64)> =
            polygon.iter().map(|p| (p.x, p.y, z)).collect();
        push_shape(&mut out, &vertices);
    }

    out
}
