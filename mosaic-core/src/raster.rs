//! Raster render passes over the subdivision geometry.
//!
//! Two passes share the same geometry: the mosaic pass flat-fills each cell
//! with its averaged color and outlines it, the overlay passes redraw the
//! base image and stroke edges only. Interiors use an even-odd scanline
//! fill; segments use an integer Bresenham walk. Neither pass anti-aliases,
//! and later strokes may overdraw earlier ones at shared edges.

use image::{Rgb as RgbPixel, RgbImage, RgbaImage};

use crate::{Point, Rgb, Subdivision};

/// Outline color for mosaic cell boundaries
pub const OUTLINE_COLOR: Rgb = [0, 0, 0];
/// Stroke color for the Delaunay edge overlay
pub const DELAUNAY_COLOR: Rgb = [255, 0, 0];
/// Stroke color for the Voronoi edge overlay
pub const VORONOI_COLOR: Rgb = [0, 0, 255];
/// Site marker color
pub const MARKER_COLOR: Rgb = [255, 0, 0];

/// Flatten the RGBA source snapshot into a fresh RGB render target.
pub fn base_image(pixels: &RgbaImage) -> RgbImage {
    let (width, height) = pixels.dimensions();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for pixel in pixels.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
    }
    RgbImage::from_raw(width, height, rgb).expect("buffer size mismatch in base_image")
}

/// Render the filled mosaic onto `target`: each cell painted with its
/// averaged color, then outlined, in site order. Sites without a polygon
/// are skipped.
pub fn render_mosaic(subdivision: &Subdivision, colors: &[Rgb], target: &mut RgbImage) {
    for (cell, &color) in subdivision.cells.iter().zip(colors) {
        let Some(polygon) = cell else { continue };
        fill_polygon(polygon, color, target);
        stroke_polygon(polygon, OUTLINE_COLOR, target);
    }
}

/// Edge-only overlay: the base image with every Delaunay triangle edge
/// stroked over it.
pub fn render_delaunay_overlay(
    subdivision: &Subdivision,
    points: &[Point],
    pixels: &RgbaImage,
) -> RgbImage {
    let mut target = base_image(pixels);
    for tri in subdivision.triangles.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            stroke_segment(points[a], points[b], DELAUNAY_COLOR, &mut target);
        }
    }
    target
}

/// Edge-only overlay: the base image with every Voronoi cell boundary
/// stroked over it.
pub fn render_voronoi_overlay(subdivision: &Subdivision, pixels: &RgbaImage) -> RgbImage {
    let mut target = base_image(pixels);
    for polygon in subdivision.cells.iter().flatten() {
        stroke_polygon(polygon, VORONOI_COLOR, &mut target);
    }
    target
}

/// Draw a 3x3 marker dot at each point position.
pub fn draw_site_markers(target: &mut RgbImage, points: &[Point]) {
    let (w, h) = (target.width() as i64, target.height() as i64);
    for point in points {
        let cx = point.x as i64;
        let cy = point.y as i64;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && px < w && py >= 0 && py < h {
                    target.put_pixel(px as u32, py as u32, RgbPixel(MARKER_COLOR));
                }
            }
        }
    }
}

/// Even-odd scanline fill. Pixels whose center falls inside the polygon are
/// painted; crossings are computed at y + 0.5 with half-open vertex handling
/// so shared vertices count once.
fn fill_polygon(polygon: &[Point], color: Rgb, target: &mut RgbImage) {
    if polygon.len() < 3 {
        return;
    }
    let width = target.width() as i64;
    let height = target.height() as i64;

    let y_min = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_max = polygon.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let y_start = (y_min.floor() as i64).max(0);
    let y_end = (y_max.ceil() as i64).min(height - 1);

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_start..=y_end {
        let scan = y as f64 + 0.5;

        crossings.clear();
        for i in 0..polygon.len() {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            if (a.y <= scan) == (b.y <= scan) {
                continue;
            }
            let t = (scan - a.y) / (b.y - a.y);
            crossings.push(a.x + t * (b.x - a.x));
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x_first = (((pair[0] - 0.5).ceil()) as i64).max(0);
            let x_last = (((pair[1] - 0.5).floor()) as i64).min(width - 1);
            for x in x_first..=x_last {
                target.put_pixel(x as u32, y as u32, RgbPixel(color));
            }
        }
    }
}

/// Stroke a closed polygon boundary.
fn stroke_polygon(polygon: &[Point], color: Rgb, target: &mut RgbImage) {
    for i in 0..polygon.len() {
        stroke_segment(polygon[i], polygon[(i + 1) % polygon.len()], color, target);
    }
}

/// Bresenham segment walk, clipped per pixel.
fn stroke_segment(a: Point, b: Point, color: Rgb, target: &mut RgbImage) {
    let width = target.width() as i64;
    let height = target.height() as i64;

    let mut x0 = a.x.floor() as i64;
    let mut y0 = a.y.floor() as i64;
    let x1 = b.x.floor() as i64;
    let y1 = b.y.floor() as i64;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && x0 < width && y0 >= 0 && y0 < height {
            target.put_pixel(x0 as u32, y0 as u32, RgbPixel(color));
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
