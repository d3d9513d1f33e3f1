//! Per-cell color averaging.
//!
//! Samples the source buffer at each cell polygon's vertex coordinates
//! rather than rasterizing the interior; cost stays proportional to the
//! boundary, not the area.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use image::RgbaImage;

use crate::{Point, Rgb, Subdivision, FALLBACK_GRAY};

/// Average the buffer color under one cell polygon.
///
/// Vertex coordinates are floored to pixel indices; samples outside the
/// buffer are rejected. Channel sums are divided by the accepted-sample
/// count with truncating integer division. With zero accepted samples the
/// fallback gray is returned.
pub fn average_color(polygon: &[Point], pixels: &RgbaImage) -> Rgb {
    let (width, height) = pixels.dimensions();
    let mut sums = [0u64; 3];
    let mut count = 0u64;

    for vertex in polygon {
        let x = vertex.x.floor();
        let y = vertex.y.floor();
        if x < 0.0 || y < 0.0 || x >= width as f64 || y >= height as f64 {
            continue;
        }
        let sample = pixels.get_pixel(x as u32, y as u32);
        sums[0] += sample[0] as u64;
        sums[1] += sample[1] as u64;
        sums[2] += sample[2] as u64;
        count += 1;
    }

    if count == 0 {
        return FALLBACK_GRAY;
    }
    [
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ]
}

/// Average color for every cell, in site order.
///
/// Degenerate cells get the fallback gray so the result stays index-aligned
/// with the point sequence.
pub fn cell_colors(subdivision: &Subdivision, pixels: &RgbaImage) -> Vec<Rgb> {
    #[cfg(feature = "parallel")]
    let iter = subdivision.cells.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = subdivision.cells.iter();

    iter.map(|cell| match cell {
        Some(polygon) => average_color(polygon, pixels),
        None => FALLBACK_GRAY,
    })
    .collect()
}
