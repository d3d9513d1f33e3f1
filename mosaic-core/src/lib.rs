//! Voronoi image mosaic pipeline.
//!
//! Samples points from a raster image, pairs them with a planar subdivision
//! (Delaunay triangles + clipped Voronoi cells, computed by voronator),
//! averages the image color under each cell, and serializes the results as
//! raster images or VRML scene documents.

mod average;
mod export;
mod point;
mod raster;
mod sampler;
mod session;
mod subdivision;
mod vrml;

pub use average::{average_color, cell_colors};
pub use export::{to_png_bytes, write_png};
pub use point::{parse_point_list, serialize_point_list, Point};
pub use raster::{
    base_image, draw_site_markers, render_delaunay_overlay, render_mosaic,
    render_voronoi_overlay,
};
pub use sampler::sample_random;
pub use session::Session;
pub use subdivision::Subdivision;
pub use vrml::{delaunay_scene, voronoi_scene, ZMode, VRML_HEADER};

/// RGB color tuple
pub type Rgb = [u8; 3];

/// Color used for cells with no valid pixel samples
pub const FALLBACK_GRAY: Rgb = [128, 128, 128];

/// Error type for mosaic operations
#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("requested {requested} points but image has only {available} pixels")]
    SampleCountExceedsPixels { requested: usize, available: usize },

    #[error("need at least 3 points to triangulate, got {0}")]
    TooFewPoints(usize),

    #[error("triangulation failed")]
    Triangulation,
}

pub type Result<T> = std::result::Result<T, MosaicError>;
