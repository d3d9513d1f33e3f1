//! Pipeline session state.

use std::path::Path;

use image::RgbaImage;

use crate::{sampler, Point, Result, Subdivision};

/// All pipeline state, passed explicitly into each stage.
///
/// The point sequence and the pixel snapshot are only ever replaced
/// wholesale, and any change to the points clears the subdivision, so stale
/// triangles or cells can never be paired with a newer point sequence.
pub struct Session {
    points: Vec<Point>,
    pixels: RgbaImage,
    subdivision: Option<Subdivision>,
}

impl Session {
    /// Decode an image file into a fresh session.
    ///
    /// On decode failure no session is constructed, so a caller holding a
    /// previous session keeps it intact.
    pub fn load(path: impl AsRef<Path>) -> Result<Session> {
        let pixels = image::open(path)?.to_rgba8();
        Ok(Self::from_image(pixels))
    }

    /// Build a session around an in-memory RGBA snapshot.
    pub fn from_image(pixels: RgbaImage) -> Session {
        Session {
            points: Vec::new(),
            pixels,
            subdivision: None,
        }
    }

    /// Replace the point set with `count` randomly sampled pixel locations.
    pub fn sample(&mut self, count: usize, seed: u64) -> Result<()> {
        let (width, height) = self.pixels.dimensions();
        self.points = sampler::sample_random(count, width, height, seed)?;
        self.subdivision = None;
        Ok(())
    }

    /// Replace the point set wholesale.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.subdivision = None;
    }

    /// Append one point (the interactive click-add path).
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.subdivision = None;
    }

    /// Recompute the triangulation and cell polygons for the current points.
    pub fn recompute(&mut self) -> Result<()> {
        let (width, height) = self.pixels.dimensions();
        self.subdivision = Some(Subdivision::compute(&self.points, width, height)?);
        Ok(())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// The current subdivision, present only if [`recompute`](Self::recompute)
    /// has run since the last point edit.
    pub fn subdivision(&self) -> Option<&Subdivision> {
        self.subdivision.as_ref()
    }
}
