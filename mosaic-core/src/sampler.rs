//! Random pixel sampling.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{MosaicError, Point, Result};

/// Select `count` distinct pixel indices uniformly at random without
/// replacement, converting each to its `(x, y)` pixel location.
///
/// Draws are retried until an unseen index comes up, so `count` must not
/// exceed the pixel count; that is checked before the loop.
pub fn sample_random(count: usize, width: u32, height: u32, seed: u64) -> Result<Vec<Point>> {
    let total = width as usize * height as usize;
    if count > total {
        return Err(MosaicError::SampleCountExceedsPixels {
            requested: count,
            available: total,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut seen: HashSet<usize> = HashSet::with_capacity(count);
    let mut points = Vec::with_capacity(count);

    while points.len() < count {
        let index = rng.gen_range(0..total);
        if seen.insert(index) {
            points.push(Point::new(
                (index % width as usize) as f64,
                (index / width as usize) as f64,
            ));
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count_all_distinct() {
        let points = sample_random(50, 10, 10, 0).unwrap();
        assert_eq!(points.len(), 50);

        let indices: HashSet<usize> = points
            .iter()
            .map(|p| p.y as usize * 10 + p.x as usize)
            .collect();
        assert_eq!(indices.len(), 50, "pixel indices must be distinct");

        for p in &points {
            assert!(p.x >= 0.0 && p.x < 10.0);
            assert!(p.y >= 0.0 && p.y < 10.0);
        }
    }

    #[test]
    fn test_full_coverage() {
        // count == width*height must terminate and cover every pixel
        let points = sample_random(16, 4, 4, 7).unwrap();
        let indices: HashSet<usize> = points
            .iter()
            .map(|p| p.y as usize * 4 + p.x as usize)
            .collect();
        assert_eq!(indices.len(), 16);
    }

    #[test]
    fn test_count_exceeding_pixels_fails() {
        let err = sample_random(17, 4, 4, 0).unwrap_err();
        match err {
            MosaicError::SampleCountExceedsPixels {
                requested,
                available,
            } => {
                assert_eq!(requested, 17);
                assert_eq!(available, 16);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = sample_random(20, 32, 32, 42).unwrap();
        let b = sample_random(20, 32, 32, 42).unwrap();
        assert_eq!(a, b);

        let c = sample_random(20, 32, 32, 43).unwrap();
        assert_ne!(a, c, "different seeds should produce different points");
    }

    #[test]
    fn test_zero_count() {
        assert!(sample_random(0, 4, 4, 0).unwrap().is_empty());
    }
}
