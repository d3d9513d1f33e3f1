//! Wrapper over the Delaunay/Voronoi construction collaborator.
//!
//! Construction itself is a black box (voronator, the d3-delaunay port).
//! This module adapts its output to the index discipline the rest of the
//! pipeline relies on: the triangle list and the cell list are both keyed by
//! position in the point sequence they were computed from.

use voronator::delaunator::{triangulate, Coord, Point as SitePoint};
use voronator::VoronoiDiagram;

use crate::{MosaicError, Point, Result};

/// Planar subdivision of the image rectangle: the Delaunay triangle index
/// list plus one clipped Voronoi cell polygon per site.
#[derive(Debug, Clone)]
pub struct Subdivision {
    /// Flat triangle list, length a multiple of 3; entries index the point
    /// sequence the subdivision was computed from.
    pub triangles: Vec<usize>,
    /// Clipped cell polygon per site, index-aligned with the point sequence.
    /// `None` marks a degenerate or fully clipped site.
    pub cells: Vec<Option<Vec<Point>>>,
}

impl Subdivision {
    /// Compute the subdivision for `points`, clipping cells to
    /// `[0, width] x [0, height]`.
    pub fn compute(points: &[Point], width: u32, height: u32) -> Result<Subdivision> {
        if points.len() < 3 {
            return Err(MosaicError::TooFewPoints(points.len()));
        }

        let sites: Vec<SitePoint> = points
            .iter()
            .map(|p| SitePoint::from_xy(p.x, p.y))
            .collect();
        let triangulation = triangulate(&sites).ok_or(MosaicError::Triangulation)?;

        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        let diagram = VoronoiDiagram::<SitePoint>::from_tuple(
            &(0.0, 0.0),
            &(width as f64, height as f64),
            &coords,
        )
        .ok_or(MosaicError::Triangulation)?;

        let cells = (0..points.len())
            .map(|i| {
                let polygon = diagram.cells().get(i)?;
                if polygon.points().len() < 3 {
                    return None;
                }
                Some(
                    polygon
                        .points()
                        .iter()
                        .map(|v| Point::new(v.x, v.y))
                        .collect(),
                )
            })
            .collect();

        Ok(Subdivision {
            triangles: triangulation.triangles,
            cells,
        })
    }

    /// Number of triangles in the Delaunay list
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_points() {
        let points = vec![Point::new(1.0, 1.0), Point::new(5.0, 5.0)];
        assert!(matches!(
            Subdivision::compute(&points, 10, 10),
            Err(MosaicError::TooFewPoints(2))
        ));
    }

    #[test]
    fn test_cells_align_with_points() {
        let points = vec![
            Point::new(2.0, 2.0),
            Point::new(7.0, 2.0),
            Point::new(5.0, 8.0),
            Point::new(2.0, 7.0),
        ];
        let subdivision = Subdivision::compute(&points, 10, 10).unwrap();

        assert_eq!(subdivision.cells.len(), points.len());
        assert_eq!(subdivision.triangles.len() % 3, 0);
        assert!(subdivision.num_triangles() >= 2);

        // Every triangle entry must index the point sequence
        for &i in &subdivision.triangles {
            assert!(i < points.len());
        }

        // Interior sites of a spread-out set all get bounded polygons
        for cell in subdivision.cells.iter().flatten() {
            assert!(cell.len() >= 3);
        }
    }

    #[test]
    fn test_cells_clipped_to_bounds() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(50.0, 12.0),
            Point::new(30.0, 50.0),
            Point::new(55.0, 55.0),
        ];
        let subdivision = Subdivision::compute(&points, 64, 64).unwrap();

        // Cell vertices stay within the clip rectangle
        for cell in subdivision.cells.iter().flatten() {
            for v in cell {
                assert!(v.x >= -1e-9 && v.x <= 64.0 + 1e-9);
                assert!(v.y >= -1e-9 && v.y <= 64.0 + 1e-9);
            }
        }
    }
}
