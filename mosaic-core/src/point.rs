//! Point type and the `x,y; x,y` point-list text format.

/// 2D point in image pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Parse a `"x1,y1; x2,y2"` point list.
///
/// Entries that fail numeric parse on either coordinate are dropped rather
/// than failing the whole list.
pub fn parse_point_list(text: &str) -> Vec<Point> {
    text.split(';')
        .filter_map(|entry| {
            let (x, y) = entry.trim().split_once(',')?;
            let x: f64 = x.trim().parse().ok()?;
            let y: f64 = y.trim().parse().ok()?;
            Some(Point::new(x, y))
        })
        .collect()
}

/// Inverse of [`parse_point_list`]: `"x,y"` pairs joined by `"; "`.
pub fn serialize_point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(12.0, 34.0),
            Point::new(1.5, 987.25),
        ];
        let text = serialize_point_list(&points);
        assert_eq!(text, "0,0; 12,34; 1.5,987.25");
        assert_eq!(parse_point_list(&text), points);
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let points = parse_point_list("1,2;notanumber;3,4");
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_whitespace_tolerated() {
        let points = parse_point_list("  1.5 , 2 ;  3,4  ");
        assert_eq!(points, vec![Point::new(1.5, 2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_point_list("").is_empty());
        assert_eq!(serialize_point_list(&[]), "");
    }

    #[test]
    fn test_partial_pair_dropped() {
        // Missing y coordinate and trailing separator both drop cleanly
        assert_eq!(parse_point_list("5;1,2;"), vec![Point::new(1.0, 2.0)]);
    }
}
