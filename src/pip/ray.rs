//! Even-odd ray casting.
//!
//! A horizontal ray is cast from the query point towards +x and every ring
//! edge it crosses toggles the result. Winding order does not matter. Points
//! exactly on an edge may land on either side depending on rounding.

use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// How interior rings of a polygon are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleMode {
    /// Only the outer ring is consulted; a point in a hole counts as inside
    #[default]
    Ignore,
    /// A point inside any interior ring is outside the polygon
    Exclude,
}

impl std::fmt::Display for HoleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoleMode::Ignore => write!(f, "ignore"),
            HoleMode::Exclude => write!(f, "exclude"),
        }
    }
}

impl std::str::FromStr for HoleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(HoleMode::Ignore),
            "exclude" => Ok(HoleMode::Exclude),
            other => Err(format!("unknown hole mode '{}'", other)),
        }
    }
}

/// Test whether `point` (x = lon, y = lat) lies inside the region enclosed by `ring`.
///
/// The ring is treated as closed whether or not the last vertex repeats the first.
pub fn point_in_ring(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    let Coord { x, y } = point;
    let mut inside = false;

    let n = ring.len();
    if n == 0 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);

        let intersect = ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi);
        if intersect {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Ray cast against a `LineString` ring
pub fn point_in_line_string(point: Coord<f64>, ring: &LineString<f64>) -> bool {
    point_in_ring(point, &ring.0)
}

/// Polygon containment under the given hole mode
pub fn polygon_contains(polygon: &Polygon<f64>, point: Coord<f64>, holes: HoleMode) -> bool {
    if !point_in_line_string(point, polygon.exterior()) {
        return false;
    }

    match holes {
        HoleMode::Ignore => true,
        HoleMode::Exclude => !polygon
            .interiors()
            .iter()
            .any(|hole| point_in_line_string(point, hole)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn unit_square() -> Vec<Coord<f64>> {
        vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 0.0, y: 1.0 },
        ]
    }

    #[test]
    fn test_unit_square_inside_and_outside() {
        let ring = unit_square();
        assert!(point_in_ring(coord! { x: 0.5, y: 0.5 }, &ring));
        assert!(!point_in_ring(coord! { x: 2.0, y: 2.0 }, &ring));
        assert!(!point_in_ring(coord! { x: -0.5, y: 0.5 }, &ring));
        assert!(!point_in_ring(coord! { x: 0.5, y: 1.5 }, &ring));
    }

    #[test]
    fn test_boundary_point_is_stable() {
        let ring = unit_square();
        let point = coord! { x: 0.0, y: 0.5 };
        let first = point_in_ring(point, &ring);
        for _ in 0..100 {
            assert_eq!(point_in_ring(point, &ring), first);
        }
    }

    #[test]
    fn test_winding_does_not_matter() {
        let ring = unit_square();
        let mut reversed = ring.clone();
        reversed.reverse();

        let probes = [
            coord! { x: 0.5, y: 0.5 },
            coord! { x: 0.25, y: 0.75 },
            coord! { x: 2.0, y: 2.0 },
            coord! { x: -1.0, y: 0.5 },
            coord! { x: 0.5, y: -0.1 },
        ];
        for p in probes {
            assert_eq!(point_in_ring(p, &ring), point_in_ring(p, &reversed), "{:?}", p);
        }
    }

    #[test]
    fn test_explicitly_closed_ring_matches_open_ring() {
        let open = unit_square();
        let mut closed = open.clone();
        closed.push(open[0]);

        for p in [coord! { x: 0.5, y: 0.5 }, coord! { x: 1.5, y: 0.5 }] {
            assert_eq!(point_in_ring(p, &open), point_in_ring(p, &closed));
        }
    }

    #[test]
    fn test_concave_ring() {
        // U shape opening upwards
        let ring = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 3.0, y: 0.0 },
            coord! { x: 3.0, y: 3.0 },
            coord! { x: 2.0, y: 3.0 },
            coord! { x: 2.0, y: 1.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 1.0, y: 3.0 },
            coord! { x: 0.0, y: 3.0 },
        ];
        assert!(point_in_ring(coord! { x: 0.5, y: 2.0 }, &ring));
        assert!(point_in_ring(coord! { x: 2.5, y: 2.0 }, &ring));
        assert!(!point_in_ring(coord! { x: 1.5, y: 2.0 }, &ring));
    }

    #[test]
    fn test_degenerate_rings_contain_nothing() {
        let p = coord! { x: 0.0, y: 0.0 };
        assert!(!point_in_ring(p, &[]));
        assert!(!point_in_ring(p, &[coord! { x: 0.0, y: 0.0 }]));
        assert!(!point_in_ring(
            p,
            &[coord! { x: -1.0, y: -1.0 }, coord! { x: 1.0, y: 1.0 }]
        ));
    }

    #[test]
    fn test_holes_depend_on_mode() {
        let donut = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![LineString::from(vec![
                (4.0, 4.0),
                (6.0, 4.0),
                (6.0, 6.0),
                (4.0, 6.0),
            ])],
        );

        let in_hole = coord! { x: 5.0, y: 5.0 };
        let in_ring = coord! { x: 1.0, y: 1.0 };

        assert!(polygon_contains(&donut, in_hole, HoleMode::Ignore));
        assert!(!polygon_contains(&donut, in_hole, HoleMode::Exclude));
        assert!(polygon_contains(&donut, in_ring, HoleMode::Exclude));
        assert!(!polygon_contains(&donut, coord! { x: 11.0, y: 5.0 }, HoleMode::Exclude));
    }

    #[test]
    fn test_hole_mode_parse_and_display() {
        assert_eq!("exclude".parse::<HoleMode>().unwrap(), HoleMode::Exclude);
        assert!("Exclude".parse::<HoleMode>().is_err());
        assert_eq!("ignore".parse::<HoleMode>().unwrap(), HoleMode::Ignore);
        assert!("subtract".parse::<HoleMode>().is_err());
        assert_eq!(HoleMode::Exclude.to_string(), "exclude");
        assert_eq!(HoleMode::default(), HoleMode::Ignore);
    }
}
