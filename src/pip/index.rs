//! Spatial index for fast public land lookups.

use geo_types::Coord;
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use super::ray::{polygon_contains, HoleMode};
use crate::models::{PublicLand, PublicLands};

/// Bounding box of one land, remembering its position in the collection
#[derive(Debug, Clone)]
pub struct IndexedLand {
    pub position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedLand {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedLand {
    pub fn new(position: usize, land: &PublicLand) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = land.bbox()?;
        Some(Self {
            position,
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// R-tree over land bounding boxes.
///
/// The tree only narrows candidates. Candidates are re-ordered by collection
/// position before the exact test, so the winner is the same one a linear
/// scan would pick.
pub struct LandSpatialIndex {
    tree: RTree<IndexedLand>,
}

impl LandSpatialIndex {
    /// Build spatial index from public lands
    pub fn build(lands: &PublicLands) -> Self {
        info!("Building spatial index for {} public lands...", lands.len());

        // Lands without a bounding box have empty outer rings and can never match
        let indexed: Vec<IndexedLand> = lands
            .iter()
            .enumerate()
            .filter_map(|(i, land)| IndexedLand::new(i, land))
            .collect();

        let tree = RTree::bulk_load(indexed);

        info!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// Collection positions whose bounding box covers the point, ascending
    pub fn candidates(&self, point: Coord<f64>) -> Vec<usize> {
        let query_envelope = AABB::from_point([point.x, point.y]);

        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|il| il.position)
            .collect();
        positions.sort_unstable();
        positions
    }

    /// First land (in collection order) containing the point
    pub fn lookup<'a>(
        &self,
        lands: &'a PublicLands,
        point: Coord<f64>,
        holes: HoleMode,
    ) -> Option<&'a PublicLand> {
        self.candidates(point)
            .into_iter()
            .filter_map(|i| lands.lands().get(i))
            .find(|land| {
                land.geometry
                    .polygons()
                    .iter()
                    .any(|p| polygon_contains(p, point, holes))
            })
    }

    /// Get total number of indexed lands
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LandGeometry;
    use crate::pip::find_land;
    use geo_types::{coord, polygon, MultiPolygon, Polygon};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
        ]
    }

    fn sample() -> PublicLands {
        vec![
            PublicLand::new("Big", LandGeometry::Polygon(square(0.0, 0.0, 10.0, 10.0))),
            PublicLand::new("Small", LandGeometry::Polygon(square(2.0, 2.0, 3.0, 3.0))),
            PublicLand::new(
                "Islands",
                LandGeometry::MultiPolygon(MultiPolygon::new(vec![
                    square(20.0, 0.0, 21.0, 1.0),
                    square(30.0, 0.0, 31.0, 1.0),
                ])),
            ),
            PublicLand::new("Empty", LandGeometry::MultiPolygon(MultiPolygon::new(vec![]))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_index() {
        let index = LandSpatialIndex::build(&PublicLands::default());
        assert!(index.is_empty());
        assert!(index
            .lookup(&PublicLands::default(), coord! { x: 0.0, y: 0.0 }, HoleMode::Ignore)
            .is_none());
    }

    #[test]
    fn test_lands_without_bbox_are_not_indexed() {
        let lands = sample();
        let index = LandSpatialIndex::build(&lands);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_candidates_sorted_by_position() {
        let lands = sample();
        let index = LandSpatialIndex::build(&lands);
        assert_eq!(index.candidates(coord! { x: 2.5, y: 2.5 }), vec![0, 1]);
        // the MultiPolygon box spans the gap between its islands
        assert_eq!(index.candidates(coord! { x: 25.0, y: 0.5 }), vec![2]);
        assert!(index.candidates(coord! { x: 50.0, y: 50.0 }).is_empty());
    }

    #[test]
    fn test_index_agrees_with_linear_scan() {
        let lands = sample();
        let index = LandSpatialIndex::build(&lands);

        let mut probes = Vec::new();
        let mut x = -1.5;
        while x < 32.0 {
            let mut y = -1.5;
            while y < 11.0 {
                probes.push(coord! { x: x, y: y });
                y += 0.75;
            }
            x += 0.75;
        }

        for p in probes {
            let linear = find_land(lands.iter(), p, HoleMode::Ignore).map(|l| &l.name);
            let indexed = index.lookup(&lands, p, HoleMode::Ignore).map(|l| &l.name);
            assert_eq!(linear, indexed, "{:?}", p);
        }
    }

    #[test]
    fn test_overlap_returns_first_in_order() {
        let lands = sample();
        let index = LandSpatialIndex::build(&lands);
        let hit = index.lookup(&lands, coord! { x: 2.5, y: 2.5 }, HoleMode::Ignore);
        assert_eq!(hit.map(|l| l.name.as_str()), Some("Big"));
    }
}
