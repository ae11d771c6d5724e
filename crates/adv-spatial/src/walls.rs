//! Wall segments indexed in an R-tree for line-of-sight ray casts.
//!
//! # Query
//!
//! A sight ray `from → point` is blocked if it touches any wall segment.
//! The R-tree (via `rstar`) prunes the search to walls whose bounding box
//! overlaps the ray's bounding box; survivors get an exact
//! segment-intersection test.  Touching an endpoint counts as blocked, so a
//! ray cannot slip through the seam between two joined walls.

use adv_core::Point2;
use rstar::{AABB, Envelope, RTree, RTreeObject, SelectionFunction};

use crate::{LineOfSight, SpatialError, SpatialResult};

/// A straight wall between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    pub a: Point2,
    pub b: Point2,
}

impl Wall {
    #[inline]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// `true` if this wall and the segment `p → q` share at least one point.
    pub fn intersects_segment(&self, p: Point2, q: Point2) -> bool {
        segments_intersect(self.a, self.b, p, q)
    }
}

#[derive(Clone)]
struct WallEntry {
    wall: Wall,
}

impl RTreeObject for WallEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.wall.a.x, self.wall.a.y],
            [self.wall.b.x, self.wall.b.y],
        )
    }
}

/// Selects walls hit by one sight ray.
struct RaySelection {
    from:     Point2,
    to:       Point2,
    envelope: AABB<[f32; 2]>,
}

impl RaySelection {
    fn new(from: Point2, to: Point2) -> Self {
        Self {
            from,
            to,
            envelope: AABB::from_corners([from.x, from.y], [to.x, to.y]),
        }
    }
}

impl SelectionFunction<WallEntry> for RaySelection {
    fn should_unpack_parent(&self, envelope: &AABB<[f32; 2]>) -> bool {
        self.envelope.intersects(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &WallEntry) -> bool {
        leaf.wall.intersects_segment(self.from, self.to)
    }
}

// ── WallIndex ─────────────────────────────────────────────────────────────────

/// Static set of walls answering line-of-sight queries.
pub struct WallIndex {
    tree:  RTree<WallEntry>,
    count: usize,
}

impl WallIndex {
    /// Bulk-load an index.  Fails if any endpoint is NaN or infinite.
    pub fn new(walls: impl IntoIterator<Item = Wall>) -> SpatialResult<Self> {
        let entries = walls
            .into_iter()
            .enumerate()
            .map(|(index, wall)| {
                let finite = [wall.a.x, wall.a.y, wall.b.x, wall.b.y]
                    .iter()
                    .all(|v| v.is_finite());
                if finite {
                    Ok(WallEntry { wall })
                } else {
                    Err(SpatialError::NonFiniteWall { index })
                }
            })
            .collect::<SpatialResult<Vec<_>>>()?;
        let count = entries.len();
        Ok(Self { tree: RTree::bulk_load(entries), count })
    }

    /// An index with no walls.
    pub fn empty() -> Self {
        Self { tree: RTree::new(), count: 0 }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The first wall (in index order) blocking `from → to`, if any.
    pub fn first_blocker(&self, from: Point2, to: Point2) -> Option<Wall> {
        self.tree
            .locate_with_selection_function(RaySelection::new(from, to))
            .map(|entry| entry.wall)
            .next()
    }
}

impl LineOfSight for WallIndex {
    fn can_see(&self, point: Point2, from: Point2) -> bool {
        self.first_blocker(from, point).is_none()
    }
}

// ── Segment math ──────────────────────────────────────────────────────────────

/// Sign of the turn `a → b → c`: positive for counter-clockwise.
#[inline]
fn orientation(a: Point2, b: Point2, c: Point2) -> f32 {
    (b - a).cross(c - a)
}

/// `c` lies within the bounding box of `a`–`b` (used for collinear cases).
#[inline]
fn within_box(a: Point2, b: Point2, c: Point2) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

fn segments_intersect(a: Point2, b: Point2, c: Point2, d: Point2) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_box(c, d, a))
        || (d2 == 0.0 && within_box(c, d, b))
        || (d3 == 0.0 && within_box(a, b, c))
        || (d4 == 0.0 && within_box(a, b, d))
}
