//! Unit tests for adv-spatial.

use adv_core::Point2;

use crate::{LineOfSight, OpenField, SightFn, Wall, WallIndex};

fn p(x: f32, y: f32) -> Point2 {
    Point2::new(x, y)
}

#[cfg(test)]
mod sight_tests {
    use super::*;

    #[test]
    fn open_field_sees_everything() {
        assert!(OpenField.can_see(p(1000.0, -3.0), p(0.0, 0.0)));
    }

    #[test]
    fn closure_adapter() {
        let blind = SightFn(|_: Point2, _: Point2| false);
        assert!(!blind.can_see(p(1.0, 0.0), p(0.0, 0.0)));
    }

    #[test]
    fn trait_objects_and_refs() {
        let boxed: Box<dyn LineOfSight> = Box::new(OpenField);
        assert!(boxed.can_see(p(1.0, 1.0), p(0.0, 0.0)));
        let by_ref: &dyn LineOfSight = &OpenField;
        assert!(by_ref.can_see(p(1.0, 1.0), p(0.0, 0.0)));
    }
}

#[cfg(test)]
mod wall_tests {
    use super::*;

    /// A vertical wall at x = 5 from y = -10 to y = 10.
    fn single_wall() -> WallIndex {
        WallIndex::new([Wall::new(p(5.0, -10.0), p(5.0, 10.0))]).unwrap()
    }

    #[test]
    fn wall_blocks_crossing_ray() {
        let index = single_wall();
        assert!(!index.can_see(p(10.0, 0.0), p(0.0, 0.0)));
        assert!(!index.can_see(p(0.0, 0.0), p(10.0, 0.0)), "blocking is symmetric");
    }

    #[test]
    fn ray_passing_beside_wall_is_clear() {
        let index = single_wall();
        assert!(index.can_see(p(10.0, 20.0), p(0.0, 20.0)));
        assert!(index.can_see(p(4.0, 0.0), p(0.0, 0.0)), "ray stops short of the wall");
    }

    #[test]
    fn touching_an_endpoint_blocks() {
        let index = single_wall();
        assert!(!index.can_see(p(10.0, 10.0), p(0.0, 10.0)));
    }

    #[test]
    fn collinear_overlap_blocks() {
        let index = WallIndex::new([Wall::new(p(0.0, 0.0), p(10.0, 0.0))]).unwrap();
        assert!(!index.can_see(p(20.0, 0.0), p(5.0, 0.0)));
        assert!(index.can_see(p(20.0, 0.0), p(11.0, 0.0)));
    }

    #[test]
    fn first_blocker_reports_the_wall() {
        let index = WallIndex::new([
            Wall::new(p(5.0, -1.0), p(5.0, 1.0)),
            Wall::new(p(50.0, 50.0), p(60.0, 60.0)),
        ])
        .unwrap();
        assert_eq!(index.len(), 2);
        let hit = index.first_blocker(p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        assert_eq!(hit, Wall::new(p(5.0, -1.0), p(5.0, 1.0)));
    }

    #[test]
    fn empty_index_sees_everything() {
        let index = WallIndex::empty();
        assert!(index.is_empty());
        assert!(index.can_see(p(100.0, 100.0), p(-100.0, -100.0)));
    }

    #[test]
    fn non_finite_wall_is_rejected() {
        let result = WallIndex::new([
            Wall::new(p(0.0, 0.0), p(1.0, 1.0)),
            Wall::new(p(f32::NAN, 0.0), p(1.0, 1.0)),
        ]);
        assert!(matches!(result, Err(crate::SpatialError::NonFiniteWall { index: 1 })));
    }

    #[test]
    fn many_walls_only_the_crossed_one_matters() {
        // A row of short vertical walls at x = 10, 20, ..., 100 above y = 5.
        let walls = (1..=10).map(|i| {
            let x = i as f32 * 10.0;
            Wall::new(p(x, 5.0), p(x, 15.0))
        });
        let index = WallIndex::new(walls).unwrap();
        assert!(index.can_see(p(200.0, 0.0), p(0.0, 0.0)), "ray runs below every wall");
        assert!(!index.can_see(p(200.0, 10.0), p(0.0, 10.0)));
    }
}
