//! The `LineOfSight` trait — "can an observer at `from` see `point`?".

use adv_core::Point2;

/// Visibility query supplied by the scene.
///
/// Implementations must be pure: the same inputs give the same answer for
/// the whole tick.
pub trait LineOfSight {
    fn can_see(&self, point: Point2, from: Point2) -> bool;
}

/// A level without obstacles; everything is visible.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpenField;

impl LineOfSight for OpenField {
    #[inline]
    fn can_see(&self, _point: Point2, _from: Point2) -> bool {
        true
    }
}

/// Adapts a closure `(point, from) -> bool` into a [`LineOfSight`].
///
/// ```rust
/// use adv_core::Point2;
/// use adv_spatial::{LineOfSight, SightFn};
///
/// let east_only = SightFn(|point: Point2, _from: Point2| point.x > 0.0);
/// assert!(east_only.can_see(Point2::new(1.0, 0.0), Point2::ORIGIN));
/// ```
#[derive(Copy, Clone)]
pub struct SightFn<F>(pub F);

impl<F> LineOfSight for SightFn<F>
where
    F: Fn(Point2, Point2) -> bool,
{
    #[inline]
    fn can_see(&self, point: Point2, from: Point2) -> bool {
        (self.0)(point, from)
    }
}

impl<T: LineOfSight + ?Sized> LineOfSight for &T {
    #[inline]
    fn can_see(&self, point: Point2, from: Point2) -> bool {
        (**self).can_see(point, from)
    }
}

impl<T: LineOfSight + ?Sized> LineOfSight for Box<T> {
    #[inline]
    fn can_see(&self, point: Point2, from: Point2) -> bool {
        (**self).can_see(point, from)
    }
}
