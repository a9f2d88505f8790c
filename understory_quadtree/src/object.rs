// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability stored objects must provide.

use alloc::rc::Rc;

use crate::types::Aabb2D;

/// Objects that can tell whether they intersect an axis-aligned rectangle.
///
/// This is the only question a [`QuadTree`][crate::QuadTree] ever asks of
/// its objects: once to route them into nodes on insert, and once per
/// candidate when answering a query.
///
/// Implementations must be deterministic for as long as the object is stored;
/// an object whose answer changes between insert and removal leaves stale
/// entries behind.
pub trait Intersects<T> {
    /// Whether this object intersects `rect`.
    fn intersects(&self, rect: &Aabb2D<T>) -> bool;
}

/// Boxes intersect when their interiors overlap; touching edges do not count.
impl<T: Copy + PartialOrd> Intersects<T> for Aabb2D<T> {
    #[inline]
    fn intersects(&self, rect: &Aabb2D<T>) -> bool {
        self.overlaps_interior(rect)
    }
}

impl<T, S: Intersects<T> + ?Sized> Intersects<T> for &S {
    #[inline]
    fn intersects(&self, rect: &Aabb2D<T>) -> bool {
        (**self).intersects(rect)
    }
}

impl<T, S: Intersects<T> + ?Sized> Intersects<T> for Rc<S> {
    #[inline]
    fn intersects(&self, rect: &Aabb2D<T>) -> bool {
        (**self).intersects(rect)
    }
}

#[cfg(feature = "kurbo")]
mod kurbo_shapes {
    use kurbo::{Circle, Point, Rect};

    use super::Intersects;
    use crate::types::Aabb2D;

    /// Interior overlap against the rectangle's normalized extents.
    impl Intersects<f64> for Rect {
        fn intersects(&self, rect: &Aabb2D<f64>) -> bool {
            let r = self.abs();
            Aabb2D::new(r.x0, r.y0, r.x1, r.y1).overlaps_interior(rect)
        }
    }

    /// Treated as a filled disk: the closest point of `rect` to the center
    /// must lie within the radius.
    impl Intersects<f64> for Circle {
        fn intersects(&self, rect: &Aabb2D<f64>) -> bool {
            // Not `clamp`, which panics on an inverted rect.
            let closest_x = self.center.x.max(rect.min_x).min(rect.max_x);
            let closest_y = self.center.y.max(rect.min_y).min(rect.max_y);
            let dx = self.center.x - closest_x;
            let dy = self.center.y - closest_y;
            dx * dx + dy * dy <= self.radius * self.radius
        }
    }

    impl Intersects<f64> for Point {
        fn intersects(&self, rect: &Aabb2D<f64>) -> bool {
            rect.min_x <= self.x
                && self.x <= rect.max_x
                && rect.min_y <= self.y
                && self.y <= rect.max_y
        }
    }
}
