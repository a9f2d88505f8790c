// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Used both for node bounds and for query regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Determines whether this AABB overlaps with another in any way.
    ///
    /// Note that the edge of the AABB is considered to be part of itself, meaning
    /// that two AABBs that share an edge are considered to overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_quadtree::Aabb2D;
    ///
    /// let aabb1 = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let aabb2 = Aabb2D::new(5.0, 5.0, 15.0, 15.0);
    /// assert!(aabb1.overlaps(&aabb2));
    ///
    /// let aabb1 = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let aabb2 = Aabb2D::new(10.0, 0.0, 20.0, 10.0);
    /// assert!(aabb1.overlaps(&aabb2));
    ///
    /// let aabb1 = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
    /// let aabb2 = Aabb2D::new(11.0, 0.0, 20.0, 10.0);
    /// assert!(!aabb1.overlaps(&aabb2));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether the interiors of the two AABBs overlap.
    ///
    /// Unlike [`overlaps`][Self::overlaps], boxes that only share an edge or a
    /// corner do not intersect, and an empty box intersects nothing. Node
    /// pruning and object routing use this test.
    ///
    /// ```
    /// use understory_quadtree::Aabb2D;
    ///
    /// let left = Aabb2D::new(0, 0, 10, 10);
    /// assert!(left.overlaps_interior(&Aabb2D::new(9, 0, 20, 10)));
    /// assert!(!left.overlaps_interior(&Aabb2D::new(10, 0, 20, 10)));
    /// assert!(!left.overlaps_interior(&Aabb2D::new(5, 5, 5, 6)));
    /// ```
    #[inline]
    pub fn overlaps_interior(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Return true if the AABB is empty or inverted (no area). Assumes no NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Create an AABB from its min corner and size.
    #[inline]
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: T::add(x, w),
            max_y: T::add(y, h),
        }
    }

    /// Extent along the x axis.
    #[inline]
    pub fn width(&self) -> T {
        T::sub(self.max_x, self.min_x)
    }

    /// Extent along the y axis.
    #[inline]
    pub fn height(&self) -> T {
        T::sub(self.max_y, self.min_y)
    }

    /// Split into four equal quadrants, in NW, NE, SW, SE order.
    ///
    /// "North" is the `min_y` side and "west" the `min_x` side, matching
    /// screen coordinates.
    ///
    /// ```
    /// use understory_quadtree::Aabb2D;
    ///
    /// let [nw, ne, sw, se] = Aabb2D::new(0, 0, 8, 4).quadrants();
    /// assert_eq!(nw, Aabb2D::new(0, 0, 4, 2));
    /// assert_eq!(ne, Aabb2D::new(4, 0, 8, 2));
    /// assert_eq!(sw, Aabb2D::new(0, 2, 4, 4));
    /// assert_eq!(se, Aabb2D::new(4, 2, 8, 4));
    /// ```
    pub fn quadrants(&self) -> [Self; 4] {
        let mid_x = T::mid(self.min_x, self.max_x);
        let mid_y = T::mid(self.min_y, self.max_y);
        [
            Self::new(self.min_x, self.min_y, mid_x, mid_y),
            Self::new(mid_x, self.min_y, self.max_x, mid_y),
            Self::new(self.min_x, mid_y, mid_x, self.max_y),
            Self::new(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }
}

/// Numeric scalar abstraction for quadtree coordinates.
///
/// This trait provides the handful of operations needed to size nodes and
/// split them into quadrants.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Midpoint between a and b (used to split node bounds).
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }
}
