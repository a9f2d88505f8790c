// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a region quadtree over a bounded 2D world.
//!
//! Understory Quadtree answers "which stored objects intersect this rectangle" by recursively
//! splitting space into quadrants.
//!
//! - Insert objects that can test themselves against an axis-aligned rectangle.
//! - Query by rectangle; each matching object is reported once.
//! - Remove objects; subtrees that drop to one distinct object merge back into a leaf.
//! - Inspect the tree shape (node bounds, depth) and trace which nodes a query touched.
//!
//! Every node is either a leaf holding objects or an internal node with exactly four children
//! (NW, NE, SW, SE). A leaf splits when a second object arrives, unless its width or height is
//! already at or below the tree's minimum size; such leaves accept any number of objects, which
//! bounds the depth of the tree.
//!
//! The tree is generic over the scalar type `T` (`f32`, `f64`, `i64`) and over the stored handle
//! `O`. Handles only need [`Intersects`] plus `Clone + Eq + Hash`: an object that straddles a
//! quadrant boundary is stored in several leaves, and reads deduplicate by equality. Boxes
//! intersect only when their interiors overlap: a node or object that merely touches a query
//! area's edge is not a hit.
//!
//! ## Features
//!
//! - `kurbo` *(default)*: [`Intersects`] impls for `kurbo::Rect`, `kurbo::Circle` and
//!   `kurbo::Point`.
//! - `std` *(default)* / `libm`: forwarded to `kurbo` for its float math.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, QuadTree};
//!
//! // Boxes are objects too.
//! let mut tree = QuadTree::<i64, Aabb2D<i64>>::with_bounds(Aabb2D::new(0, 0, 480, 480));
//! let a = Aabb2D::new(92, 92, 107, 107);
//! let b = Aabb2D::new(93, 93, 108, 108);
//! let c = Aabb2D::new(392, 392, 407, 407);
//! for o in [a, b, c] {
//!     assert!(tree.insert(o));
//! }
//!
//! let hits = tree.query_rect(Aabb2D::from_xywh(95, 95, 10, 10));
//! assert_eq!(hits.len(), 2);
//! assert!(!hits.contains(&c));
//!
//! tree.remove(&c);
//! assert_eq!(tree.objects().len(), 2);
//! ```
//!
//! The traced query reports which node rectangles were pruned and which were visited, which is
//! handy for drawing the tree:
//!
//! ```rust
//! use understory_quadtree::{Aabb2D, QuadTree};
//!
//! let mut tree = QuadTree::<i64, Aabb2D<i64>>::new(Aabb2D::new(0, 0, 64, 64), 4);
//! tree.insert(Aabb2D::new(1, 1, 2, 2));
//! tree.insert(Aabb2D::new(60, 60, 62, 62));
//!
//! let (found, trace) = tree.query_rect_traced(Aabb2D::new(0, 0, 3, 3));
//! assert_eq!(found.len(), 1);
//! assert_eq!(trace.visited.len(), 2);
//! assert_eq!(trace.pruned.len(), 3);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Malformed query rectangles are not
//! rejected; they simply match nothing useful.

#![no_std]

extern crate alloc;

mod error;
mod node;
mod object;
mod tree;
mod types;

pub use error::QuadTreeError;
pub use object::Intersects;
pub use tree::{DEFAULT_MIN_SIZE, QuadTree, QueryTrace};
pub use types::{Aabb2D, Scalar};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_query_remove() {
        let mut tree = QuadTree::<i64, Aabb2D<i64>>::new(Aabb2D::new(0, 0, 100, 100), 10);
        let a = Aabb2D::new(0, 0, 10, 10);
        let b = Aabb2D::new(5, 5, 15, 15);
        tree.insert(a);
        tree.insert(b);

        let hits = tree.query_rect(Aabb2D::new(6, 6, 7, 7));
        assert_eq!(hits.len(), 2);

        tree.remove(&a);
        let hits = tree.query_rect(Aabb2D::new(6, 6, 7, 7));
        assert_eq!(hits.len(), 1);
        assert!(hits.contains(&b));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn objects_outside_world_are_skipped() {
        let mut tree = QuadTree::<i64, Aabb2D<i64>>::new(Aabb2D::new(0, 0, 100, 100), 10);
        assert!(!tree.insert(Aabb2D::new(200, 200, 210, 210)));
        assert!(tree.objects().is_empty());
    }
}
