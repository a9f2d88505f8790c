// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::error::QuadTreeError;
use crate::node::Node;
use crate::object::Intersects;
use crate::types::{Aabb2D, Scalar};

/// Minimum node width/height used by the `with_bounds` constructors.
///
/// A `u8` so it converts losslessly into every supported scalar through
/// `From`; use `f64::from(DEFAULT_MIN_SIZE)` and friends to compare it with
/// [`QuadTree::min_size`].
pub const DEFAULT_MIN_SIZE: u8 = 15;

/// Node rectangles touched by [`QuadTree::query_rect_traced`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryTrace<T> {
    /// Bounds of nodes that were tested against the query area and missed.
    pub pruned: Vec<Aabb2D<T>>,
    /// Bounds of nodes that overlapped the query area and were descended into.
    pub visited: Vec<Aabb2D<T>>,
}

impl<T> QueryTrace<T> {
    /// Total number of node bounds tested, hit or not.
    pub fn tested_count(&self) -> usize {
        self.pruned.len() + self.visited.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.pruned.is_empty() && self.visited.is_empty()
    }

    /// Forget all recorded bounds, keeping allocations.
    pub fn clear(&mut self) {
        self.pruned.clear();
        self.visited.clear();
    }
}

/// A region quadtree over a fixed world rectangle.
///
/// Stores handles `O` that can report whether they intersect a rectangle, and
/// answers which of them intersect a query area. Objects straddling quadrant
/// boundaries are stored in every leaf they touch; every read deduplicates
/// them through `Eq`/`Hash`.
///
/// The tree never owns object geometry: store cheap handles (ids,
/// references, `Rc`s) and keep their geometry stable between insertion and
/// removal.
#[derive(Clone)]
pub struct QuadTree<T, O> {
    root: Node<T, O>,
    min_size: T,
}

impl<T, O> Debug for QuadTree<T, O>
where
    T: Scalar,
    O: Intersects<T> + Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.root.bounds())
            .field("min_size", &self.min_size)
            .field("nodes", &self.root.node_count())
            .field("depth", &self.root.depth())
            .finish_non_exhaustive()
    }
}

impl<T, O> QuadTree<T, O>
where
    T: Scalar,
    O: Intersects<T> + Clone + Eq + Hash,
{
    /// Create an empty tree covering `bounds`.
    ///
    /// Nodes whose width or height is at or below `min_size` are never
    /// subdivided. `bounds` must have positive area and `min_size` must be
    /// positive; use [`QuadTree::try_new`] to check this at runtime.
    pub fn new(bounds: Aabb2D<T>, min_size: T) -> Self {
        debug_assert!(!bounds.is_empty(), "quadtree bounds must not be empty");
        debug_assert!(
            min_size > T::zero(),
            "quadtree min_size must be strictly positive"
        );
        Self {
            root: Node::new(bounds),
            min_size,
        }
    }

    /// Create an empty tree, rejecting configurations that cannot work.
    pub fn try_new(bounds: Aabb2D<T>, min_size: T) -> Result<Self, QuadTreeError> {
        if bounds.is_empty() {
            return Err(QuadTreeError::EmptyBounds);
        }
        // NaN compares as `None` and is rejected too.
        if min_size.partial_cmp(&T::zero()) != Some(Ordering::Greater) {
            return Err(QuadTreeError::NonPositiveMinSize);
        }
        Ok(Self::new(bounds, min_size))
    }

    /// The world rectangle covered by the root node.
    pub fn bounds(&self) -> Aabb2D<T> {
        self.root.bounds()
    }

    /// Size floor below which nodes stay leaves.
    pub fn min_size(&self) -> T {
        self.min_size
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Insert `object` into every leaf it intersects, subdividing as needed.
    ///
    /// Returns `false`, without storing anything, if the object lies entirely
    /// outside [`bounds`][Self::bounds]. Inserting an object again stores it
    /// again; reads still report it once.
    pub fn insert(&mut self, object: O) -> bool {
        self.root.insert(&object, self.min_size)
    }

    /// Remove every stored occurrence of `object`.
    ///
    /// Subtrees left holding at most one distinct object collapse back into a
    /// single leaf. Removing an object that is not stored does nothing.
    pub fn remove(&mut self, object: &O) {
        self.root.remove(object);
    }

    /// Drop everything, leaving a single empty leaf over the same bounds.
    pub fn clear(&mut self) {
        log::debug!("quadtree: cleared {:?}", self.root.bounds());
        self.root = Node::new(self.root.bounds());
    }

    /// Objects intersecting `area`, each reported once.
    pub fn query_rect(&self, area: Aabb2D<T>) -> HashSet<O> {
        let mut found = HashSet::new();
        self.root.query(&area, &mut found, None);
        found
    }

    /// Like [`query_rect`][Self::query_rect], also reporting which nodes the
    /// traversal pruned and which it visited.
    ///
    /// The returned objects are exactly those of `query_rect`.
    pub fn query_rect_traced(&self, area: Aabb2D<T>) -> (HashSet<O>, QueryTrace<T>) {
        let mut found = HashSet::new();
        let mut trace = QueryTrace {
            pruned: Vec::new(),
            visited: Vec::new(),
        };
        self.root.query(&area, &mut found, Some(&mut trace));
        (found, trace)
    }

    /// Every stored object, each reported once.
    pub fn objects(&self) -> HashSet<O> {
        let mut out = HashSet::new();
        self.root.collect_distinct(&mut out, usize::MAX);
        out
    }

    /// Bounds of every node, in pre-order (a node, then its NW, NE, SW and
    /// SE subtrees).
    pub fn node_bounds(&self) -> Vec<Aabb2D<T>> {
        let mut out = Vec::new();
        self.root.collect_bounds(&mut out);
        out
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl<O: Intersects<f64> + Clone + Eq + Hash> QuadTree<f64, O> {
    /// Create an empty tree with [`DEFAULT_MIN_SIZE`].
    pub fn with_bounds(bounds: Aabb2D<f64>) -> Self {
        Self::new(bounds, f64::from(DEFAULT_MIN_SIZE))
    }
}

impl<O: Intersects<f32> + Clone + Eq + Hash> QuadTree<f32, O> {
    /// Create an empty tree with [`DEFAULT_MIN_SIZE`].
    pub fn with_bounds(bounds: Aabb2D<f32>) -> Self {
        Self::new(bounds, f32::from(DEFAULT_MIN_SIZE))
    }
}

impl<O: Intersects<i64> + Clone + Eq + Hash> QuadTree<i64, O> {
    /// Create an empty tree with [`DEFAULT_MIN_SIZE`].
    pub fn with_bounds(bounds: Aabb2D<i64>) -> Self {
        Self::new(bounds, i64::from(DEFAULT_MIN_SIZE))
    }
}
