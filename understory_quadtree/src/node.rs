// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive quadtree node: insertion, subdivision, queries, removal and merge-back.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;
use core::mem;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::object::Intersects;
use crate::tree::QueryTrace;
use crate::types::{Aabb2D, Scalar};

/// Either objects or children, never both.
#[derive(Clone)]
enum Contents<T, O> {
    /// Stored objects. Empty means the node is unpopulated.
    Leaf(SmallVec<[O; 4]>),
    /// NW, NE, SW, SE.
    Internal(Box<[Node<T, O>; 4]>),
}

#[derive(Clone)]
pub(crate) struct Node<T, O> {
    bounds: Aabb2D<T>,
    contents: Contents<T, O>,
}

impl<T, O> Node<T, O>
where
    T: Scalar,
    O: Intersects<T> + Clone + Eq + Hash,
{
    /// An unpopulated leaf.
    pub(crate) fn new(bounds: Aabb2D<T>) -> Self {
        Self {
            bounds,
            contents: Contents::Leaf(SmallVec::new()),
        }
    }

    pub(crate) fn bounds(&self) -> Aabb2D<T> {
        self.bounds
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(&self.contents, Contents::Leaf(objects) if objects.is_empty())
    }

    /// Nodes at or below the floor in either dimension never subdivide.
    fn has_minimum_size(&self, min_size: T) -> bool {
        self.bounds.width() <= min_size || self.bounds.height() <= min_size
    }

    /// Place `object` in every leaf of this subtree it intersects.
    ///
    /// Returns `false` when the object misses this node entirely.
    pub(crate) fn insert(&mut self, object: &O, min_size: T) -> bool {
        if !object.intersects(&self.bounds) {
            return false;
        }

        let at_floor = self.has_minimum_size(min_size);
        if let Contents::Leaf(objects) = &mut self.contents {
            if objects.is_empty() || at_floor {
                objects.push(object.clone());
                return true;
            }
            self.subdivide(min_size);
        }

        let Contents::Internal(children) = &mut self.contents else {
            unreachable!("quadtree invariant violated: occupied leaf did not split");
        };
        let mut placed = false;
        // Straddling objects go into every quadrant they touch.
        for child in children.iter_mut() {
            placed |= child.insert(object, min_size);
        }
        placed
    }

    /// Turn an occupied leaf into four children, re-inserting everything it held.
    fn subdivide(&mut self, min_size: T) {
        let Contents::Leaf(objects) = &mut self.contents else {
            return;
        };
        let held = mem::take(objects);

        let mut children = Box::new(self.bounds.quadrants().map(Self::new));
        for object in &held {
            for child in children.iter_mut() {
                child.insert(object, min_size);
            }
        }
        log::trace!(
            "quadtree: split {:?} and redistributed {} object(s)",
            self.bounds,
            held.len()
        );
        self.contents = Contents::Internal(children);
    }

    /// Add every object intersecting `area` to `found`.
    ///
    /// When `trace` is present, records the bounds of each node pruned and
    /// each node visited, in traversal order.
    pub(crate) fn query(
        &self,
        area: &Aabb2D<T>,
        found: &mut HashSet<O>,
        mut trace: Option<&mut QueryTrace<T>>,
    ) {
        if !self.bounds.overlaps_interior(area) {
            if let Some(trace) = trace {
                trace.pruned.push(self.bounds);
            }
            return;
        }
        if let Some(trace) = trace.as_deref_mut() {
            trace.visited.push(self.bounds);
        }

        match &self.contents {
            Contents::Leaf(objects) => {
                found.extend(objects.iter().filter(|o| o.intersects(area)).cloned());
            }
            Contents::Internal(children) => {
                for child in children.iter() {
                    child.query(area, found, trace.as_deref_mut());
                }
            }
        }
    }

    /// Drop `object` from every leaf of this subtree, then merge back any
    /// internal node left holding at most one distinct object.
    pub(crate) fn remove(&mut self, object: &O) {
        match &mut self.contents {
            Contents::Leaf(objects) => objects.retain(|held| *held != *object),
            Contents::Internal(children) => {
                // The object may have been recorded under several quadrants.
                for child in children.iter_mut() {
                    child.remove(object);
                }

                let mut remaining = HashSet::new();
                if self.collect_distinct(&mut remaining, 1) {
                    log::trace!(
                        "quadtree: merged {:?} back into a leaf with {} object(s)",
                        self.bounds,
                        remaining.len()
                    );
                    self.contents = Contents::Leaf(remaining.into_iter().collect());
                }
            }
        }
    }

    /// Gather distinct objects of this subtree into `out`.
    ///
    /// Stops early and returns `false` once `out` holds more than `limit`
    /// objects.
    pub(crate) fn collect_distinct(&self, out: &mut HashSet<O>, limit: usize) -> bool {
        match &self.contents {
            Contents::Leaf(objects) => {
                for object in objects {
                    out.insert(object.clone());
                    if out.len() > limit {
                        return false;
                    }
                }
                true
            }
            Contents::Internal(children) => children
                .iter()
                .all(|child| child.collect_distinct(out, limit)),
        }
    }

    /// Pre-order: self, then NW, NE, SW, SE.
    pub(crate) fn collect_bounds(&self, out: &mut Vec<Aabb2D<T>>) {
        out.push(self.bounds);
        if let Contents::Internal(children) = &self.contents {
            for child in children.iter() {
                child.collect_bounds(out);
            }
        }
    }

    /// Edges on the longest root-to-leaf path.
    pub(crate) fn depth(&self) -> usize {
        match &self.contents {
            Contents::Leaf(_) => 0,
            Contents::Internal(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match &self.contents {
            Contents::Leaf(_) => 1,
            Contents::Internal(children) => {
                1 + children.iter().map(Self::node_count).sum::<usize>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    type Obj = Aabb2D<i64>;

    const MIN: i64 = 15;

    fn world() -> Node<i64, Obj> {
        Node::new(Aabb2D::new(0, 0, 480, 480))
    }

    fn query(node: &Node<i64, Obj>, area: Obj) -> HashSet<Obj> {
        let mut found = HashSet::new();
        node.query(&area, &mut found, None);
        found
    }

    fn set(items: &[Obj]) -> HashSet<Obj> {
        items.iter().copied().collect()
    }

    fn all(node: &Node<i64, Obj>) -> HashSet<Obj> {
        let mut out = HashSet::new();
        assert!(node.collect_distinct(&mut out, usize::MAX));
        out
    }

    #[test]
    fn first_insert_fills_empty_leaf() {
        let mut node = world();
        assert!(node.is_empty());
        assert!(node.insert(&Aabb2D::new(10, 10, 20, 20), MIN));
        assert!(!node.is_empty());
        assert_eq!(node.node_count(), 1);
        assert_eq!(node.depth(), 0);
    }

    #[test]
    fn insert_outside_is_rejected() {
        let mut node = world();
        assert!(!node.insert(&Aabb2D::new(500, 500, 510, 510), MIN));
        assert!(node.is_empty());
    }

    #[test]
    fn second_insert_subdivides_and_keeps_both() {
        let mut node = world();
        let a = Aabb2D::new(10, 10, 20, 20);
        let b = Aabb2D::new(400, 400, 410, 410);
        assert!(node.insert(&a, MIN));
        assert!(node.insert(&b, MIN));

        let mut bounds = Vec::new();
        node.collect_bounds(&mut bounds);
        assert_eq!(bounds.len(), 5);
        assert_eq!(
            &bounds[1..],
            &[
                Aabb2D::new(0, 0, 240, 240),
                Aabb2D::new(240, 0, 480, 240),
                Aabb2D::new(0, 240, 240, 480),
                Aabb2D::new(240, 240, 480, 480),
            ]
        );
        assert_eq!(query(&node, a), set(&[a]));
        assert_eq!(query(&node, b), set(&[b]));
    }

    #[test]
    fn subdivision_reinserts_every_held_object() {
        // A leaf can only hold several objects after being filled at the floor,
        // so build one by hand and force it to split.
        let a = Aabb2D::new(10, 10, 20, 20);
        let b = Aabb2D::new(300, 10, 310, 20);
        let c = Aabb2D::new(10, 300, 20, 310);
        let mut node = Node {
            bounds: Aabb2D::new(0, 0, 480, 480),
            contents: Contents::Leaf(smallvec![a, b]),
        };
        assert!(node.insert(&c, MIN));

        assert_eq!(all(&node), set(&[a, b, c]));
        assert_eq!(query(&node, a), set(&[a]));
        assert_eq!(query(&node, b), set(&[b]));
        assert_eq!(query(&node, c), set(&[c]));
    }

    #[test]
    fn object_touching_a_split_line_stays_on_one_side() {
        let mut node = world();
        let edge = Aabb2D::new(230, 10, 240, 20);
        let other = Aabb2D::new(10, 300, 20, 310);
        node.insert(&edge, MIN);
        node.insert(&other, MIN);

        assert_eq!(node.node_count(), 5);
        assert!(query(&node, Aabb2D::new(240, 0, 480, 240)).is_empty());
        assert_eq!(query(&node, Aabb2D::new(0, 0, 240, 240)), set(&[edge]));
    }

    #[test]
    fn floor_sized_leaf_accepts_without_splitting() {
        let mut node: Node<i64, Obj> = Node::new(Aabb2D::new(0, 0, 15, 15));
        for i in 0..10 {
            assert!(node.insert(&Aabb2D::new(i, i, i + 1, i + 1), MIN));
        }
        assert_eq!(node.node_count(), 1);
        assert_eq!(all(&node).len(), 10);
    }

    #[test]
    fn straddling_object_is_stored_in_several_leaves_but_counted_once() {
        let mut node = world();
        let corner = Aabb2D::new(0, 0, 1, 1);
        let straddler = Aabb2D::new(230, 230, 250, 250);
        node.insert(&corner, MIN);
        node.insert(&straddler, MIN);

        let mut found = HashSet::new();
        node.query(&Aabb2D::new(0, 0, 480, 480), &mut found, None);
        assert_eq!(found.len(), 2);
        assert_eq!(all(&node).len(), 2);
    }

    #[test]
    fn remove_merges_back_to_single_leaf() {
        let mut node = world();
        let a = Aabb2D::new(100, 100, 110, 110);
        let b = Aabb2D::new(101, 101, 111, 111);
        node.insert(&a, MIN);
        node.insert(&b, MIN);
        assert!(node.depth() > 1);

        node.remove(&b);
        assert_eq!(node.node_count(), 1);
        assert_eq!(all(&node), set(&[a]));
        assert_eq!(query(&node, a), set(&[a]));

        node.remove(&a);
        assert!(node.is_empty());
    }

    #[test]
    fn remove_keeps_children_while_two_objects_remain() {
        let mut node = world();
        let a = Aabb2D::new(10, 10, 20, 20);
        let b = Aabb2D::new(300, 10, 310, 20);
        let c = Aabb2D::new(10, 300, 20, 310);
        for o in [a, b, c] {
            node.insert(&o, MIN);
        }
        node.remove(&c);
        assert_eq!(node.node_count(), 5);
        assert_eq!(all(&node), set(&[a, b]));
    }

    #[test]
    fn removing_absent_object_changes_nothing() {
        let mut node = world();
        let a = Aabb2D::new(10, 10, 20, 20);
        let b = Aabb2D::new(300, 10, 310, 20);
        node.insert(&a, MIN);
        node.insert(&b, MIN);

        let mut before = Vec::new();
        node.collect_bounds(&mut before);
        node.remove(&Aabb2D::new(50, 50, 60, 60));
        let mut after = Vec::new();
        node.collect_bounds(&mut after);

        assert_eq!(before, after);
        assert_eq!(all(&node), set(&[a, b]));
    }

    #[test]
    fn duplicates_are_stored_and_removed_together() {
        let mut node = world();
        let a = Aabb2D::new(10, 10, 20, 20);
        node.insert(&a, MIN);
        node.insert(&a, MIN);
        assert_eq!(all(&node).len(), 1);

        node.remove(&a);
        assert!(node.is_empty());
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn collect_distinct_stops_past_limit() {
        let mut node = world();
        for i in 0..4 {
            node.insert(&Aabb2D::new(i * 100, 0, i * 100 + 10, 10), MIN);
        }
        let mut out = HashSet::new();
        assert!(!node.collect_distinct(&mut out, 1));
        assert_eq!(out.len(), 2);
    }
}
