// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// Reasons a [`QuadTree`][crate::QuadTree] configuration is rejected.
///
/// Only construction can fail. Inserts, removals and queries treat "nothing
/// there" as an ordinary empty result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuadTreeError {
    /// The world bounds have zero or negative area.
    #[error("quadtree bounds must have a positive width and height")]
    EmptyBounds,
    /// The minimum node size is zero, negative, or NaN.
    ///
    /// A positive floor is what stops subdivision from recursing forever.
    #[error("minimum node size must be strictly positive")]
    NonPositiveMinSize,
}
