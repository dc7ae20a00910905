//! # Orthtree - dynamic quadtree / octree spatial index
//!
//! A Rust library providing a point quadtree (2D) and octree (3D) that stays
//! queryable while points are inserted and removed.
//!
//! ## Features
//!
//! - **Dynamic**: insert and remove at any time, no build step
//! - **Range queries**: lazy iteration over points inside a box or a sphere
//! - **Exact k-nearest**: branch-and-bound search with deterministic tie-breaking
//! - **Payloads**: every point carries caller data of any type
//! - **Duplicate-safe**: a depth cap stops runaway splitting on stacked points
//!
//! ## Quick Start
//!
//! ```rust
//! use orthtree::prelude::*;
//!
//! // Root region [0, 100) x [0, 100), 4 points per leaf, at most 8 levels
//! let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
//! let mut tree = Quadtree::new(bounds, 4, 8).unwrap();
//!
//! for (i, (x, y)) in [(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]
//!     .into_iter()
//!     .enumerate()
//! {
//!     tree.insert([x, y], i);
//! }
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.depth(), 1); // the fifth point split the root
//!
//! // Range query over [0, 10) x [0, 10)
//! let window = Region::from_corners([0.0, 0.0], [10.0, 10.0]).unwrap();
//! assert_eq!(tree.range_query(&window).count(), 5);
//!
//! // Two nearest points to the origin
//! let nearest = tree.nearest(&[0.0, 0.0], 2);
//! assert_eq!(nearest[0].point.data, 0);
//! assert_eq!(nearest[1].point.data, 1);
//!
//! // Remove by coordinates
//! assert!(tree.remove_at(&[3.0, 3.0]));
//! assert_eq!(tree.len(), 4);
//! ```
//!
//! ## How It Works
//!
//! Every node covers an axis-aligned region. A leaf stores points until it
//! would exceed its capacity, then splits into `2^D` equal children by
//! bisecting each axis at its center, and hands its points down. Regions are
//! half-open (`[min, max)` per axis), so a point on a split plane belongs to
//! exactly one child: the upper one.
//!
//! Queries descend from the root and skip every subtree whose region cannot
//! contribute. Nodes never merge back on their own; [`Tree::collapse`] does
//! that on request.

pub mod error;
pub mod geometry;
mod node;
pub mod prelude;
pub mod queries;
pub mod tree;

mod comparison_tests;

pub use error::{Error, Result};
pub use geometry::{QueryShape, Region, Sphere, distance_squared};
pub use queries::{Iter, Neighbor, RangeIter};
pub use tree::{MAX_DEPTH_LIMIT, Octree, Point, Quadtree, Tree, TreeConfig};
