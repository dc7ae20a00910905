//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use orthtree::prelude::*;
//! ```

pub use crate::{Error, Neighbor, Octree, Point, QueryShape, Quadtree, Region, Sphere, Tree, TreeConfig};
