//! Error types for orthtree.

use thiserror::Error;

/// Errors reported by tree construction and insertion.
///
/// Absence is not an error: removing a point that is not stored returns
/// `false` and an empty query yields no items.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The point lies outside the tree's root region (or has a NaN coordinate).
    #[error("point {position:?} is outside the tree bounds")]
    OutOfBounds {
        /// Coordinates of the rejected point.
        position: Vec<f64>,
    },

    /// A region half-extent is zero, negative or not finite.
    #[error("invalid region: half-extent {half_extent} on axis {axis} must be positive and finite")]
    InvalidRegion {
        /// Axis index of the offending extent.
        axis: usize,
        /// The rejected half-extent.
        half_extent: f64,
    },

    /// A sphere center has a NaN or infinite coordinate.
    #[error("invalid sphere center: coordinate {coordinate} on axis {axis} must be finite")]
    InvalidCenter {
        /// Axis index of the offending coordinate.
        axis: usize,
        /// The rejected coordinate.
        coordinate: f64,
    },

    /// A sphere radius is negative or not finite.
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f64),

    /// Leaf capacity must hold at least one point.
    #[error("leaf capacity must be at least 1")]
    InvalidCapacity,

    /// Maximum depth is above [`MAX_DEPTH_LIMIT`](crate::tree::MAX_DEPTH_LIMIT).
    #[error("max depth {max_depth} exceeds the limit of {limit}")]
    InvalidMaxDepth {
        /// The requested maximum depth.
        max_depth: usize,
        /// The largest accepted maximum depth.
        limit: usize,
    },

    /// Only quadtrees (2) and octrees (3) are supported.
    #[error("unsupported dimension {0}: expected 2 or 3")]
    UnsupportedDimension(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
