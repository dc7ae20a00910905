//! The tree: root ownership, configuration and mutation entry points.
//!
//! Query methods live in [`crate::queries`].

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::Region;
use crate::node::{Entry, Node};

const DEFAULT_CAPACITY: usize = 8;
const DEFAULT_MAX_DEPTH: usize = 16;

/// Largest `max_depth` a [`TreeConfig`] accepts.
///
/// Node operations recurse once per level. Sixty-four halvings already
/// shrink any practical root region below the spacing of distinct `f64`
/// values in it.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// A point in `D` dimensions carrying a caller-supplied payload.
///
/// Several points may share coordinates; they are told apart by payload and
/// insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<T, const D: usize> {
    /// Coordinates of the point.
    pub position: [f64; D],
    /// Caller payload (an identifier, a handle, ...).
    pub data: T,
}

impl<T, const D: usize> Point<T, D> {
    /// Creates a point.
    pub fn new(position: [f64; D], data: T) -> Self {
        Self { position, data }
    }
}

/// Subdivision policy for a [`Tree`].
///
/// # Examples
/// ```
/// use orthtree::TreeConfig;
///
/// let config = TreeConfig::default().with_capacity(4).with_max_depth(10);
/// assert_eq!(config.capacity, 4);
/// assert_eq!(config.max_depth, 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Points a leaf holds before it splits.
    pub capacity: usize,
    /// Depth at which leaves stop splitting and grow past `capacity` instead.
    /// The root sits at depth 0. At most [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl TreeConfig {
    /// Sets the leaf capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum split depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] for a zero capacity and
    /// [`Error::InvalidMaxDepth`] when `max_depth` exceeds
    /// [`MAX_DEPTH_LIMIT`].
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::InvalidMaxDepth {
                max_depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Dynamic spatial index over points in `D` dimensions: a quadtree for
/// `D == 2` and an octree for `D == 3`.
///
/// The root region is fixed at construction; points outside it are rejected.
/// Leaves split into `2^D` equal children once they would exceed the
/// configured capacity, down to the configured maximum depth.
///
/// # Examples
/// ```
/// use orthtree::prelude::*;
///
/// let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
/// let mut tree = Quadtree::new(bounds, 4, 8).unwrap();
///
/// assert!(tree.insert([10.0, 20.0], "a"));
/// assert!(tree.insert([60.0, 70.0], "b"));
/// assert!(!tree.insert([100.0, 5.0], "outside"));
///
/// let nearest = tree.nearest(&[12.0, 18.0], 1);
/// assert_eq!(nearest[0].point.data, "a");
/// ```
#[derive(Clone, Debug)]
pub struct Tree<T, const D: usize> {
    pub(crate) root: Node<T, D>,
    pub(crate) bounds: Region<D>,
    config: TreeConfig,
    len: usize,
    next_seq: u64,
}

/// Two-dimensional tree (4 children per internal node).
pub type Quadtree<T> = Tree<T, 2>;

/// Three-dimensional tree (8 children per internal node).
pub type Octree<T> = Tree<T, 3>;

impl<T, const D: usize> Tree<T, D> {
    /// Creates an empty tree covering `bounds`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] when `capacity` is zero,
    /// [`Error::InvalidMaxDepth`] when `max_depth` exceeds
    /// [`MAX_DEPTH_LIMIT`] and [`Error::UnsupportedDimension`] when `D` is
    /// not 2 or 3.
    pub fn new(bounds: Region<D>, capacity: usize, max_depth: usize) -> Result<Self> {
        Self::with_config(bounds, TreeConfig { capacity, max_depth })
    }

    /// Creates an empty tree covering `bounds` with the given policy.
    ///
    /// # Errors
    /// See [`Tree::new`].
    pub fn with_config(bounds: Region<D>, config: TreeConfig) -> Result<Self> {
        if D != 2 && D != 3 {
            return Err(Error::UnsupportedDimension(D));
        }
        config.validate()?;

        debug!(
            dimension = D,
            capacity = config.capacity,
            max_depth = config.max_depth,
            "created tree"
        );
        Ok(Self {
            root: Node::empty(),
            bounds,
            config,
            len: 0,
            next_seq: 0,
        })
    }

    /// Inserts a point, returning `false` if it lies outside the bounds.
    pub fn insert(&mut self, position: [f64; D], data: T) -> bool {
        self.try_insert(position, data).is_ok()
    }

    /// Inserts a point.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `position` is outside the root
    /// region under the half-open rule. The tree is left unchanged.
    pub fn try_insert(&mut self, position: [f64; D], data: T) -> Result<()> {
        if !self.bounds.contains(&position) {
            trace!(?position, "rejected out-of-bounds insert");
            return Err(Error::OutOfBounds {
                position: position.to_vec(),
            });
        }

        let entry = Entry {
            point: Point::new(position, data),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.root.insert(&self.bounds, entry, 0, &self.config);
        self.len += 1;
        Ok(())
    }

    /// Removes the first point stored at the leaf owning `position` for which
    /// `matches` returns `true`, and hands it back.
    ///
    /// The predicate decides what counts as a match: coordinates only,
    /// coordinates plus payload, or anything else about the point.
    pub fn take<F>(&mut self, position: &[f64; D], matches: F) -> Option<Point<T, D>>
    where
        F: FnMut(&Point<T, D>) -> bool,
    {
        if !self.bounds.contains(position) {
            return None;
        }
        let removed = self.root.remove(&self.bounds, position, matches);
        if removed.is_some() {
            self.len -= 1;
        } else {
            trace!(?position, "nothing removed");
        }
        removed
    }

    /// Like [`Tree::take`], but only reports whether something was removed.
    pub fn remove<F>(&mut self, position: &[f64; D], matches: F) -> bool
    where
        F: FnMut(&Point<T, D>) -> bool,
    {
        self.take(position, matches).is_some()
    }

    /// Removes one point whose coordinates equal `position` exactly.
    pub fn remove_at(&mut self, position: &[f64; D]) -> bool {
        self.remove(position, |point| point.position == *position)
    }

    /// Removes one point with exactly these coordinates and this payload.
    pub fn remove_item(&mut self, position: &[f64; D], data: &T) -> bool
    where
        T: PartialEq,
    {
        self.remove(position, |point| point.position == *position && point.data == *data)
    }

    /// Merges sparse subtrees back into leaves.
    ///
    /// Removal never shrinks the tree on its own; call this after heavy churn
    /// to release internal nodes whose subtrees hold at most `capacity`
    /// points. Returns the number of internal nodes removed.
    pub fn collapse(&mut self) -> usize {
        let (count, removed) = self.root.collapse(self.config.capacity);
        debug_assert_eq!(count, self.len, "stored point count drifted");
        debug!(removed, "collapsed sparse subtrees");
        removed
    }

    /// Removes every point and resets the root to an empty leaf.
    pub fn clear(&mut self) {
        self.root = Node::empty();
        self.len = 0;
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deepest realized level; a tree whose root is still a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Total number of nodes, leaves and internal.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// The root region.
    pub fn bounds(&self) -> &Region<D> {
        &self.bounds
    }

    /// The subdivision policy.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }
}
