//! Tree nodes: the leaf/internal state machine, splitting and removal.
//!
//! Nodes do not store their own regions. Every traversal starts from the
//! root region and derives child regions with [`Region::child`] while
//! descending, so the only per-node state is the entry list or the child
//! array.

use std::iter;
use std::mem;

use tracing::debug;

use crate::geometry::Region;
use crate::tree::{Point, TreeConfig};

/// A stored point together with its insertion sequence number.
///
/// The sequence number breaks distance ties in nearest-neighbor queries so
/// that earlier insertions win.
#[derive(Clone, Debug)]
pub(crate) struct Entry<T, const D: usize> {
    pub(crate) point: Point<T, D>,
    pub(crate) seq: u64,
}

/// A node is either a leaf holding entries or an internal node holding
/// exactly `2^D` children.
#[derive(Clone, Debug)]
pub(crate) enum Node<T, const D: usize> {
    /// Leaf node holding points directly.
    Leaf { entries: Vec<Entry<T, D>> },
    /// Internal node; child `i` owns `region.child(i)`.
    Internal { children: Box<[Node<T, D>]> },
}

impl<T, const D: usize> Node<T, D> {
    pub(crate) fn empty() -> Self {
        Self::Leaf { entries: Vec::new() }
    }

    /// Inserts `entry`, which must lie inside `region`.
    ///
    /// A leaf already holding `capacity` points splits into `2^D` children
    /// and hands every stored point, plus the new one, straight to the child
    /// that owns it. A child may therefore start out above capacity; it
    /// splits on its next insertion. Leaves at the depth cap never split and
    /// keep growing instead.
    pub(crate) fn insert(&mut self, region: &Region<D>, entry: Entry<T, D>, depth: usize, config: &TreeConfig) {
        match self {
            Self::Leaf { entries } => {
                if entries.len() < config.capacity {
                    entries.push(entry);
                    return;
                }
                if depth >= config.max_depth {
                    debug!(depth, entries = entries.len() + 1, "depth limit reached, leaf grows past capacity");
                    entries.push(entry);
                    return;
                }

                let stored = mem::take(entries);
                debug!(depth, entries = stored.len() + 1, "splitting leaf");

                let mut buckets: Vec<Vec<Entry<T, D>>> = (0..1usize << D).map(|_| Vec::new()).collect();
                for moved in stored.into_iter().chain(iter::once(entry)) {
                    buckets[region.child_index(&moved.point.position)].push(moved);
                }
                *self = Self::Internal {
                    children: buckets.into_iter().map(|entries| Self::Leaf { entries }).collect(),
                };
            }
            Self::Internal { children } => {
                let index = region.child_index(&entry.point.position);
                children[index].insert(&region.child(index), entry, depth + 1, config);
            }
        }
    }

    /// Removes the first entry in the leaf owning `position` that satisfies
    /// `matches`, and returns its point.
    ///
    /// Internal nodes are left in place even when their children empty out.
    pub(crate) fn remove<F>(&mut self, region: &Region<D>, position: &[f64; D], mut matches: F) -> Option<Point<T, D>>
    where
        F: FnMut(&Point<T, D>) -> bool,
    {
        let mut node = self;
        let mut region = *region;
        loop {
            match node {
                Self::Leaf { entries } => {
                    let index = entries.iter().position(|entry| matches(&entry.point))?;
                    return Some(entries.remove(index).point);
                }
                Self::Internal { children } => {
                    let index = region.child_index(position);
                    region = region.child(index);
                    node = &mut children[index];
                }
            }
        }
    }

    /// Walks down to the leaf owning `position`, reporting every child index
    /// taken on the way, and returns that leaf's entries.
    pub(crate) fn descend<F>(&self, region: &Region<D>, position: &[f64; D], mut visit: F) -> &[Entry<T, D>]
    where
        F: FnMut(usize),
    {
        let mut node = self;
        let mut region = *region;
        loop {
            match node {
                Self::Leaf { entries } => return entries,
                Self::Internal { children } => {
                    let index = region.child_index(position);
                    visit(index);
                    region = region.child(index);
                    node = &children[index];
                }
            }
        }
    }

    /// Merges every internal node whose subtree holds at most `capacity`
    /// points back into a single leaf.
    ///
    /// Returns `(points in subtree, internal nodes removed)`. Merged entries
    /// keep their insertion order.
    pub(crate) fn collapse(&mut self, capacity: usize) -> (usize, usize) {
        match self {
            Self::Leaf { entries } => (entries.len(), 0),
            Self::Internal { children } => {
                let mut count = 0;
                let mut removed = 0;
                for child in children.iter_mut() {
                    let (child_count, child_removed) = child.collapse(capacity);
                    count += child_count;
                    removed += child_removed;
                }
                if count > capacity {
                    return (count, removed);
                }

                // every child is a leaf by now: each holds at most `count` points
                let mut merged = Vec::with_capacity(count);
                for child in children.iter_mut() {
                    if let Self::Leaf { entries } = child {
                        merged.append(entries);
                    }
                }
                merged.sort_by_key(|entry| entry.seq);
                *self = Self::Leaf { entries: merged };
                (count, removed + 1)
            }
        }
    }

    /// Deepest level below this node; a leaf has depth 0.
    pub(crate) fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { children } => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub(crate) fn node_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { children } => 1 + children.iter().map(Self::node_count).sum::<usize>(),
        }
    }
}
