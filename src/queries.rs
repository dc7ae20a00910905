//! Query implementations for [`Tree`]
//!
//! Range search, iteration, exact-coordinate lookup, path tracking and
//! k-nearest-neighbor search. None of these methods mutate the tree, so a
//! shared `&Tree` may be queried from several threads at once.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::slice;

use crate::geometry::{QueryShape, Region, distance_squared};
use crate::node::{Entry, Node};
use crate::tree::{Point, Tree};

/// A point returned by [`Tree::nearest`] with its distance to the query.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, T, const D: usize> {
    /// The stored point.
    pub point: &'a Point<T, D>,
    /// Euclidean distance from the query position.
    pub distance: f64,
}

impl<T, const D: usize> Clone for Neighbor<'_, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const D: usize> Copy for Neighbor<'_, T, D> {}

/// Lazy iterator over the points matched by [`Tree::range_query`].
///
/// Traversal advances only as items are pulled. The iterator borrows the
/// tree, so the tree cannot change while it is alive.
#[derive(Debug)]
pub struct RangeIter<'a, T, S: ?Sized, const D: usize> {
    shape: &'a S,
    stack: Vec<(&'a Node<T, D>, Region<D>)>,
    current: slice::Iter<'a, Entry<T, D>>,
}

impl<'a, T, S, const D: usize> Iterator for RangeIter<'a, T, S, D>
where
    S: QueryShape<D> + ?Sized,
{
    type Item = &'a Point<T, D>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for entry in self.current.by_ref() {
                if self.shape.contains_point(&entry.point.position) {
                    return Some(&entry.point);
                }
            }

            let (node, region) = self.stack.pop()?;
            match node {
                Node::Leaf { entries } => self.current = entries.iter(),
                Node::Internal { children } => {
                    // reversed so that child 0 is visited first
                    for (index, child) in children.iter().enumerate().rev() {
                        let child_region = region.child(index);
                        if self.shape.intersects_region(&child_region) {
                            self.stack.push((child, child_region));
                        }
                    }
                }
            }
        }
    }
}

/// Iterator over every stored point, see [`Tree::iter`].
#[derive(Debug)]
pub struct Iter<'a, T, const D: usize> {
    stack: Vec<&'a Node<T, D>>,
    current: slice::Iter<'a, Entry<T, D>>,
    remaining: usize,
}

impl<'a, T, const D: usize> Iterator for Iter<'a, T, D> {
    type Item = &'a Point<T, D>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                self.remaining -= 1;
                return Some(&entry.point);
            }

            match self.stack.pop()? {
                Node::Leaf { entries } => self.current = entries.iter(),
                Node::Internal { children } => self.stack.extend(children.iter().rev()),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const D: usize> ExactSizeIterator for Iter<'_, T, D> {}

/// Heap entry for k-nearest search: ordered by distance, then by insertion
/// sequence, so the heap top is the current worst candidate.
struct Candidate<'a, T, const D: usize> {
    distance_sq: f64,
    seq: u64,
    point: &'a Point<T, D>,
}

impl<T, const D: usize> PartialEq for Candidate<'_, T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, const D: usize> Eq for Candidate<'_, T, D> {}

impl<T, const D: usize> PartialOrd for Candidate<'_, T, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, const D: usize> Ord for Candidate<'_, T, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq
            .total_cmp(&other.distance_sq)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<T, const D: usize> Tree<T, D> {
    /// Lazily yields every stored point inside `shape`.
    ///
    /// Subtrees whose region does not intersect the shape are skipped; points
    /// in surviving leaves are tested individually. Each stored point is
    /// yielded at most once. Call again to restart.
    ///
    /// # Examples
    /// ```
    /// use orthtree::prelude::*;
    ///
    /// let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
    /// let mut tree = Quadtree::new(bounds, 4, 8).unwrap();
    /// for i in 0..10 {
    ///     tree.insert([i as f64 * 10.0, 5.0], i);
    /// }
    ///
    /// let window = Region::from_corners([0.0, 0.0], [30.0, 10.0]).unwrap();
    /// let mut found: Vec<i32> = tree.range_query(&window).map(|p| p.data).collect();
    /// found.sort();
    /// assert_eq!(found, vec![0, 1, 2]);
    ///
    /// let circle = Sphere::new([50.0, 5.0], 10.0).unwrap();
    /// assert_eq!(tree.range_query(&circle).count(), 3);
    /// ```
    pub fn range_query<'a, S>(&'a self, shape: &'a S) -> RangeIter<'a, T, S, D>
    where
        S: QueryShape<D> + ?Sized,
    {
        let mut stack = Vec::new();
        if shape.intersects_region(&self.bounds) {
            stack.push((&self.root, self.bounds));
        }
        RangeIter {
            shape,
            stack,
            current: Default::default(),
        }
    }

    /// Iterates over every stored point in depth-first leaf order.
    pub fn iter(&self) -> Iter<'_, T, D> {
        Iter {
            stack: vec![&self.root],
            current: Default::default(),
            remaining: self.len(),
        }
    }

    /// Returns the first stored point whose coordinates equal `position`.
    pub fn get(&self, position: &[f64; D]) -> Option<&Point<T, D>> {
        if !self.bounds.contains(position) {
            return None;
        }
        self.root
            .descend(&self.bounds, position, |_| {})
            .iter()
            .map(|entry| &entry.point)
            .find(|point| point.position == *position)
    }

    /// Returns `true` if a point with exactly these coordinates is stored.
    pub fn find(&self, position: &[f64; D]) -> bool {
        self.get(position).is_some()
    }

    /// Child indices taken from the root down to the leaf that owns
    /// `position`, or `None` when `position` is outside the bounds.
    ///
    /// An empty path means the root is still a leaf. Bit `i` of each index
    /// is set when the step went to the upper half along axis `i`.
    ///
    /// # Examples
    /// ```
    /// use orthtree::prelude::*;
    ///
    /// let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
    /// let mut tree = Quadtree::new(bounds, 1, 8).unwrap();
    /// tree.insert([10.0, 10.0], ());
    /// tree.insert([90.0, 10.0], ());
    ///
    /// assert_eq!(tree.track(&[90.0, 10.0]), Some(vec![0b01]));
    /// assert_eq!(tree.track(&[150.0, 10.0]), None);
    /// ```
    pub fn track(&self, position: &[f64; D]) -> Option<Vec<usize>> {
        if !self.bounds.contains(position) {
            return None;
        }
        let mut path = Vec::new();
        let _ = self.root.descend(&self.bounds, position, |index| path.push(index));
        Some(path)
    }

    /// The `k` stored points closest to `position`, closest first.
    ///
    /// Exact branch-and-bound search with a bounded max-heap: children are
    /// visited in order of their minimum distance to `position`, and a
    /// subtree is skipped once that distance exceeds the current k-th best.
    /// Points at equal distance are ordered by insertion, earliest first.
    ///
    /// Returns fewer than `k` results when the tree holds fewer points, and
    /// nothing when `k == 0` or `position` has a non-finite coordinate.
    ///
    /// # Examples
    /// ```
    /// use orthtree::prelude::*;
    ///
    /// let bounds = Region::from_corners([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]).unwrap();
    /// let mut tree = Octree::new(bounds, 2, 8).unwrap();
    /// tree.insert([1.0, 1.0, 1.0], "a");
    /// tree.insert([2.0, 2.0, 2.0], "b");
    /// tree.insert([9.0, 9.0, 9.0], "c");
    ///
    /// let nearest = tree.nearest(&[0.0, 0.0, 0.0], 2);
    /// let names: Vec<_> = nearest.iter().map(|n| n.point.data).collect();
    /// assert_eq!(names, vec!["a", "b"]);
    /// ```
    pub fn nearest(&self, position: &[f64; D], k: usize) -> Vec<Neighbor<'_, T, D>> {
        if k == 0 || self.is_empty() || !position.iter().all(|c| c.is_finite()) {
            return Vec::new();
        }

        let mut heap = BinaryHeap::with_capacity(k + 1);
        Self::nearest_recursive(&self.root, self.bounds, position, k, &mut heap);

        heap.into_sorted_vec()
            .into_iter()
            .map(|candidate| Neighbor {
                point: candidate.point,
                distance: candidate.distance_sq.sqrt(),
            })
            .collect()
    }

    /// The single closest stored point, if any.
    pub fn nearest_one(&self, position: &[f64; D]) -> Option<Neighbor<'_, T, D>> {
        self.nearest(position, 1).into_iter().next()
    }

    fn nearest_recursive<'a>(
        node: &'a Node<T, D>,
        region: Region<D>,
        position: &[f64; D],
        k: usize,
        heap: &mut BinaryHeap<Candidate<'a, T, D>>,
    ) {
        match node {
            Node::Leaf { entries } => {
                for entry in entries {
                    let candidate = Candidate {
                        distance_sq: distance_squared(&entry.point.position, position),
                        seq: entry.seq,
                        point: &entry.point,
                    };
                    if heap.len() < k {
                        heap.push(candidate);
                    } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                        let _ = heap.pop();
                        heap.push(candidate);
                    }
                }
            }
            Node::Internal { children } => {
                // fan-out is at most 8 (D <= 3)
                let mut order = [(0.0_f64, 0_usize); 8];
                let fan_out = children.len();
                for (index, slot) in order.iter_mut().take(fan_out).enumerate() {
                    *slot = (region.child(index).min_distance_squared(position), index);
                }
                order[..fan_out].sort_by(|a, b| a.0.total_cmp(&b.0));

                for &(bound_sq, index) in &order[..fan_out] {
                    let full = heap.len() >= k;
                    if full && heap.peek().is_some_and(|worst| bound_sq > worst.distance_sq) {
                        // children are sorted, so every later one is farther still
                        break;
                    }
                    Self::nearest_recursive(&children[index], region.child(index), position, k, heap);
                }
            }
        }
    }
}

impl<'a, T, const D: usize> IntoIterator for &'a Tree<T, D> {
    type Item = &'a Point<T, D>;
    type IntoIter = Iter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
