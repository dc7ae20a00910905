//! Geometry primitives: axis-aligned regions, spheres and distance helpers.
//!
//! Regions use a half-open membership rule on every axis: a point belongs to
//! a region when `min <= p < max`. Sibling regions produced by [`Region::child`]
//! share faces, and the half-open rule assigns every point on a shared face to
//! exactly one sibling (the upper one).
//!
//! Intersection tests are inclusive so that a query touching a region's face
//! is never pruned. False positives only cost a little traversal; false
//! negatives would drop results.

use crate::error::{Error, Result};

/// Axis-aligned box described by a center and per-axis half-extents.
///
/// The lower and upper corners are kept alongside the center so that child
/// regions are built from exact corner values. This keeps
/// [`Region::child_index`] and [`Region::contains`] on the children in exact
/// agreement, even where `center ± half_extent` would round differently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region<const D: usize> {
    center: [f64; D],
    half_extents: [f64; D],
    min: [f64; D],
    max: [f64; D],
}

impl<const D: usize> Region<D> {
    /// Creates a region from its center and half-extents.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRegion`] when a half-extent is not strictly
    /// positive and finite, or when the center or a derived corner has a
    /// non-finite coordinate.
    ///
    /// # Examples
    /// ```
    /// use orthtree::Region;
    ///
    /// let region = Region::new([50.0, 50.0], [50.0, 50.0]).unwrap();
    /// assert!(region.contains(&[0.0, 99.9]));
    /// assert!(!region.contains(&[100.0, 10.0]));
    /// ```
    pub fn new(center: [f64; D], half_extents: [f64; D]) -> Result<Self> {
        for axis in 0..D {
            let half_extent = half_extents[axis];
            if !(half_extent > 0.0 && half_extent.is_finite() && center[axis].is_finite()) {
                return Err(Error::InvalidRegion { axis, half_extent });
            }
        }

        let mut min = [0.0; D];
        let mut max = [0.0; D];
        for axis in 0..D {
            min[axis] = center[axis] - half_extents[axis];
            max[axis] = center[axis] + half_extents[axis];
            if !(min[axis].is_finite() && max[axis].is_finite()) {
                return Err(Error::InvalidRegion {
                    axis,
                    half_extent: half_extents[axis],
                });
            }
        }

        Ok(Self { center, half_extents, min, max })
    }

    /// Creates a region spanning `[min, max)` on every axis.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRegion`] when `max <= min` on some axis or a
    /// corner is not finite.
    ///
    /// # Examples
    /// ```
    /// use orthtree::Region;
    ///
    /// let region = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
    /// assert_eq!(region.center(), [50.0, 50.0]);
    /// assert_eq!(region.half_extents(), [50.0, 50.0]);
    /// ```
    pub fn from_corners(min: [f64; D], max: [f64; D]) -> Result<Self> {
        let mut center = [0.0; D];
        let mut half_extents = [0.0; D];
        for axis in 0..D {
            // halve before subtracting: `max - min` overflows for corners near f64::MAX
            let half_extent = max[axis] * 0.5 - min[axis] * 0.5;
            if !(half_extent > 0.0 && min[axis].is_finite() && max[axis].is_finite()) {
                return Err(Error::InvalidRegion { axis, half_extent });
            }
            center[axis] = min[axis] * 0.5 + max[axis] * 0.5;
            half_extents[axis] = half_extent;
        }

        Ok(Self { center, half_extents, min, max })
    }

    /// Center of the region.
    pub fn center(&self) -> [f64; D] {
        self.center
    }

    /// Half-extent of the region along each axis.
    pub fn half_extents(&self) -> [f64; D] {
        self.half_extents
    }

    /// Lower (inclusive) corner.
    pub fn min(&self) -> [f64; D] {
        self.min
    }

    /// Upper (exclusive) corner.
    pub fn max(&self) -> [f64; D] {
        self.max
    }

    /// Returns `true` if `point` lies in `[min, max)` on every axis.
    ///
    /// A NaN coordinate is never contained.
    #[inline]
    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|axis| self.min[axis] <= point[axis] && point[axis] < self.max[axis])
    }

    /// Returns `true` if the two regions share at least one point.
    ///
    /// Touching faces count as intersecting.
    #[inline]
    pub fn intersects_region(&self, other: &Self) -> bool {
        (0..D).all(|axis| self.min[axis] <= other.max[axis] && other.min[axis] <= self.max[axis])
    }

    /// Returns `true` if `other` lies entirely inside this region.
    pub fn encloses(&self, other: &Self) -> bool {
        (0..D).all(|axis| self.min[axis] <= other.min[axis] && other.max[axis] <= self.max[axis])
    }

    /// Index of the child region that owns `point` under the half-open rule.
    ///
    /// Bit `i` of the result is set when `point[i] >= center[i]`. The caller
    /// is expected to have checked `self.contains(point)`.
    #[inline]
    pub fn child_index(&self, point: &[f64; D]) -> usize {
        let mut index = 0;
        for axis in 0..D {
            if point[axis] >= self.center[axis] {
                index |= 1 << axis;
            }
        }
        index
    }

    /// The `index`-th of the `2^D` equal sub-regions obtained by bisecting
    /// every axis at the center.
    ///
    /// Bit `i` of `index` selects the upper half (`[center, max)`) along axis
    /// `i`; a clear bit selects the lower half (`[min, center)`).
    ///
    /// # Examples
    /// ```
    /// use orthtree::Region;
    ///
    /// let region = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
    /// let upper_x = region.child(0b01);
    /// assert_eq!(upper_x.min(), [50.0, 0.0]);
    /// assert_eq!(upper_x.max(), [100.0, 50.0]);
    /// ```
    pub fn child(&self, index: usize) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        let mut center = [0.0; D];
        let mut half_extents = [0.0; D];
        for axis in 0..D {
            if index & (1 << axis) != 0 {
                min[axis] = self.center[axis];
            } else {
                max[axis] = self.center[axis];
            }
            half_extents[axis] = self.half_extents[axis] * 0.5;
            center[axis] = min[axis] * 0.5 + max[axis] * 0.5;
        }
        Self { center, half_extents, min, max }
    }

    /// Squared distance from `point` to the closest point of the region.
    ///
    /// Zero when the point lies inside (or on the boundary of) the region.
    #[inline]
    pub fn min_distance_squared(&self, point: &[f64; D]) -> f64 {
        let mut sum = 0.0;
        for axis in 0..D {
            let d = axis_distance(point[axis], self.min[axis], self.max[axis]);
            sum += d * d;
        }
        sum
    }
}

/// Closed ball used as a range query shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere<const D: usize> {
    center: [f64; D],
    radius: f64,
}

impl<const D: usize> Sphere<D> {
    /// Creates a sphere (a circle when `D == 2`).
    ///
    /// # Errors
    /// Returns [`Error::InvalidCenter`] when the center has a non-finite
    /// coordinate and [`Error::InvalidRadius`] when `radius` is negative or
    /// not finite.
    pub fn new(center: [f64; D], radius: f64) -> Result<Self> {
        if let Some(axis) = center.iter().position(|c| !c.is_finite()) {
            return Err(Error::InvalidCenter {
                axis,
                coordinate: center[axis],
            });
        }
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(Error::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Center of the sphere.
    pub fn center(&self) -> [f64; D] {
        self.center
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// A shape that range queries can prune against and test points with.
pub trait QueryShape<const D: usize> {
    /// Conservative overlap test against a node region.
    ///
    /// Must return `true` whenever the shape and the region share a point;
    /// returning `true` for a near miss is allowed.
    fn intersects_region(&self, region: &Region<D>) -> bool;

    /// Exact membership test for a stored point.
    fn contains_point(&self, point: &[f64; D]) -> bool;
}

impl<const D: usize> QueryShape<D> for Region<D> {
    fn intersects_region(&self, region: &Region<D>) -> bool {
        Self::intersects_region(self, region)
    }

    fn contains_point(&self, point: &[f64; D]) -> bool {
        self.contains(point)
    }
}

impl<const D: usize> QueryShape<D> for Sphere<D> {
    fn intersects_region(&self, region: &Region<D>) -> bool {
        region.min_distance_squared(&self.center) <= self.radius * self.radius
    }

    fn contains_point(&self, point: &[f64; D]) -> bool {
        distance_squared(&self.center, point) <= self.radius * self.radius
    }
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    let mut sum = 0.0;
    for axis in 0..D {
        let d = a[axis] - b[axis];
        sum += d * d;
    }
    sum
}

/// Get distance along an axis
#[inline]
fn axis_distance(coordinate: f64, min: f64, max: f64) -> f64 {
    if coordinate < min {
        min - coordinate
    } else if coordinate > max {
        coordinate - max
    } else {
        0.0
    }
}
