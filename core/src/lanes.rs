//! Lanes
//!
//! Samples are processed either one at a time (`Float`) or as a fixed width
//! group (`[Float; N]`). Both go through the same interface so sampling code
//! is written once.

use crate::pbrt::Float;

/// A group of indices processed together.
pub trait IndexLanes: Copy {
    /// Number of lanes.
    const WIDTH: usize;

    /// Returns the index stored in lane `i`.
    ///
    /// * `i` - Lane.
    fn lane(&self, i: usize) -> usize;

    /// Builds the group lane by lane.
    ///
    /// * `f` - Returns the value for a lane.
    fn from_fn<F: FnMut(usize) -> usize>(f: F) -> Self;
}

/// A group of floating point values processed together.
pub trait FloatLanes: Copy {
    /// Matching index group of the same width.
    type Indices: IndexLanes;

    /// Number of lanes.
    const WIDTH: usize;

    /// Returns the value stored in lane `i`.
    ///
    /// * `i` - Lane.
    fn lane(&self, i: usize) -> Float;

    /// Builds the group lane by lane.
    ///
    /// * `f` - Returns the value for a lane.
    fn from_fn<F: FnMut(usize) -> Float>(f: F) -> Self;
}

impl IndexLanes for usize {
    const WIDTH: usize = 1;

    #[inline(always)]
    fn lane(&self, _i: usize) -> usize {
        *self
    }

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> usize>(mut f: F) -> Self {
        f(0)
    }
}

impl FloatLanes for Float {
    type Indices = usize;
    const WIDTH: usize = 1;

    #[inline(always)]
    fn lane(&self, _i: usize) -> Float {
        *self
    }

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> Float>(mut f: F) -> Self {
        f(0)
    }
}

impl<const N: usize> IndexLanes for [usize; N] {
    const WIDTH: usize = N;

    #[inline(always)]
    fn lane(&self, i: usize) -> usize {
        self[i]
    }

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> usize>(f: F) -> Self {
        std::array::from_fn(f)
    }
}

impl<const N: usize> FloatLanes for [Float; N] {
    type Indices = [usize; N];
    const WIDTH: usize = N;

    #[inline(always)]
    fn lane(&self, i: usize) -> Float {
        self[i]
    }

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> Float>(f: F) -> Self {
        std::array::from_fn(f)
    }
}

/// Reads `array` at every index in `indices`.
///
/// Panics if an index is out of bounds.
///
/// * `array`   - Values to read from.
/// * `indices` - One index per lane.
#[inline(always)]
pub fn gather<L: FloatLanes>(array: &[Float], indices: L::Indices) -> L {
    L::from_fn(|i| array[indices.lane(i)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_scalar() {
        let v: Float = gather(&[1.0, 2.0, 3.0], 2);
        assert_eq!(v, 3.0);
    }

    #[test]
    fn gather_wide() {
        let v: [Float; 4] = gather(&[10.0, 20.0, 30.0], [2, 0, 1, 2]);
        assert_eq!(v, [30.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn lane_widths() {
        assert_eq!(<[Float; 3] as FloatLanes>::WIDTH, 3);
        assert_eq!(<Float as FloatLanes>::WIDTH, 1);
    }

    #[test]
    #[should_panic]
    #[allow(unused)]
    fn gather_out_of_bounds() {
        let v: Float = gather(&[1.0], 1);
    }
}
