//! Common

use super::clamp::*;
use std::ops::{Add, Mul};

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Bisects the index range [0, size) and returns the first index for which
/// `pred` is false, or `size` if it holds everywhere. `pred` must be true for
/// a prefix of the range and false for the rest.
///
/// * `size` - Size of array.
/// * `pred` - Function that tests the value at a given index.
pub fn partition_point<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    first
}

/// Emulates the behavior of `lower_bound` on a non-decreasing sequence and
/// returns the first index whose value reaches or exceeds `value`. The result
/// is clamped to [0, size - 1] so values past the last entry (rounding near
/// 1.0 in a CDF) map to the last index.
///
/// * `size`  - Size of array; must be at least 1.
/// * `value` - The value to search for.
/// * `at`    - Function that returns a value at a given index.
pub fn lower_bound<F>(size: usize, value: Float, at: F) -> usize
where
    F: Fn(usize) -> Float,
{
    let first = partition_point(size, |index| at(index) < value);
    clamp(first, 0, size - 1)
}
