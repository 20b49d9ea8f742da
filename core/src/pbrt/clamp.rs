//! Clamp

use num_traits::Num;

/// Clamps a value x to [min, max].
///
/// See https://github.com/rust-lang/rust/issues/44095
///
/// * `x` - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}
