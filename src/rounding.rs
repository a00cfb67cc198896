//! Round-half-away-from-zero integer division.

use num_traits::{PrimInt, Signed};

/// Divides `numerator` by `denominator` and rounds the result to the
/// nearest integer, ties rounding away from zero.
///
/// For instance `10 / 4 = 2.5` rounds to `3`, and `-10 / 4 = -2.5` rounds
/// to `-3`. The whole computation stays in the integer domain; there is no
/// intermediate conversion to floating point, so this remains exact for
/// arbitrarily large inputs (up to what the integer type itself can hold).
///
/// Undefined for `denominator == 0`. Overflow of the true mathematical
/// result beyond the representable range is the caller's responsibility
/// to avoid; this function does not detect it.
#[inline]
pub fn round_divide<T>(numerator: T, denominator: T) -> T
where
    T: PrimInt + Signed,
{
    let zero = T::zero();
    if (numerator < zero) ^ (denominator < zero) {
        (numerator - denominator / (T::one() + T::one())) / denominator
    } else {
        (numerator + denominator / (T::one() + T::one())) / denominator
    }
}
