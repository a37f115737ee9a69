//! Approximate comparison functions that automatically use [`EPSILON`].

use crate::{EPSILON, Float};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq(a: Float, b: Float) -> bool {
    // use native float equality to handle infinities
    a == b || (a - b).abs() <= EPSILON
}

/// Returns whether `x` has an absolute value greater than `EPSILON`.
pub fn is_approx_nonzero(x: Float) -> bool {
    !approx_eq(x, 0.0)
}
/// Returns whether `x` is less than `-EPSILON`.
pub fn is_approx_negative(x: Float) -> bool {
    x < 0.0 && is_approx_nonzero(x)
}
/// Returns whether `x` is greater than `EPSILON`.
pub fn is_approx_positive(x: Float) -> bool {
    x > 0.0 && is_approx_nonzero(x)
}

/// Returns `f` as an integer if it is approximately equal to one.
pub fn to_approx_integer(f: Float) -> Option<i64> {
    let i = f.round() as i64;
    approx_eq(f, i as Float).then_some(i)
}

/// Divides `a` by `b`, returning `None` if the result is not finite.
pub fn try_div(a: Float, b: Float) -> Option<Float> {
    let ret = a / b;
    ret.is_finite().then_some(ret)
}
