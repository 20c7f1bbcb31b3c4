//! Toward-zero truncation
//!
//! Every fractional rebirth value is quantized with this one primitive.
//! It must never be swapped for `round` or `floor`: the integer and
//! two-decimal applied values may only differ by this exact rule, and that
//! difference is carried into the next stage's real stats.

/// Truncate `value` toward zero, keeping `digits` decimal digits.
///
/// Computes `trunc(value * 10^digits) / 10^digits`, so `-2.999` at two
/// digits becomes `-2.99`, not `-3.00`.
pub fn trunc(value: f64, digits: u32) -> f64 {
    let multiplier = 10f64.powi(digits as i32);
    (value * multiplier).trunc() / multiplier
}

/// Truncate toward zero to a whole number
pub fn trunc_whole(value: f64) -> f64 {
    trunc(value, 0)
}
