// src/test_util.rs

use crate::{Bar, Indicator, Price, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

/// Asserts that two `f64` values differ by at most an absolute `tolerance`.
///
/// For results built from running sums, where cancellation leaves an error
/// larger than a few ulps of the expected value.
macro_rules! assert_near {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (a, e, t): (f64, f64, f64) = ($actual, $expected, $tolerance);
        assert!(
            (a - e).abs() <= t,
            "assert_near failed: actual={a}, expected={e}, diff={}, tolerance={t}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;
pub(crate) use assert_near;

/// Convenience: bar with just a close price and timestamp (OHLC all equal to close).
pub fn bar(close: Price, time: Timestamp) -> Bar {
    Bar::new(time, close, close, close, close, 0.0)
}

/// Feeds `values` as ticks with indices `1..=values.len()`.
pub fn feed<I: Indicator>(indicator: &mut I, values: &[Price]) {
    for (i, &value) in values.iter().enumerate() {
        indicator.receive_tick(value, i + 1);
    }
}
