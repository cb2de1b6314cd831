// src/test_util.rs

use crate::{Bar, OhlcvSeries, Price, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Asserts that two `f64` values are within an absolute tolerance.
macro_rules! assert_near {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (a, e, t): (f64, f64, f64) = ($actual, $expected, $tolerance);
        assert!(
            (a - e).abs() <= t,
            "assert_near failed: actual={a}, expected={e}, diff={} > {t}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_near;

/// Full bar.
pub fn ohlc(
    open_time: Timestamp,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: f64,
) -> Bar {
    Bar {
        open_time,
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Series of flat bars (OHLC all equal to the close), unit volume,
/// timestamps `1..=n`.
pub fn closes(prices: &[Price]) -> OhlcvSeries {
    let bars: Vec<Bar> = (1..)
        .zip(prices)
        .map(|(t, &p)| ohlc(t, p, p, p, p, 1.0))
        .collect();

    OhlcvSeries::from_bars(&bars).unwrap()
}

/// Series built from parallel high/low/close columns with unit volume.
pub fn hlc(high: &[Price], low: &[Price], close: &[Price]) -> OhlcvSeries {
    let bars: Vec<Bar> = (0..close.len())
        .map(|i| ohlc(i as u64 + 1, close[i], high[i], low[i], close[i], 1.0))
        .collect();

    OhlcvSeries::from_bars(&bars).unwrap()
}
