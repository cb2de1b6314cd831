#![allow(dead_code)]

use quantedge_engine::{Ohlcv, OhlcvSeries, Price, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// OHLCV bar parsed from the fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    pub expected: f64,
}

/// Reference BB value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefBbValue {
    pub open_time: u64,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Reference MACD value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub open_time: u64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Reference ADX value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefAdxValue {
    pub open_time: u64,
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

/// Reference stochastic value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefStochValue {
    pub open_time: u64,
    pub k: f64,
    pub d: f64,
}

const OHLCV_PATH: &str = "tests/fixtures/data/synthetic-1h.csv";

/// Load reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load reference data with a single `expected` column.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load BB reference data (upper, middle, lower).
pub fn load_bb_ref(path: &str) -> Vec<RefBbValue> {
    load_records(path, "invalid BB reference record")
}

/// Load MACD reference data (macd, signal, histogram).
pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

/// Load ADX reference data (adx, +DI, −DI).
pub fn load_adx_ref(path: &str) -> Vec<RefAdxValue> {
    load_records(path, "invalid ADX reference record")
}

/// Load stochastic reference data (%K, %D).
pub fn load_stoch_ref(path: &str) -> Vec<RefStochValue> {
    load_records(path, "invalid stochastic reference record")
}

/// Series over the first `len` bars.
pub fn prefix_series(bars: &[RefBar], len: usize) -> OhlcvSeries {
    OhlcvSeries::from_bars(&bars[..len])
        .unwrap_or_else(|e| panic!("invalid fixture prefix of {len} bars: {e}"))
}

/// Number of bars up to and including the bar opened at `open_time`.
pub fn bars_through(bars: &[RefBar], open_time: u64) -> usize {
    bars.iter()
        .position(|bar| bar.open_time == open_time)
        .unwrap_or_else(|| panic!("no bar at t={open_time}"))
        + 1
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Generate reference tests for an indicator producing one value per bar.
///
/// The output is aligned with the end of the series: its last value belongs
/// to the last bar.
///
/// Usage: `series_reference_test!(sma_20, Sma, SmaConfig::close(nz(20)), "tests/fixtures/data/sma-20-close.csv", 1e-6);`
#[allow(unused_macros)]
macro_rules! series_reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use quantedge_engine::*;
            use std::num::NonZero;

            #[allow(dead_code)]
            fn nz(n: usize) -> NonZero<usize> {
                NonZero::new(n).unwrap()
            }

            #[test]
            fn matches_reference() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let ind = <$ind>::new($config);

                let values = ind
                    .compute(&prefix_series(&bars, bars.len()))
                    .unwrap_or_else(|e| panic!("{} failed: {e}", stringify!($name)));
                assert_eq!(
                    values.len(),
                    reference.len(),
                    "output length differs from reference"
                );

                let offset = bars.len() - values.len();
                for (i, (value, expected)) in values.iter().zip(&reference).enumerate() {
                    let bar = &bars[offset + i];
                    assert_eq!(bar.open_time, expected.open_time, "misaligned at {i}");
                    assert_near(
                        *value,
                        expected.expected,
                        $tolerance,
                        &format!("{} at bar {i} (t={})", stringify!($name), bar.open_time),
                    );
                }
            }

            #[test]
            fn prefix_is_prefix_of_full_run() {
                let bars = load_reference_ohlcvs();
                let ind = <$ind>::new($config);
                let full = ind.compute(&prefix_series(&bars, bars.len())).unwrap();
                let half = ind.compute(&prefix_series(&bars, bars.len() / 2)).unwrap();

                for (i, (a, b)) in half.iter().zip(&full).enumerate() {
                    assert_near(*a, *b, $tolerance, &format!("value {i}"));
                }
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use series_reference_test;

/// Generate reference tests for a trailing single-value indicator.
///
/// Each reference row is checked against a computation over every bar up
/// to and including that row's bar. The first row must be the first bar
/// with enough history.
///
/// Usage: `trailing_reference_test!(rsi_14, Rsi, RsiConfig::close(nz(14)), "tests/fixtures/data/rsi-14-close.csv", 1e-6);`
#[allow(unused_macros)]
macro_rules! trailing_reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use quantedge_engine::*;
            use std::num::NonZero;

            #[allow(dead_code)]
            fn nz(n: usize) -> NonZero<usize> {
                NonZero::new(n).unwrap()
            }

            #[test]
            fn matches_reference() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let ind = <$ind>::new($config);

                for (ref_idx, row) in reference.iter().enumerate() {
                    let len = bars_through(&bars, row.open_time);
                    let value = ind.compute(&prefix_series(&bars, len)).unwrap_or_else(|e| {
                        panic!("{} failed at t={}: {e}", stringify!($name), row.open_time)
                    });
                    assert_near(
                        value,
                        row.expected,
                        $tolerance,
                        &format!("{} at row {ref_idx} (t={})", stringify!($name), row.open_time),
                    );
                }
            }

            #[test]
            fn first_reference_is_first_computable_bar() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let ind = <$ind>::new($config);

                let len = bars_through(&bars, reference[0].open_time);
                assert_eq!(len, ind.config().required_bars());
                assert!(matches!(
                    ind.compute(&prefix_series(&bars, len - 1)),
                    Err(Error::InsufficientData { .. })
                ));
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use trailing_reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
