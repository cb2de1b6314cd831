use crate::{
    PriceSource,
    error::{Error, Result, ensure_len},
};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Must be non-decreasing across a series. The engine never sorts.
pub type Timestamp = u64;

/// OHLCV bar data used as input to series-driven indicators.
///
/// Implement this on your own kline/candle type to avoid per-bar conversion
/// before building an [`OhlcvSeries`].
///
/// # Example
///
/// ```
/// use quantedge_engine::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64, v: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
///     fn volume(&self) -> f64 { self.v }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp or sequence number.
    fn open_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    ///
    /// Override this for volume-dependent indicators (OBV, MFI, VWAP).
    fn volume(&self) -> f64 {
        0.0
    }
}

/// One time-ordered OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    pub open_time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl Ohlcv for Bar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    #[inline]
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Column view over a sequence of bars.
///
/// Every column has the same length and index `0` is the oldest bar. Built
/// once per call and discarded afterwards; indicators only borrow it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OhlcvSeries {
    open_time: Vec<Timestamp>,
    open: Vec<Price>,
    high: Vec<Price>,
    low: Vec<Price>,
    close: Vec<Price>,
    volume: Vec<f64>,
}

impl OhlcvSeries {
    /// Splits bars into aligned columns.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientData`] if `bars` is empty.
    /// - [`Error::InvalidInput`] if `open_time` decreases or a bar has
    ///   `high < low`.
    pub fn from_bars<B: Ohlcv>(bars: &[B]) -> Result<Self> {
        ensure_len("series", 1, bars.len())?;

        let mut series = Self {
            open_time: Vec::with_capacity(bars.len()),
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
        };

        for (i, bar) in bars.iter().enumerate() {
            if let Some(&last) = series.open_time.last()
                && bar.open_time() < last
            {
                return Err(Error::invalid(
                    "series",
                    format!(
                        "open_time must be non-decreasing: bar {i} has {} after {last}",
                        bar.open_time()
                    ),
                ));
            }

            if bar.high() < bar.low() {
                return Err(Error::invalid(
                    "series",
                    format!(
                        "high < low at bar {i}: high={}, low={}",
                        bar.high(),
                        bar.low()
                    ),
                ));
            }

            series.open_time.push(bar.open_time());
            series.open.push(bar.open());
            series.high.push(bar.high());
            series.low.push(bar.low());
            series.close.push(bar.close());
            series.volume.push(bar.volume());
        }

        Ok(series)
    }

    /// Number of bars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn open_time(&self) -> &[Timestamp] {
        &self.open_time
    }

    #[inline]
    #[must_use]
    pub fn open(&self) -> &[Price] {
        &self.open
    }

    #[inline]
    #[must_use]
    pub fn high(&self) -> &[Price] {
        &self.high
    }

    #[inline]
    #[must_use]
    pub fn low(&self) -> &[Price] {
        &self.low
    }

    #[inline]
    #[must_use]
    pub fn close(&self) -> &[Price] {
        &self.close
    }

    #[inline]
    #[must_use]
    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Extracts a derived price series, one value per bar.
    #[must_use]
    pub fn source(&self, source: PriceSource) -> Vec<Price> {
        (0..self.len())
            .map(|i| {
                source.extract(
                    self.open[i],
                    self.high[i],
                    self.low[i],
                    self.close[i],
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::ohlc;

    #[test]
    fn splits_bars_into_columns() {
        let bars = [
            ohlc(1, 10.0, 12.0, 9.0, 11.0, 100.0),
            ohlc(2, 11.0, 13.0, 10.0, 12.0, 200.0),
        ];

        let series = OhlcvSeries::from_bars(&bars).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.open_time(), &[1, 2]);
        assert_eq!(series.open(), &[10.0, 11.0]);
        assert_eq!(series.high(), &[12.0, 13.0]);
        assert_eq!(series.low(), &[9.0, 10.0]);
        assert_eq!(series.close(), &[11.0, 12.0]);
        assert_eq!(series.volume(), &[100.0, 200.0]);
    }

    #[test]
    fn equal_timestamps_accepted() {
        let bars = [
            ohlc(1, 10.0, 10.0, 10.0, 10.0, 1.0),
            ohlc(1, 10.0, 10.0, 10.0, 10.0, 1.0),
        ];
        assert!(OhlcvSeries::from_bars(&bars).is_ok());
    }

    #[test]
    fn empty_rejected() {
        let bars: [Bar; 0] = [];
        assert!(matches!(
            OhlcvSeries::from_bars(&bars),
            Err(Error::InsufficientData { required: 1, actual: 0, .. })
        ));
    }

    #[test]
    fn decreasing_timestamp_rejected() {
        let bars = [
            ohlc(5, 10.0, 10.0, 10.0, 10.0, 1.0),
            ohlc(4, 10.0, 10.0, 10.0, 10.0, 1.0),
        ];
        let err = OhlcvSeries::from_bars(&bars).unwrap_err();
        assert!(err.to_string().contains("non-decreasing"), "{err}");
    }

    #[test]
    fn inverted_bar_rejected() {
        let bars = [ohlc(1, 10.0, 9.0, 11.0, 10.0, 1.0)];
        let err = OhlcvSeries::from_bars(&bars).unwrap_err();
        assert!(err.to_string().contains("high < low at bar 0"), "{err}");
    }

    #[test]
    fn source_extracts_typical_price() {
        let bars = [ohlc(1, 0.0, 30.0, 6.0, 18.0, 1.0)];
        let series = OhlcvSeries::from_bars(&bars).unwrap();
        assert_eq!(series.source(PriceSource::HLC3), vec![18.0]);
        assert_eq!(series.source(PriceSource::Close), vec![18.0]);
        assert_eq!(series.source(PriceSource::HL2), vec![18.0]);
    }
}
