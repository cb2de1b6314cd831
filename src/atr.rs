use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{Error, ensure_hlc, ensure_len, ensure_period},
    indicator::period_config,
    smoothing::{true_range_unchecked, wilder},
};

period_config! {
    /// Configuration for the Average True Range ([`Atr`]) indicator.
    ///
    /// # Example
    ///
    /// ```
    /// use quantedge_engine::{AtrConfig, IndicatorConfig};
    ///
    /// let config = AtrConfig::default();
    /// assert_eq!(config.length(), 14);
    /// assert_eq!(config.required_bars(), 14);
    /// ```
    hlc AtrConfig, AtrConfigBuilder {
        label: "Atr",
        default_length: 14,
        required_bars: |config| config.length,
    }
}

period_config! {
    /// Configuration for the Normalized Average True Range ([`Natr`]).
    hlc NatrConfig, NatrConfigBuilder {
        label: "Natr",
        default_length: 14,
        required_bars: |config| config.length,
    }
}

/// Trailing Average True Range: Wilder-smoothed true range.
///
/// The first bar's true range is `high − low` (no previous close).
///
/// # Errors
///
/// - [`Error::InvalidInput`] on a zero period, mismatched lengths or
///   `high < low`.
/// - [`Error::InsufficientData`] if fewer than `period` bars are supplied.
pub fn atr(high: &[Price], low: &[Price], close: &[Price], period: usize) -> Result<Price> {
    ensure_period("atr", "period", period)?;
    ensure_hlc("atr", high, low, close)?;
    ensure_len("atr", period, close.len())?;

    wilder(&true_range_unchecked(high, low, close), period)
}

/// Trailing Normalized ATR: `ATR / close × 100`, using the last close.
///
/// # Errors
///
/// Same as [`atr`], plus [`Error::DegenerateComputation`] when the last
/// close is zero.
pub fn natr(high: &[Price], low: &[Price], close: &[Price], period: usize) -> Result<f64> {
    let atr = atr(high, low, close, period)?;
    let last_close = close[close.len() - 1];

    if last_close == 0.0 {
        return Err(Error::DegenerateComputation {
            indicator: "natr",
            reason: "last close is zero",
        });
    }

    Ok(atr / last_close * 100.0)
}

/// Average True Range (ATR).
#[derive(Clone, Debug)]
pub struct Atr {
    config: AtrConfig,
}

impl Indicator for Atr {
    type Config = AtrConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        atr(
            series.high(),
            series.low(),
            series.close(),
            self.config.length(),
        )
    }
}

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({})", self.config.length())
    }
}

/// Normalized Average True Range (NATR), ATR as a percentage of price.
#[derive(Clone, Debug)]
pub struct Natr {
    config: NatrConfig,
}

impl Indicator for Natr {
    type Config = NatrConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        natr(
            series.high(),
            series.low(),
            series.close(),
            self.config.length(),
        )
    }
}

impl Display for Natr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NATR({})", self.config.length())
    }
}
