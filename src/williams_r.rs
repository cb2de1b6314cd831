use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_hlc, ensure_len, ensure_period},
    indicator::period_config,
    stats::{highest_unchecked, lowest_unchecked},
};

period_config! {
    /// Configuration for the [`WilliamsR`] indicator.
    hlc WilliamsRConfig, WilliamsRConfigBuilder {
        label: "WilliamsR",
        default_length: 14,
        required_bars: |config| config.length,
    }
}

/// Trailing Williams %R, in `[-100, 0]`.
///
/// `%R = −100 × (highest high − close) / (highest high − lowest low)` over
/// the last `period` bars. A flat window resolves to `-50`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on a zero period,
///   mismatched lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than `period` bars are supplied.
pub fn williams_r(high: &[Price], low: &[Price], close: &[Price], period: usize) -> Result<f64> {
    ensure_period("williams_r", "period", period)?;
    ensure_hlc("williams_r", high, low, close)?;
    ensure_len("williams_r", period, close.len())?;

    let start = close.len() - period;
    let highest_high = highest_unchecked(&high[start..]);
    let lowest_low = lowest_unchecked(&low[start..]);
    let range = highest_high - lowest_low;

    if range == 0.0 {
        tracing::debug!("williams_r: flat window, resolving to -50");
        return Ok(-50.0);
    }

    Ok(-100.0 * (highest_high - close[close.len() - 1]) / range)
}

/// Williams %R.
#[derive(Clone, Debug)]
pub struct WilliamsR {
    config: WilliamsRConfig,
}

impl Indicator for WilliamsR {
    type Config = WilliamsRConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        williams_r(
            series.high(),
            series.low(),
            series.close(),
            self.config.length(),
        )
    }
}

impl Display for WilliamsR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WILLR({})", self.config.length())
    }
}
