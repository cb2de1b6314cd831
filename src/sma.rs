use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_len, ensure_period},
    indicator::period_config,
    stats::mean_unchecked,
};

period_config! {
    /// Configuration for the Simple Moving Average ([`Sma`]) indicator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quantedge_engine::{IndicatorConfig, SmaConfig};
    /// use std::num::NonZero;
    ///
    /// let config = SmaConfig::close(NonZero::new(20).unwrap());
    /// assert_eq!(config.length(), 20);
    /// assert_eq!(config.required_bars(), 20);
    /// ```
    sourced SmaConfig, SmaConfigBuilder {
        label: "Sma",
        default_length: 20,
        required_bars: |config| config.length,
    }
}

/// Simple moving average over every full trailing window.
///
/// Output index `j` is the mean of `series[j..j + period]`, so the first value
/// lines up with input index `period - 1`. Length is
/// `series.len() - period + 1`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `period` is zero.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if
///   `series.len() < period`.
///
/// # Example
///
/// ```
/// use quantedge_engine::sma;
///
/// assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap(), vec![2.0, 3.0, 4.0]);
/// ```
pub fn sma(series: &[Price], period: usize) -> Result<Vec<Price>> {
    ensure_period("sma", "period", period)?;
    ensure_len("sma", period, series.len())?;

    Ok(series.windows(period).map(mean_unchecked).collect())
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of every full window of the configured
/// price source. Output is the full aligned series (see [`sma`]).
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Vec<Price>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        sma(&series.source(self.config.source()), self.config.length())
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length(), self.config.source())
    }
}
