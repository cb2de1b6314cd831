use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_len, ensure_period},
    indicator::period_config,
};

period_config! {
    /// Configuration for the Exponential Moving Average ([`Ema`])
    /// indicator.
    ///
    /// # Seeding
    ///
    /// The EMA is seeded with the first raw value of the series, not with
    /// the SMA of the first `length` values. Early values therefore carry
    /// the first bar's weight; callers that want a warm-up-excluded series
    /// slice off the leading values themselves.
    ///
    /// # Example
    ///
    /// ```
    /// use quantedge_engine::{EmaConfig, IndicatorConfig, IndicatorConfigBuilder};
    /// use std::num::NonZero;
    ///
    /// let config = EmaConfig::builder()
    ///     .length(NonZero::new(12).unwrap())
    ///     .build();
    ///
    /// assert_eq!(config.length(), 12);
    /// ```
    sourced EmaConfig, EmaConfigBuilder {
        label: "Ema",
        default_length: 20,
        required_bars: |config| config.length,
    }
}

/// Exponential moving average seeded at the first value.
///
/// ```text
/// k      = 2 / (period + 1)
/// ema[0] = series[0]
/// ema[i] = series[i] × k + ema[i-1] × (1 − k)
/// ```
///
/// Returns one value per input (no warm-up truncation).
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
/// use quantedge_engine::ema;
///
/// let values = ema(&[10.0, 20.0, 30.0], 2).unwrap();
/// assert_eq!(values[0], 10.0);
/// assert!((values[2] - 25.56).abs() < 1e-2);
/// ```
pub fn ema(series: &[Price], period: usize) -> Result<Vec<Price>> {
    ensure_period("ema", "period", period)?;
    ensure_len("ema", period, series.len())?;

    Ok(ema_unchecked(series, period))
}

/// EMA without validation. `series` must be non-empty and `period` positive.
pub(crate) fn ema_unchecked(series: &[Price], period: usize) -> Vec<Price> {
    #[allow(clippy::cast_precision_loss)]
    let k = 2.0 / (period as f64 + 1.0);
    let retain = 1.0 - k;

    let mut values = Vec::with_capacity(series.len());
    let mut prev = series[0];
    values.push(prev);

    for &price in &series[1..] {
        prev = price * k + prev * retain;
        values.push(prev);
    }

    values
}

/// Exponential Moving Average (EMA).
///
/// Full series over the configured price source (see [`ema`]).
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Vec<Price>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        ema(&series.source(self.config.source()), self.config.length())
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length(), self.config.source())
    }
}
