use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_len, ensure_period},
    indicator::period_config,
    smoothing::wilder,
};

period_config! {
    /// Configuration for the Relative Strength Index ([`Rsi`]) indicator.
    ///
    /// # Convergence
    ///
    /// RSI needs `length + 1` bars: `length` price changes seed Wilder's
    /// averages. Every later bar feeds the recursive smoothing, so the whole
    /// history influences the result.
    ///
    /// # Example
    ///
    /// ```
    /// use quantedge_engine::{IndicatorConfig, RsiConfig};
    /// use std::num::NonZero;
    ///
    /// let config = RsiConfig::close(NonZero::new(14).unwrap());
    /// assert_eq!(config.length(), 14);
    /// assert_eq!(config.required_bars(), 15);
    /// ```
    sourced RsiConfig, RsiConfigBuilder {
        label: "Rsi",
        default_length: 14,
        required_bars: |config| config.length.saturating_add(1),
    }
}

/// Trailing Relative Strength Index.
///
/// Per-bar gains and losses are Wilder-smoothed over `period`, then
/// `RSI = 100 − 100 / (1 + avg_gain / avg_loss)`.
///
/// A window with no losses (only rises, or flat) resolves to `100` instead
/// of `NaN`/`∞`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `period` is zero.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if
///   `prices.len() < period + 1`.
pub fn rsi(prices: &[Price], period: usize) -> Result<f64> {
    ensure_period("rsi", "period", period)?;
    ensure_len("rsi", period.saturating_add(1), prices.len())?;

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let avg_gain = wilder(&gains, period)?;
    let avg_loss = wilder(&losses, period)?;

    Ok(rsi_from_averages(avg_gain, avg_loss))
}

#[inline]
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        tracing::debug!(avg_gain, "rsi: zero average loss, resolving to 100");
        return 100.0;
    }

    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Relative Strength Index (RSI).
///
/// Wilder-smoothed momentum oscillator bounded to `[0, 100]`. Output is the
/// trailing value (see [`rsi`]).
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        rsi(&series.source(self.config.source()), self.config.length())
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length(), self.config.source())
    }
}
