use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OhlcvSeries, Price, Result,
    error::{ensure_hlc, ensure_len, ensure_period},
    sma::sma,
    stats::{highest_unchecked, lowest_unchecked},
};

/// Configuration for the [`Stochastic`] oscillator.
///
/// Defaults: `%K` window 14, `%K` smoothing 3, `%D` smoothing 3.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochasticConfig {
    length: usize,
    smooth_k: usize,
    smooth_d: usize,
}

impl StochasticConfig {
    /// Look-back window of the raw `%K`.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// SMA period applied to raw `%K`.
    #[inline]
    #[must_use]
    pub fn smooth_k(&self) -> usize {
        self.smooth_k
    }

    /// SMA period applied to smoothed `%K` to form `%D`.
    #[inline]
    #[must_use]
    pub fn smooth_d(&self) -> usize {
        self.smooth_d
    }
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IndicatorConfig for StochasticConfig {
    type Builder = StochasticConfigBuilder;

    fn builder() -> Self::Builder {
        StochasticConfigBuilder {
            length: 14,
            smooth_k: 3,
            smooth_d: 3,
        }
    }

    #[inline]
    fn required_bars(&self) -> usize {
        self.length
            .saturating_add(self.smooth_k)
            .saturating_add(self.smooth_d)
            - 2
    }
}

impl Display for StochasticConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochasticConfig({}, {}, {})",
            self.length, self.smooth_k, self.smooth_d
        )
    }
}

/// Builder for [`StochasticConfig`].
pub struct StochasticConfigBuilder {
    length: usize,
    smooth_k: usize,
    smooth_d: usize,
}

impl StochasticConfigBuilder {
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn smooth_k(mut self, smooth_k: NonZero<usize>) -> Self {
        self.smooth_k = smooth_k.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn smooth_d(mut self, smooth_d: NonZero<usize>) -> Self {
        self.smooth_d = smooth_d.get();
        self
    }
}

impl IndicatorConfigBuilder<StochasticConfig> for StochasticConfigBuilder {
    #[inline]
    fn build(self) -> StochasticConfig {
        StochasticConfig {
            length: self.length,
            smooth_k: self.smooth_k,
            smooth_d: self.smooth_d,
        }
    }
}

/// Trailing stochastic oscillator values, both in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochasticValue {
    k: f64,
    d: f64,
}

impl StochasticValue {
    /// Smoothed `%K`.
    #[inline]
    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// `%D`: SMA of smoothed `%K`.
    #[inline]
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }
}

impl Display for StochasticValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stoch(k: {}, d: {})", self.k, self.d)
    }
}

/// Trailing slow stochastic oscillator.
///
/// ```text
/// raw %K[i] = 100 × (close[i] − lowest low) / (highest high − lowest low)
/// %K        = SMA(raw %K, smooth_k)
/// %D        = SMA(%K, smooth_d)
/// ```
///
/// A flat window (highest high equals lowest low) has no defined position
/// and yields a raw `%K` of `50`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on a zero period,
///   mismatched lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than `period + smooth_k + smooth_d − 2` bars are supplied.
pub fn stochastic(
    high: &[Price],
    low: &[Price],
    close: &[Price],
    period: usize,
    smooth_k: usize,
    smooth_d: usize,
) -> Result<StochasticValue> {
    ensure_period("stochastic", "period", period)?;
    ensure_period("stochastic", "smooth_k", smooth_k)?;
    ensure_period("stochastic", "smooth_d", smooth_d)?;
    ensure_hlc("stochastic", high, low, close)?;
    let required = period.saturating_add(smooth_k).saturating_add(smooth_d) - 2;
    ensure_len("stochastic", required, close.len())?;

    let raw_k: Vec<f64> = (period - 1..close.len())
        .map(|i| {
            let start = i + 1 - period;
            let highest_high = highest_unchecked(&high[start..=i]);
            let lowest_low = lowest_unchecked(&low[start..=i]);
            let range = highest_high - lowest_low;

            if range == 0.0 {
                tracing::debug!(bar = i, "stochastic: flat window, resolving %K to 50");
                return 50.0;
            }

            100.0 * (close[i] - lowest_low) / range
        })
        .collect();

    let smoothed_k = sma(&raw_k, smooth_k)?;
    let d = sma(&smoothed_k, smooth_d)?;

    Ok(StochasticValue {
        k: smoothed_k[smoothed_k.len() - 1],
        d: d[d.len() - 1],
    })
}

/// Stochastic Oscillator (%K / %D).
#[derive(Clone, Debug)]
pub struct Stochastic {
    config: StochasticConfig,
}

impl Indicator for Stochastic {
    type Config = StochasticConfig;
    type Output = StochasticValue;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        stochastic(
            series.high(),
            series.low(),
            series.close(),
            self.config.length,
            self.config.smooth_k,
            self.config.smooth_d,
        )
    }
}

impl Display for Stochastic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "STOCH({}, {}, {})",
            self.config.length, self.config.smooth_k, self.config.smooth_d
        )
    }
}
