use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_high_low, ensure_len, ensure_period, ensure_same_len},
    indicator::period_config,
    stats::len_f64,
};

period_config! {
    /// Configuration for the [`Aroon`] indicator.
    ///
    /// The look-back spans `length + 1` bars so that the extreme can sit
    /// anywhere from `0` to `length` bars ago.
    hlc AroonConfig, AroonConfigBuilder {
        label: "Aroon",
        default_length: 14,
        required_bars: |config| config.length.saturating_add(1),
    }
}

/// Trailing Aroon values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AroonValue {
    up: f64,
    down: f64,
    oscillator: f64,
}

impl AroonValue {
    /// Aroon Up, in `[0, 100]`. `100` means the highest high is the
    /// current bar.
    #[inline]
    #[must_use]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Aroon Down, in `[0, 100]`.
    #[inline]
    #[must_use]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// `up − down`, in `[-100, 100]`.
    #[inline]
    #[must_use]
    pub fn oscillator(&self) -> f64 {
        self.oscillator
    }
}

impl Display for AroonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Aroon(up: {}, down: {}, osc: {})",
            self.up, self.down, self.oscillator
        )
    }
}

/// Trailing Aroon Up, Aroon Down and oscillator.
///
/// Over the last `period + 1` bars:
///
/// ```text
/// up   = 100 × (period − bars since highest high) / period
/// down = 100 × (period − bars since lowest low) / period
/// ```
///
/// When the extreme occurs more than once, the most recent occurrence wins.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on a zero period,
///   mismatched lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than `period + 1` bars are supplied.
pub fn aroon(high: &[Price], low: &[Price], period: usize) -> Result<AroonValue> {
    ensure_period("aroon", "period", period)?;
    ensure_same_len("aroon", &[("high", high.len()), ("low", low.len())])?;
    ensure_high_low("aroon", high, low)?;
    ensure_len("aroon", period.saturating_add(1), high.len())?;

    let start = high.len() - period - 1;
    let since_high = bars_since(&high[start..], |candidate, best| candidate >= best);
    let since_low = bars_since(&low[start..], |candidate, best| candidate <= best);

    #[allow(clippy::cast_precision_loss)]
    let length = period as f64;
    let up = 100.0 * (length - since_high) / length;
    let down = 100.0 * (length - since_low) / length;

    Ok(AroonValue {
        up,
        down,
        oscillator: up - down,
    })
}

/// Bars between the end of `window` and its most recent extreme, where
/// `replaces(candidate, best)` decides whether a later value takes over.
fn bars_since(window: &[Price], replaces: impl Fn(Price, Price) -> bool) -> f64 {
    let mut best = window[0];
    let mut best_idx = 0;

    for (i, &value) in window.iter().enumerate().skip(1) {
        if replaces(value, best) {
            best = value;
            best_idx = i;
        }
    }

    len_f64(&window[best_idx + 1..])
}

/// Aroon indicator.
#[derive(Clone, Debug)]
pub struct Aroon {
    config: AroonConfig,
}

impl Indicator for Aroon {
    type Config = AroonConfig;
    type Output = AroonValue;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        aroon(series.high(), series.low(), self.config.length())
    }
}

impl Display for Aroon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AROON({})", self.config.length())
    }
}
