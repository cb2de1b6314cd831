use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OhlcvSeries, Price, Result,
    error::{Error, ensure_high_low, ensure_len, ensure_same_len},
    stats::{highest_unchecked, lowest_unchecked},
};

/// Bars inspected when placing the SAR after a reversal.
const REVERSAL_LOOKBACK: usize = 5;

/// Acceleration factor parameter of the Parabolic SAR.
///
/// Wraps a positive, finite `f64`. Implements `Eq` and `Hash` via bit-level
/// comparison, which is safe because NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Acceleration(f64);

impl Acceleration {
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, infinite or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "acceleration must not be NaN");
        assert!(value.is_finite(), "acceleration must be finite");
        assert!(value > 0.0, "acceleration must be positive");
        Self(value)
    }

    /// Fallible counterpart of [`Acceleration::new`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `value` is zero, negative, infinite or NaN.
    pub fn try_new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::invalid(
                "parabolic_sar",
                format!("acceleration must be positive and finite, got {value}"),
            ));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Acceleration {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Acceleration {}

impl Hash for Acceleration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Acceleration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::try_new(value).map_err(serde::de::Error::custom)
    }
}

/// Configuration for the [`ParabolicSar`] indicator.
///
/// Defaults: start `0.02`, step `0.02`, max `0.2`.
///
/// # Example
///
/// ```
/// use quantedge_engine::{Acceleration, IndicatorConfig, IndicatorConfigBuilder, SarConfig};
///
/// let config = SarConfig::builder()
///     .step(Acceleration::new(0.01))
///     .max(Acceleration::new(0.1))
///     .build();
///
/// assert_eq!(config.to_string(), "SarConfig(0.02, 0.01, 0.1)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SarConfig {
    start: Acceleration,
    step: Acceleration,
    max: Acceleration,
}

impl SarConfig {
    /// Acceleration factor at the start and after every reversal.
    #[inline]
    #[must_use]
    pub fn start(&self) -> Acceleration {
        self.start
    }

    /// Increment applied on each new extreme point.
    #[inline]
    #[must_use]
    pub fn step(&self) -> Acceleration {
        self.step
    }

    /// Acceleration factor cap.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Acceleration {
        self.max
    }
}

impl Default for SarConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IndicatorConfig for SarConfig {
    type Builder = SarConfigBuilder;

    fn builder() -> Self::Builder {
        SarConfigBuilder {
            start: Acceleration(0.02),
            step: Acceleration(0.02),
            max: Acceleration(0.2),
        }
    }

    #[inline]
    fn required_bars(&self) -> usize {
        1
    }
}

impl Display for SarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SarConfig({}, {}, {})",
            self.start.value(),
            self.step.value(),
            self.max.value()
        )
    }
}

/// Builder for [`SarConfig`].
pub struct SarConfigBuilder {
    start: Acceleration,
    step: Acceleration,
    max: Acceleration,
}

impl SarConfigBuilder {
    #[inline]
    #[must_use]
    pub fn start(mut self, start: Acceleration) -> Self {
        self.start = start;
        self
    }

    #[inline]
    #[must_use]
    pub fn step(mut self, step: Acceleration) -> Self {
        self.step = step;
        self
    }

    #[inline]
    #[must_use]
    pub fn max(mut self, max: Acceleration) -> Self {
        self.max = max;
        self
    }
}

impl IndicatorConfigBuilder<SarConfig> for SarConfigBuilder {
    #[inline]
    fn build(self) -> SarConfig {
        SarConfig {
            start: self.start,
            step: self.step,
            max: self.max,
        }
    }
}

/// Direction the Parabolic SAR is trailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trend {
    /// SAR sits below price.
    Up,
    /// SAR sits above price.
    Down,
}

/// Parabolic SAR state after a bar has been processed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SarState {
    trend: Trend,
    sar: Price,
    extreme_point: Price,
    acceleration_factor: f64,
}

impl SarState {
    #[inline]
    #[must_use]
    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Stop-and-reverse level for this bar.
    #[inline]
    #[must_use]
    pub fn sar(&self) -> Price {
        self.sar
    }

    /// Highest high of an uptrend, lowest low of a downtrend.
    #[inline]
    #[must_use]
    pub fn extreme_point(&self) -> Price {
        self.extreme_point
    }

    #[inline]
    #[must_use]
    pub fn acceleration_factor(&self) -> f64 {
        self.acceleration_factor
    }

    fn initial(high: Price, low: Price, start: f64) -> Self {
        Self {
            trend: Trend::Up,
            sar: low,
            extreme_point: high,
            acceleration_factor: start,
        }
    }

    /// State after bar `i`, given the state after bar `i - 1`.
    fn advance(self, i: usize, high: &[Price], low: &[Price], config: &SarConfig) -> Self {
        let candidate = self.sar + self.acceleration_factor * (self.extreme_point - self.sar);
        let accelerated = (self.acceleration_factor + config.step.value()).min(config.max.value());
        let lookback = i.saturating_sub(REVERSAL_LOOKBACK)..i;

        let next = match self.trend {
            Trend::Up if low[i] < candidate => Self {
                trend: Trend::Down,
                sar: highest_unchecked(&high[lookback]),
                extreme_point: low[i],
                acceleration_factor: config.start.value(),
            },
            Trend::Down if high[i] > candidate => Self {
                trend: Trend::Up,
                sar: lowest_unchecked(&low[lookback]),
                extreme_point: high[i],
                acceleration_factor: config.start.value(),
            },
            Trend::Up if high[i] > self.extreme_point => Self {
                sar: candidate,
                extreme_point: high[i],
                acceleration_factor: accelerated,
                ..self
            },
            Trend::Down if low[i] < self.extreme_point => Self {
                sar: candidate,
                extreme_point: low[i],
                acceleration_factor: accelerated,
                ..self
            },
            _ => Self {
                sar: candidate,
                ..self
            },
        };

        if next.trend != self.trend {
            tracing::trace!(bar = i, trend = ?next.trend, sar = next.sar, "parabolic_sar: reversal");
        }

        next
    }
}

/// Full Parabolic SAR state path, one [`SarState`] per bar.
///
/// Bar `0` starts an uptrend with SAR at `low[0]`, extreme point `high[0]`
/// and acceleration `start`. For each later bar:
///
/// ```text
/// candidate = prev SAR + af × (extreme point − prev SAR)
/// ```
///
/// An uptrend whose low breaks below the candidate reverses: SAR jumps to the
/// highest high of the previous five bars, the extreme point becomes the
/// current low and `af` resets to `start`. Otherwise a new high moves the
/// extreme point and raises `af` by `step`, capped at `max`. Downtrends mirror
/// this with lows and highs swapped.
///
/// # Errors
///
/// - [`Error::InvalidInput`] on mismatched lengths, `high < low`, a
///   non-positive or non-finite acceleration, or `start > max`.
/// - [`Error::InsufficientData`] on empty input.
pub fn sar_path(
    high: &[Price],
    low: &[Price],
    start: f64,
    step: f64,
    max: f64,
) -> Result<Vec<SarState>> {
    let config = SarConfig {
        start: Acceleration::try_new(start)?,
        step: Acceleration::try_new(step)?,
        max: Acceleration::try_new(max)?,
    };

    if start > max {
        return Err(Error::invalid(
            "parabolic_sar",
            format!("start acceleration {start} exceeds max {max}"),
        ));
    }

    ensure_same_len("parabolic_sar", &[("high", high.len()), ("low", low.len())])?;
    ensure_high_low("parabolic_sar", high, low)?;
    ensure_len("parabolic_sar", 1, high.len())?;

    let initial = SarState::initial(high[0], low[0], start);
    let rest = (1..high.len()).scan(initial, |state, i| {
        *state = state.advance(i, high, low, &config);
        Some(*state)
    });

    Ok(std::iter::once(initial).chain(rest).collect())
}

/// Parabolic SAR values, one per bar. See [`sar_path`].
///
/// # Errors
///
/// Same as [`sar_path`].
pub fn parabolic_sar(
    high: &[Price],
    low: &[Price],
    start: f64,
    step: f64,
    max: f64,
) -> Result<Vec<Price>> {
    Ok(sar_path(high, low, start, step, max)?
        .iter()
        .map(SarState::sar)
        .collect())
}

/// Parabolic Stop and Reverse (SAR).
///
/// Replays the full series from the first bar on every call.
#[derive(Clone, Debug)]
pub struct ParabolicSar {
    config: SarConfig,
}

impl Indicator for ParabolicSar {
    type Config = SarConfig;
    type Output = Vec<Price>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        parabolic_sar(
            series.high(),
            series.low(),
            self.config.start.value(),
            self.config.step.value(),
            self.config.max.value(),
        )
    }
}

impl Display for ParabolicSar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SAR({}, {}, {})",
            self.config.start.value(),
            self.config.step.value(),
            self.config.max.value()
        )
    }
}
