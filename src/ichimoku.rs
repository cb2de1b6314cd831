use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OhlcvSeries, Price, Result,
    error::{ensure_hlc, ensure_high_low, ensure_len, ensure_period, ensure_same_len},
    stats::{highest_unchecked, lowest_unchecked},
};

/// Configuration for the [`Ichimoku`] cloud.
///
/// Defaults: conversion 9, base 26, leading span B 52, displacement 26.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IchimokuConfig {
    conversion: usize,
    base: usize,
    span_b: usize,
    displacement: usize,
}

impl IchimokuConfig {
    /// Tenkan-sen period.
    #[inline]
    #[must_use]
    pub fn conversion(&self) -> usize {
        self.conversion
    }

    /// Kijun-sen period.
    #[inline]
    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Senkou span B period.
    #[inline]
    #[must_use]
    pub fn span_b(&self) -> usize {
        self.span_b
    }

    /// Number of closes presented as the lagging span.
    #[inline]
    #[must_use]
    pub fn displacement(&self) -> usize {
        self.displacement
    }
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IndicatorConfig for IchimokuConfig {
    type Builder = IchimokuConfigBuilder;

    fn builder() -> Self::Builder {
        IchimokuConfigBuilder {
            conversion: 9,
            base: 26,
            span_b: 52,
            displacement: 26,
        }
    }

    #[inline]
    fn required_bars(&self) -> usize {
        self.conversion
            .max(self.base)
            .max(self.span_b)
            .max(self.displacement)
    }
}

impl Display for IchimokuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IchimokuConfig({}, {}, {}, {})",
            self.conversion, self.base, self.span_b, self.displacement
        )
    }
}

/// Builder for [`IchimokuConfig`].
pub struct IchimokuConfigBuilder {
    conversion: usize,
    base: usize,
    span_b: usize,
    displacement: usize,
}

impl IchimokuConfigBuilder {
    #[inline]
    #[must_use]
    pub fn conversion(mut self, conversion: NonZero<usize>) -> Self {
        self.conversion = conversion.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn base(mut self, base: NonZero<usize>) -> Self {
        self.base = base.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn span_b(mut self, span_b: NonZero<usize>) -> Self {
        self.span_b = span_b.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn displacement(mut self, displacement: NonZero<usize>) -> Self {
        self.displacement = displacement.get();
        self
    }
}

impl IndicatorConfigBuilder<IchimokuConfig> for IchimokuConfigBuilder {
    #[inline]
    fn build(self) -> IchimokuConfig {
        IchimokuConfig {
            conversion: self.conversion,
            base: self.base,
            span_b: self.span_b,
            displacement: self.displacement,
        }
    }
}

/// Trailing Ichimoku lines plus the lagging closes.
///
/// Leading spans are reported at the current bar; plotting them
/// `displacement` bars ahead is left to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IchimokuValue {
    conversion: Price,
    base: Price,
    leading_span_a: Price,
    leading_span_b: Price,
    lagging_span: Vec<Price>,
}

impl IchimokuValue {
    /// Tenkan-sen.
    #[inline]
    #[must_use]
    pub fn conversion(&self) -> Price {
        self.conversion
    }

    /// Kijun-sen.
    #[inline]
    #[must_use]
    pub fn base(&self) -> Price {
        self.base
    }

    /// Senkou span A: midpoint of conversion and base.
    #[inline]
    #[must_use]
    pub fn leading_span_a(&self) -> Price {
        self.leading_span_a
    }

    /// Senkou span B.
    #[inline]
    #[must_use]
    pub fn leading_span_b(&self) -> Price {
        self.leading_span_b
    }

    /// Chikou span: the last `displacement` closes, oldest first.
    #[inline]
    #[must_use]
    pub fn lagging_span(&self) -> &[Price] {
        &self.lagging_span
    }
}

impl Display for IchimokuValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku(conv: {}, base: {}, a: {}, b: {})",
            self.conversion, self.base, self.leading_span_a, self.leading_span_b
        )
    }
}

/// Midpoint of the highest high and lowest low over the last `period` bars.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on a zero period,
///   mismatched lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than `period` bars are supplied.
pub fn ichimoku_line(high: &[Price], low: &[Price], period: usize) -> Result<Price> {
    ensure_period("ichimoku", "period", period)?;
    ensure_same_len("ichimoku", &[("high", high.len()), ("low", low.len())])?;
    ensure_high_low("ichimoku", high, low)?;
    ensure_len("ichimoku", period, high.len())?;

    Ok(midpoint(high, low, period))
}

fn midpoint(high: &[Price], low: &[Price], period: usize) -> Price {
    let start = high.len() - period;

    f64::midpoint(highest_unchecked(&high[start..]), lowest_unchecked(&low[start..]))
}

/// Trailing Ichimoku Kinko Hyo.
///
/// Conversion, base and leading span B are [`ichimoku_line`]s over their
/// periods. Leading span A is `(conversion + base) / 2`. The lagging span is
/// the raw close series, last `displacement` values, not recomputed.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on mismatched
///   lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than [`IchimokuConfig::required_bars`] bars are supplied.
pub fn ichimoku(
    high: &[Price],
    low: &[Price],
    close: &[Price],
    config: &IchimokuConfig,
) -> Result<IchimokuValue> {
    ensure_period("ichimoku", "conversion period", config.conversion)?;
    ensure_period("ichimoku", "base period", config.base)?;
    ensure_period("ichimoku", "span B period", config.span_b)?;
    ensure_hlc("ichimoku", high, low, close)?;
    ensure_len("ichimoku", config.required_bars(), close.len())?;

    let conversion = midpoint(high, low, config.conversion);
    let base = midpoint(high, low, config.base);

    Ok(IchimokuValue {
        conversion,
        base,
        leading_span_a: f64::midpoint(conversion, base),
        leading_span_b: midpoint(high, low, config.span_b),
        lagging_span: close[close.len() - config.displacement..].to_vec(),
    })
}

/// Ichimoku Kinko Hyo (cloud chart).
#[derive(Clone, Debug)]
pub struct Ichimoku {
    config: IchimokuConfig,
}

impl Indicator for Ichimoku {
    type Config = IchimokuConfig;
    type Output = IchimokuValue;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        ichimoku(series.high(), series.low(), series.close(), &self.config)
    }
}

impl Display for Ichimoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ICHIMOKU({}, {}, {}, {})",
            self.config.conversion, self.config.base, self.config.span_b, self.config.displacement
        )
    }
}
