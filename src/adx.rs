use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_hlc, ensure_len, ensure_period},
    indicator::period_config,
    smoothing::{directional_movement_unchecked, true_range_unchecked, wilder, wilder_series},
};

period_config! {
    /// Configuration for the Average Directional Index ([`Adx`]).
    ///
    /// ADX smooths twice: once for the directional indicators and once for
    /// DX itself, so it needs `2 × length − 1` bars.
    hlc AdxConfig, AdxConfigBuilder {
        label: "Adx",
        default_length: 14,
        required_bars: |config| config.length.saturating_mul(2) - 1,
    }
}

/// Trailing ADX with its directional indicators, all in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdxValue {
    adx: f64,
    plus_di: f64,
    minus_di: f64,
}

impl AdxValue {
    /// Trend strength, direction-agnostic.
    #[inline]
    #[must_use]
    pub fn adx(&self) -> f64 {
        self.adx
    }

    /// `+DI`.
    #[inline]
    #[must_use]
    pub fn plus_di(&self) -> f64 {
        self.plus_di
    }

    /// `-DI`.
    #[inline]
    #[must_use]
    pub fn minus_di(&self) -> f64 {
        self.minus_di
    }
}

impl Display for AdxValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ADX(adx: {}, +di: {}, -di: {})",
            self.adx, self.plus_di, self.minus_di
        )
    }
}

/// Trailing Average Directional Index.
///
/// True range, `+DM` and `-DM` are Wilder-smoothed over `period`. At every
/// bar of the smoothed paths:
///
/// ```text
/// +DI = 100 × smoothed +DM / smoothed TR
/// -DI = 100 × smoothed -DM / smoothed TR
/// DX  = 100 × |+DI − -DI| / (+DI + -DI)
/// ```
///
/// ADX is the Wilder-smoothed DX. A zero smoothed true range gives both
/// DI a value of `0`, and a zero DI sum gives a DX of `0`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on a zero period,
///   mismatched lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than `2 × period − 1` bars are supplied.
pub fn adx(high: &[Price], low: &[Price], close: &[Price], period: usize) -> Result<AdxValue> {
    ensure_period("adx", "period", period)?;
    ensure_hlc("adx", high, low, close)?;
    ensure_len("adx", period.saturating_mul(2) - 1, close.len())?;

    let smoothed_range = wilder_series(&true_range_unchecked(high, low, close), period)?;
    let smoothed_up = wilder_series(&directional_movement_unchecked(high, true), period)?;
    let smoothed_down = wilder_series(&directional_movement_unchecked(low, false), period)?;

    let mut plus_di = 0.0;
    let mut minus_di = 0.0;

    let dx: Vec<f64> = smoothed_range
        .iter()
        .zip(smoothed_up.iter().zip(&smoothed_down))
        .map(|(&range, (&up, &down))| {
            (plus_di, minus_di) = directional_indicators(range, up, down);
            directional_index(plus_di, minus_di)
        })
        .collect();

    Ok(AdxValue {
        adx: wilder(&dx, period)?,
        plus_di,
        minus_di,
    })
}

#[inline]
fn directional_indicators(tr: f64, plus_dm: f64, minus_dm: f64) -> (f64, f64) {
    if tr == 0.0 {
        tracing::debug!("adx: zero smoothed true range, resolving DI to 0");
        return (0.0, 0.0);
    }

    (100.0 * plus_dm / tr, 100.0 * minus_dm / tr)
}

#[inline]
fn directional_index(plus_di: f64, minus_di: f64) -> f64 {
    let sum = plus_di + minus_di;
    if sum == 0.0 {
        return 0.0;
    }

    100.0 * (plus_di - minus_di).abs() / sum
}

/// Average Directional Index (ADX).
#[derive(Clone, Debug)]
pub struct Adx {
    config: AdxConfig,
}

impl Indicator for Adx {
    type Config = AdxConfig;
    type Output = AdxValue;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        adx(
            series.high(),
            series.low(),
            series.close(),
            self.config.length(),
        )
    }
}

impl Display for Adx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ADX({})", self.config.length())
    }
}
