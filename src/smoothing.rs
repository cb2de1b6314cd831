//! Wilder smoothing and the range/movement inputs of the Wilder-family
//! indicators (RSI, ATR, ADX).

use crate::{
    Price,
    error::{Result, ensure_hlc, ensure_len, ensure_period},
    stats::mean_unchecked,
};

/// Trailing value of Wilder's smoothing.
///
/// Seeds with the arithmetic mean of the first `period` values, then for
/// every later value applies `smooth = (smooth * (period - 1) + x) / period`.
/// This is not an EMA: the effective weight is `1 / period`, not
/// `2 / (period + 1)`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `period` is zero.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if
///   `data.len() < period`.
pub fn wilder(data: &[f64], period: usize) -> Result<f64> {
    let path = wilder_series(data, period)?;

    Ok(path[path.len() - 1])
}

/// Full path of Wilder's smoothing, one value per index from `period - 1`
/// onwards. Length is `data.len() - period + 1`.
///
/// # Errors
///
/// Same as [`wilder`].
pub fn wilder_series(data: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_period("wilder", "period", period)?;
    ensure_len("wilder", period, data.len())?;

    #[allow(clippy::cast_precision_loss)]
    let length = period as f64;
    let length_minus_one = length - 1.0;

    let mut smooth = mean_unchecked(&data[..period]);
    let mut path = Vec::with_capacity(data.len() - period + 1);
    path.push(smooth);

    for &value in &data[period..] {
        smooth = (smooth * length_minus_one + value) / length;
        path.push(smooth);
    }

    Ok(path)
}

/// True range per bar.
///
/// Bar `0` has no previous close and uses `high - low`; every later bar uses
/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on mismatched
///   lengths or a bar with `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) on empty input.
pub fn true_range(high: &[Price], low: &[Price], close: &[Price]) -> Result<Vec<Price>> {
    ensure_hlc("true_range", high, low, close)?;
    ensure_len("true_range", 1, close.len())?;

    Ok(true_range_unchecked(high, low, close))
}

pub(crate) fn true_range_unchecked(high: &[Price], low: &[Price], close: &[Price]) -> Vec<Price> {
    let mut tr = Vec::with_capacity(close.len());
    tr.push(high[0] - low[0]);

    for i in 1..close.len() {
        let hl = high[i] - low[i];
        let hc = (high[i] - close[i - 1]).abs();
        let lc = (low[i] - close[i - 1]).abs();
        tr.push(hl.max(hc).max(lc));
    }

    tr
}

/// Directional movement of one series (highs for `+DM`, lows for `-DM`).
///
/// Index `0` is always `0`. For `i > 0` with `diff = series[i] - series[i-1]`,
/// the positive branch keeps `diff` when it is above zero and the negative
/// branch keeps `-diff` when `diff` is below zero; everything else is `0`.
///
/// # Errors
///
/// [`Error::InsufficientData`](crate::Error::InsufficientData) on empty input.
pub fn directional_movement(series: &[Price], positive: bool) -> Result<Vec<Price>> {
    ensure_len("directional_movement", 1, series.len())?;

    Ok(directional_movement_unchecked(series, positive))
}

pub(crate) fn directional_movement_unchecked(series: &[Price], positive: bool) -> Vec<Price> {
    let mut dm = Vec::with_capacity(series.len());
    dm.push(0.0);

    for pair in series.windows(2) {
        let diff = pair[1] - pair[0];
        let movement = if positive { diff } else { -diff };
        dm.push(movement.max(0.0));
    }

    dm
}
