use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_len, ensure_period},
    indicator::period_config,
};

period_config! {
    /// Configuration for the Weighted Moving Average ([`Wma`]) indicator.
    sourced WmaConfig, WmaConfigBuilder {
        label: "Wma",
        default_length: 20,
        required_bars: |config| config.length,
    }
}

/// Linearly weighted moving average over every full trailing window.
///
/// Within a window the oldest value has weight `1` and the newest weight
/// `period`; the sum is divided by `period × (period + 1) / 2`. Output
/// length is `series.len() - period + 1`, aligned like [`sma`](crate::sma).
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `period` is zero.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if
///   `series.len() < period`.
pub fn wma(series: &[Price], period: usize) -> Result<Vec<Price>> {
    ensure_period("wma", "period", period)?;
    ensure_len("wma", period, series.len())?;

    #[allow(clippy::cast_precision_loss)]
    let denominator = (period * (period + 1)) as f64 / 2.0;

    Ok(series
        .windows(period)
        .map(|window| {
            let weighted: f64 = (1_u32..)
                .zip(window)
                .map(|(weight, price)| f64::from(weight) * price)
                .sum();
            weighted / denominator
        })
        .collect())
}

/// Weighted Moving Average (WMA).
#[derive(Clone, Debug)]
pub struct Wma {
    config: WmaConfig,
}

impl Indicator for Wma {
    type Config = WmaConfig;
    type Output = Vec<Price>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        wma(&series.source(self.config.source()), self.config.length())
    }
}

impl Display for Wma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WMA({}, {})", self.config.length(), self.config.source())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{Error, test_util::closes};
    use std::num::NonZero;

    #[test]
    fn weights_newest_heaviest() {
        // (1×1 + 2×2 + 3×3) / 6 = 14 / 6, (2 + 6 + 12) / 6 = 20 / 6
        let values = wma(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(values, vec![14.0 / 6.0, 20.0 / 6.0]);
    }

    #[test]
    fn leans_toward_recent_prices_vs_sma() {
        let rising = [10.0, 11.0, 12.0, 13.0, 14.0];
        let weighted = wma(&rising, 5).unwrap()[0];
        assert!(weighted > 12.0, "{weighted}");
    }

    #[test]
    fn period_one_is_identity() {
        assert_eq!(wma(&[4.0, 2.0], 1).unwrap(), vec![4.0, 2.0]);
    }

    #[test]
    fn rejects_zero_period_and_short_input() {
        assert!(matches!(wma(&[1.0], 0), Err(Error::InvalidInput { .. })));
        assert!(matches!(
            wma(&[1.0], 2),
            Err(Error::InsufficientData { required: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn indicator_matches_free_function() {
        let prices = [3.0, 5.0, 4.0, 8.0, 7.0];
        let wma_ind = Wma::new(WmaConfig::close(NonZero::new(3).unwrap()));
        assert_eq!(wma_ind.compute(&closes(&prices)).unwrap(), wma(&prices, 3).unwrap());
        assert_eq!(wma_ind.to_string(), "WMA(3, Close)");
    }
}
