use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_len, ensure_period},
    indicator::period_config,
    stats::{highest_unchecked, lowest_unchecked},
};

/// Levels reported on each side.
const LEVELS_PER_SIDE: usize = 3;

period_config! {
    /// Configuration for the [`SupportResistance`] level finder.
    ///
    /// `length` is the sliding window size.
    sourced SupportResistanceConfig, SupportResistanceConfigBuilder {
        label: "SupportResistance",
        default_length: 20,
        required_bars: |config| config.length,
    }
}

/// Up to three support and three resistance levels.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportResistanceLevels {
    support: Vec<Price>,
    resistance: Vec<Price>,
}

impl SupportResistanceLevels {
    /// Lowest distinct window extremes, ascending.
    #[inline]
    #[must_use]
    pub fn support(&self) -> &[Price] {
        &self.support
    }

    /// Highest distinct window extremes, descending.
    #[inline]
    #[must_use]
    pub fn resistance(&self) -> &[Price] {
        &self.resistance
    }
}

impl Display for SupportResistanceLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SR(s: {:?}, r: {:?})", self.support, self.resistance)
    }
}

/// Support and resistance levels from sliding-window extremes.
///
/// Every full window of `window` prices contributes its maximum and minimum.
/// Exact repeats are dropped. Support is the three lowest collected levels in
/// ascending order, resistance the three highest in descending order. With
/// few distinct levels the two sides overlap.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if `window` is zero.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if
///   `prices.len() < window`.
pub fn support_resistance(prices: &[Price], window: usize) -> Result<SupportResistanceLevels> {
    ensure_period("support_resistance", "window", window)?;
    ensure_len("support_resistance", window, prices.len())?;

    let mut levels: Vec<Price> = Vec::new();
    for slice in prices.windows(window) {
        for level in [highest_unchecked(slice), lowest_unchecked(slice)] {
            if !levels.contains(&level) {
                levels.push(level);
            }
        }
    }

    levels.sort_by(f64::total_cmp);

    Ok(SupportResistanceLevels {
        support: levels.iter().take(LEVELS_PER_SIDE).copied().collect(),
        resistance: levels.iter().rev().take(LEVELS_PER_SIDE).copied().collect(),
    })
}

/// Support/resistance level finder.
#[derive(Clone, Debug)]
pub struct SupportResistance {
    config: SupportResistanceConfig,
}

impl Indicator for SupportResistance {
    type Config = SupportResistanceConfig;
    type Output = SupportResistanceLevels;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        support_resistance(&series.source(self.config.source()), self.config.length())
    }
}

impl Display for SupportResistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SR({}, {})",
            self.config.length(),
            self.config.source()
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{Error, test_util::closes};
    use std::num::NonZero;

    #[test]
    fn picks_three_per_side() {
        // windows of 2: (5,1) (1,4) (4,2) (2,8) (8,3) (3,7)
        // distinct levels: 1 2 3 4 5 7 8
        let levels = support_resistance(&[5.0, 1.0, 4.0, 2.0, 8.0, 3.0, 7.0], 2).unwrap();
        assert_eq!(levels.support(), &[1.0, 2.0, 3.0]);
        assert_eq!(levels.resistance(), &[8.0, 7.0, 5.0]);
    }

    #[test]
    fn repeated_extremes_are_deduplicated() {
        let levels = support_resistance(&[10.0, 12.0, 10.0, 12.0, 10.0], 2).unwrap();
        assert_eq!(levels.support(), &[10.0, 12.0]);
        assert_eq!(levels.resistance(), &[12.0, 10.0]);
    }

    #[test]
    fn includes_final_window() {
        // the 99 spike is only inside the last window
        let levels = support_resistance(&[3.0, 4.0, 5.0, 99.0], 3).unwrap();
        assert_eq!(levels.resistance()[0], 99.0);
    }

    #[test]
    fn single_window_gives_its_extremes() {
        let levels = support_resistance(&[4.0, 9.0, 6.0], 3).unwrap();
        assert_eq!(levels.support(), &[4.0, 9.0]);
        assert_eq!(levels.resistance(), &[9.0, 4.0]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            support_resistance(&[1.0; 19], 20),
            Err(Error::InsufficientData { required: 20, actual: 19, .. })
        ));
        assert!(matches!(support_resistance(&[1.0], 0), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn indicator() {
        let prices = [5.0, 1.0, 4.0, 2.0, 8.0, 3.0, 7.0];
        let sr = SupportResistance::new(SupportResistanceConfig::close(NonZero::new(2).unwrap()));
        assert_eq!(sr.compute(&closes(&prices)).unwrap(), support_resistance(&prices, 2).unwrap());
        assert_eq!(sr.to_string(), "SR(2, Close)");
    }
}
