use std::fmt::{Debug, Display};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OhlcvSeries, Price, PriceSource, Result,
    error::{Error, ensure_len, ensure_same_len},
};

/// Configuration for the cumulative [`Vwap`] indicator.
///
/// Defaults to the typical price ([`PriceSource::HLC3`]).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VwapConfig {
    source: PriceSource,
}

impl VwapConfig {
    /// Price series weighted by volume.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for VwapConfig {
    fn default() -> Self {
        Self {
            source: PriceSource::HLC3,
        }
    }
}

impl IndicatorConfig for VwapConfig {
    type Builder = VwapConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        VwapConfigBuilder {
            source: PriceSource::HLC3,
        }
    }

    #[inline]
    fn required_bars(&self) -> usize {
        1
    }
}

impl Display for VwapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VwapConfig({})", self.source)
    }
}

/// Builder for [`VwapConfig`].
pub struct VwapConfigBuilder {
    source: PriceSource,
}

impl VwapConfigBuilder {
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<VwapConfig> for VwapConfigBuilder {
    #[inline]
    fn build(self) -> VwapConfig {
        VwapConfig {
            source: self.source,
        }
    }
}

/// Cumulative volume-weighted average price, one value per bar.
///
/// `vwap[i] = Σ(price × volume)[0..=i] / Σ(volume)[0..=i]`.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the lengths differ.
/// - [`Error::InsufficientData`] on empty input.
/// - [`Error::DegenerateComputation`] if cumulative volume is zero at any bar
///   (the ratio is undefined there).
pub fn vwap(prices: &[Price], volumes: &[f64]) -> Result<Vec<Price>> {
    ensure_same_len(
        "vwap",
        &[("prices", prices.len()), ("volumes", volumes.len())],
    )?;
    ensure_len("vwap", 1, prices.len())?;

    let mut cum_volume = 0.0;
    let mut cum_pv = 0.0;

    prices
        .iter()
        .zip(volumes)
        .map(|(price, volume)| {
            cum_volume += volume;
            cum_pv += price * volume;

            if cum_volume == 0.0 {
                return Err(Error::DegenerateComputation {
                    indicator: "vwap",
                    reason: "cumulative volume is zero",
                });
            }

            Ok(cum_pv / cum_volume)
        })
        .collect()
}

/// Volume Weighted Average Price (VWAP), anchored at the first bar.
#[derive(Clone, Debug)]
pub struct Vwap {
    config: VwapConfig,
}

impl Indicator for Vwap {
    type Config = VwapConfig;
    type Output = Vec<Price>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        vwap(&series.source(self.config.source), series.volume())
    }
}

impl Display for Vwap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VWAP({})", self.config.source)
    }
}
