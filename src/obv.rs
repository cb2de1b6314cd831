use std::fmt::{Debug, Display};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OhlcvSeries, Price, PriceSource, Result,
    error::{ensure_len, ensure_same_len},
};

/// Configuration for the On-Balance Volume ([`Obv`]) indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObvConfig {
    source: PriceSource,
}

impl ObvConfig {
    /// Price series whose direction signs the volume.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl IndicatorConfig for ObvConfig {
    type Builder = ObvConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        ObvConfigBuilder {
            source: PriceSource::Close,
        }
    }

    #[inline]
    fn required_bars(&self) -> usize {
        1
    }
}

impl Display for ObvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObvConfig({})", self.source)
    }
}

/// Builder for [`ObvConfig`].
pub struct ObvConfigBuilder {
    source: PriceSource,
}

impl ObvConfigBuilder {
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<ObvConfig> for ObvConfigBuilder {
    #[inline]
    fn build(self) -> ObvConfig {
        ObvConfig {
            source: self.source,
        }
    }
}

/// On-balance volume, one value per bar.
///
/// Starts at `0` on the first bar. Each later bar adds its volume when the
/// price rose, subtracts it when the price fell and carries the running
/// total unchanged when the price is flat.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if the lengths differ.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) on empty input.
///
/// # Example
///
/// ```
/// use quantedge_engine::obv;
///
/// let values = obv(&[10.0, 11.0, 11.0, 9.0], &[5.0, 3.0, 8.0, 2.0]).unwrap();
/// assert_eq!(values, vec![0.0, 3.0, 3.0, 1.0]);
/// ```
pub fn obv(prices: &[Price], volumes: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len(
        "obv",
        &[("prices", prices.len()), ("volumes", volumes.len())],
    )?;
    ensure_len("obv", 1, prices.len())?;

    let mut values = Vec::with_capacity(prices.len());
    values.push(0.0);

    let mut running = 0.0;
    for (pair, volume) in prices.windows(2).zip(&volumes[1..]) {
        if pair[1] > pair[0] {
            running += volume;
        } else if pair[1] < pair[0] {
            running -= volume;
        }
        values.push(running);
    }

    Ok(values)
}

/// On-Balance Volume (OBV).
///
/// A running total; every call replays the whole series from the first bar.
#[derive(Clone, Debug)]
pub struct Obv {
    config: ObvConfig,
}

impl Indicator for Obv {
    type Config = ObvConfig;
    type Output = Vec<f64>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        obv(&series.source(self.config.source), series.volume())
    }
}

impl Display for Obv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OBV({})", self.config.source)
    }
}
