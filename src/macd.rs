use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OhlcvSeries, Price, PriceSource, Result,
    ema::ema_unchecked,
    error::{Error, ensure_len, ensure_period},
};

/// Configuration for the [`Macd`] indicator.
///
/// Defaults: fast 12, slow 26, signal 9, close.
///
/// # Example
///
/// ```
/// use quantedge_engine::{IndicatorConfig, IndicatorConfigBuilder, MacdConfig};
/// use std::num::NonZero;
///
/// let config = MacdConfig::builder()
///     .fast(NonZero::new(5).unwrap())
///     .slow(NonZero::new(35).unwrap())
///     .signal(NonZero::new(5).unwrap())
///     .build();
///
/// assert_eq!(config.required_bars(), 35);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl MacdConfig {
    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    fn builder() -> Self::Builder {
        MacdConfigBuilder {
            fast: 12,
            slow: 26,
            signal: 9,
            source: PriceSource::Close,
        }
    }

    #[inline]
    fn required_bars(&self) -> usize {
        self.slow.max(self.signal)
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
pub struct MacdConfigBuilder {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl MacdConfigBuilder {
    /// Fast EMA period. Must stay below the slow period.
    #[inline]
    #[must_use]
    pub fn fast(mut self, fast: NonZero<usize>) -> Self {
        self.fast = fast.get();
        self
    }

    /// Slow EMA period.
    #[inline]
    #[must_use]
    pub fn slow(mut self, slow: NonZero<usize>) -> Self {
        self.slow = slow.get();
        self
    }

    /// Signal EMA period, applied to the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(mut self, signal: NonZero<usize>) -> Self {
        self.signal = signal.get();
        self
    }

    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn build(self) -> MacdConfig {
        MacdConfig {
            fast: self.fast,
            slow: self.slow,
            signal: self.signal,
            source: self.source,
        }
    }
}

/// Trailing MACD values.
///
/// `histogram` is exactly `macd - signal`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdValue {
    macd: f64,
    signal: f64,
    histogram: f64,
}

impl MacdValue {
    /// MACD line: `EMA(fast) − EMA(slow)`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> f64 {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> f64 {
        self.signal
    }

    /// `macd − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> f64 {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(m: {}, s: {}, h: {})",
            self.macd, self.signal, self.histogram
        )
    }
}

/// Trailing MACD, signal and histogram.
///
/// ```text
/// macd_line   = EMA(prices, fast) − EMA(prices, slow)
/// signal_line = EMA(macd_line, signal)
/// histogram   = macd_line − signal_line
/// ```
///
/// EMAs are seeded at the first value (see [`ema`](crate::ema)).
///
/// # Errors
///
/// - [`Error::InvalidInput`] if a period is zero or `fast >= slow`.
/// - [`Error::InsufficientData`] if `prices` is shorter than
///   `max(slow, signal)`.
pub fn macd(prices: &[Price], fast: usize, slow: usize, signal: usize) -> Result<MacdValue> {
    ensure_period("macd", "fast period", fast)?;
    ensure_period("macd", "slow period", slow)?;
    ensure_period("macd", "signal period", signal)?;

    if fast >= slow {
        return Err(Error::invalid(
            "macd",
            format!("fast period {fast} must be below slow period {slow}"),
        ));
    }

    ensure_len("macd", slow.max(signal), prices.len())?;

    let fast_ema = ema_unchecked(prices, fast);
    let slow_ema = ema_unchecked(prices, slow);
    let macd_line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema_unchecked(&macd_line, signal);

    let macd = macd_line[macd_line.len() - 1];
    let signal = signal_line[signal_line.len() - 1];

    Ok(MacdValue {
        macd,
        signal,
        histogram: macd - signal,
    })
}

/// Moving Average Convergence Divergence (MACD).
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        macd(
            &series.source(self.config.source),
            self.config.fast,
            self.config.slow,
            self.config.signal,
        )
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{
        ema,
        test_util::{assert_near, closes},
    };

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    mod computation {
        use super::*;

        #[test]
        fn histogram_is_exact_difference() {
            let value = macd(&wave(80), 12, 26, 9).unwrap();
            assert_eq!(value.histogram(), value.macd() - value.signal());
        }

        #[test]
        fn macd_line_from_ema_difference() {
            let prices = wave(60);
            let fast = ema(&prices, 12).unwrap();
            let slow = ema(&prices, 26).unwrap();
            let value = macd(&prices, 12, 26, 9).unwrap();
            assert_eq!(value.macd(), fast[59] - slow[59]);
        }

        #[test]
        fn hand_computed_small_periods() {
            // fast EMA(1) = prices; slow EMA(3), k = 0.5: 2, 3, 4.5
            // macd line: 0, 1, 1.5; signal EMA(1) = macd line
            let value = macd(&[2.0, 4.0, 6.0], 1, 3, 1).unwrap();
            assert_eq!(value.macd(), 1.5);
            assert_eq!(value.signal(), 1.5);
            assert_eq!(value.histogram(), 0.0);
        }

        #[test]
        fn signal_seeded_at_first_macd_value() {
            // macd line 0, 1, 1.5; signal EMA(3): 0, 0.5, 1.0
            let value = macd(&[2.0, 4.0, 6.0], 1, 3, 3).unwrap();
            assert_eq!(value.signal(), 1.0);
            assert_eq!(value.histogram(), 0.5);
        }

        #[test]
        fn constant_prices_are_zero() {
            let value = macd(&[10.0; 40], 12, 26, 9).unwrap();
            assert_near!(value.macd(), 0.0, 1e-12);
            assert_near!(value.signal(), 0.0, 1e-12);
            assert_near!(value.histogram(), 0.0, 1e-12);
        }

        #[test]
        fn rising_prices_have_positive_macd() {
            let prices: Vec<f64> = (0..50).map(f64::from).collect();
            assert!(macd(&prices, 12, 26, 9).unwrap().macd() > 0.0);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn fast_must_be_below_slow() {
            assert!(matches!(
                macd(&wave(40), 26, 12, 9),
                Err(Error::InvalidInput { indicator: "macd", .. })
            ));
            assert!(matches!(
                macd(&wave(40), 12, 12, 9),
                Err(Error::InvalidInput { .. })
            ));
        }

        #[test]
        fn zero_periods() {
            assert!(matches!(macd(&wave(40), 0, 26, 9), Err(Error::InvalidInput { .. })));
            assert!(matches!(macd(&wave(40), 12, 26, 0), Err(Error::InvalidInput { .. })));
        }

        #[test]
        fn needs_slow_period_of_history() {
            assert!(matches!(
                macd(&wave(25), 12, 26, 9),
                Err(Error::InsufficientData { required: 26, actual: 25, .. })
            ));
        }
    }

    mod indicator {
        use super::*;

        #[test]
        fn default_config() {
            let config = MacdConfig::default();
            assert_eq!((config.fast(), config.slow(), config.signal()), (12, 26, 9));
            assert_eq!(config.required_bars(), 26);
            assert_eq!(config.to_string(), "MacdConfig(12, 26, 9, Close)");
        }

        #[test]
        fn matches_free_function() {
            let prices = wave(60);
            let value = Macd::new(MacdConfig::default()).compute(&closes(&prices)).unwrap();
            assert_eq!(value, macd(&prices, 12, 26, 9).unwrap());
        }

        #[test]
        fn display() {
            assert_eq!(Macd::new(MacdConfig::default()).to_string(), "MACD(12, 26, 9, Close)");
        }
    }
}
