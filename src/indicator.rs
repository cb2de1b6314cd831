use crate::{OhlcvSeries, Result};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every series-driven indicator has a corresponding config type that holds
/// its parameters (periods, price source, multipliers). Configs are value
/// types: cheap to copy, compare, and hash. [`Default`] yields the
/// conventional parameters (RSI 14, MACD 12/26/9, BB 20 × 2.0, ...).
pub trait IndicatorConfig:
    Sized + Copy + PartialEq + Eq + Hash + Default + Display + Debug
{
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder seeded with the default parameters.
    fn builder() -> Self::Builder;

    /// Minimum number of bars the indicator needs to produce a value.
    ///
    /// Series shorter than this fail with
    /// [`Error::InsufficientData`](crate::Error::InsufficientData).
    fn required_bars(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Builds the config.
    #[must_use]
    fn build(self) -> Config;
}

/// A batch technical indicator.
///
/// Indicators are stateless: [`compute`](Indicator::compute) reads the whole
/// series from the oldest bar every time and allocates its own output.
/// Running indicators (OBV, Parabolic SAR) replay the full series on each
/// call.
///
/// # Example
///
/// ```
/// use quantedge_engine::{Bar, Indicator, IndicatorConfig, OhlcvSeries, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let bars: Vec<Bar> = (1..=5)
///     .map(|i| {
///         let p = i as f64;
///         Bar { open_time: i, open: p, high: p, low: p, close: p, volume: 1.0 }
///     })
///     .collect();
/// let series = OhlcvSeries::from_bars(&bars).unwrap();
///
/// let sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
/// assert_eq!(sma.compute(&series).unwrap(), vec![2.0, 3.0, 4.0]);
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output: a trailing scalar, a struct of named values, or a
    /// full series, fixed per indicator.
    type Output: Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// The config this indicator was created with.
    fn config(&self) -> &Self::Config;

    /// Computes the indicator over the whole series.
    ///
    /// # Errors
    ///
    /// Propagates the validation and degenerate-case errors of the
    /// underlying computation.
    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output>;
}

/// Declares a single-window config plus its builder.
///
/// `sourced` configs also carry a [`PriceSource`](crate::PriceSource) and
/// read that derived series from the bars; `hlc` configs read the
/// high/low/close columns directly.
macro_rules! period_config {
    (
        $(#[$meta:meta])*
        sourced $config:ident, $builder:ident {
            label: $label:literal,
            default_length: $default:literal,
            required_bars: |$cfg:ident| $required:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $config {
            length: usize,
            source: $crate::PriceSource,
        }

        impl $config {
            /// Window length (number of bars).
            #[inline]
            #[must_use]
            pub fn length(&self) -> usize {
                self.length
            }

            /// Price series extracted from each bar.
            #[inline]
            #[must_use]
            pub fn source(&self) -> $crate::PriceSource {
                self.source
            }

            /// Custom length on closing price.
            #[must_use]
            pub fn close(length: ::std::num::NonZero<usize>) -> Self {
                $crate::IndicatorConfigBuilder::build(
                    <Self as $crate::IndicatorConfig>::builder().length(length),
                )
            }
        }

        impl Default for $config {
            fn default() -> Self {
                Self {
                    length: $default,
                    source: $crate::PriceSource::Close,
                }
            }
        }

        impl $crate::IndicatorConfig for $config {
            type Builder = $builder;

            #[inline]
            fn builder() -> Self::Builder {
                $builder {
                    length: $default,
                    source: $crate::PriceSource::Close,
                }
            }

            #[inline]
            fn required_bars(&self) -> usize {
                let $cfg = self;
                $required
            }
        }

        impl ::std::fmt::Display for $config {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}Config({}, {})", $label, self.length, self.source)
            }
        }

        #[doc = concat!("Builder for [`", stringify!($config), "`].")]
        ///
        #[doc = concat!("Defaults: length = ", stringify!($default), ", source = [`PriceSource::Close`](crate::PriceSource::Close).")]
        pub struct $builder {
            length: usize,
            source: $crate::PriceSource,
        }

        impl $builder {
            /// Sets the window length.
            #[inline]
            #[must_use]
            pub fn length(mut self, length: ::std::num::NonZero<usize>) -> Self {
                self.length = length.get();
                self
            }

            /// Sets the price source.
            #[inline]
            #[must_use]
            pub fn source(mut self, source: $crate::PriceSource) -> Self {
                self.source = source;
                self
            }
        }

        impl $crate::IndicatorConfigBuilder<$config> for $builder {
            #[inline]
            fn build(self) -> $config {
                $config {
                    length: self.length,
                    source: self.source,
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        hlc $config:ident, $builder:ident {
            label: $label:literal,
            default_length: $default:literal,
            required_bars: |$cfg:ident| $required:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $config {
            length: usize,
        }

        impl $config {
            /// Window length (number of bars).
            #[inline]
            #[must_use]
            pub fn length(&self) -> usize {
                self.length
            }

            /// Custom length.
            #[must_use]
            pub fn with_length(length: ::std::num::NonZero<usize>) -> Self {
                $crate::IndicatorConfigBuilder::build(
                    <Self as $crate::IndicatorConfig>::builder().length(length),
                )
            }
        }

        impl Default for $config {
            fn default() -> Self {
                Self { length: $default }
            }
        }

        impl $crate::IndicatorConfig for $config {
            type Builder = $builder;

            #[inline]
            fn builder() -> Self::Builder {
                $builder { length: $default }
            }

            #[inline]
            fn required_bars(&self) -> usize {
                let $cfg = self;
                $required
            }
        }

        impl ::std::fmt::Display for $config {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}Config({})", $label, self.length)
            }
        }

        #[doc = concat!("Builder for [`", stringify!($config), "`].")]
        ///
        #[doc = concat!("Defaults: length = ", stringify!($default), ".")]
        pub struct $builder {
            length: usize,
        }

        impl $builder {
            /// Sets the window length.
            #[inline]
            #[must_use]
            pub fn length(mut self, length: ::std::num::NonZero<usize>) -> Self {
                self.length = length.get();
                self
            }
        }

        impl $crate::IndicatorConfigBuilder<$config> for $builder {
            #[inline]
            fn build(self) -> $config {
                $config {
                    length: self.length,
                }
            }
        }
    };
}

pub(crate) use period_config;
