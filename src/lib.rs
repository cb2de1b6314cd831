//! Batch technical analysis indicators for Rust.
//!
//! Every indicator is available in two forms:
//!
//! - a free function over aligned `f64` slices ([`sma`], [`rsi`],
//!   [`adx`], ...) that validates its input and returns a typed
//!   [`Result`];
//! - an indicator type built from a config ([`Sma`], [`Rsi`], [`Adx`], ...)
//!   that computes over a whole [`OhlcvSeries`].
//!
//! Nothing is cached between calls. Inputs are borrowed, outputs are freshly
//! allocated, so computations for different series can run on any number of
//! threads without coordination.
//!
//! Indicator types expose [`new`](Sma::new), [`compute`](Sma::compute) and
//! [`config`](Sma::config) as inherent methods, no trait import needed.
//! Import [`Indicator`] only for generic code.
//!
//! # Example
//!
//! ```
//! use quantedge_engine::{Bar, Error, OhlcvSeries, Rsi, RsiConfig, macd};
//!
//! let closes: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i % 5)).collect();
//! let value = macd(&closes, 12, 26, 9).unwrap();
//! assert_eq!(value.histogram(), value.macd() - value.signal());
//!
//! let bars: Vec<Bar> = (0..10u32)
//!     .map(|i| {
//!         let p = f64::from(i);
//!         Bar { open_time: u64::from(i), open: p, high: p, low: p, close: p, volume: 1.0 }
//!     })
//!     .collect();
//! let series = OhlcvSeries::from_bars(&bars).unwrap();
//!
//! // RSI(14) needs 15 bars
//! let result = Rsi::new(RsiConfig::default()).compute(&series);
//! assert!(matches!(result, Err(Error::InsufficientData { required: 15, .. })));
//! ```

mod adx;
mod aroon;
mod atr;
mod bb;
mod beta;
mod ema;
mod error;
mod fibonacci;
mod ichimoku;
mod indicator;
mod macd;
mod mfi;
mod obv;
mod ohlcv;
mod price_source;
mod rsi;
mod sar;
mod sma;
mod smoothing;
mod stats;
mod stochastic;
mod support_resistance;
mod vwap;
mod williams_r;
mod wma;

pub use crate::error::{Error, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Bar, Ohlcv, OhlcvSeries, Price, Timestamp};
pub use crate::price_source::PriceSource;

pub use crate::smoothing::{directional_movement, true_range, wilder, wilder_series};
pub use crate::stats::{covariance, highest, lowest, mean, stddev, variance};

pub use crate::adx::{Adx, AdxConfig, AdxConfigBuilder, AdxValue, adx};
pub use crate::aroon::{Aroon, AroonConfig, AroonConfigBuilder, AroonValue, aroon};
pub use crate::atr::{Atr, AtrConfig, AtrConfigBuilder, Natr, NatrConfig, NatrConfigBuilder, atr, natr};
pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbValue, StdDev, bollinger_bands};
pub use crate::beta::beta;
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder, ema};
pub use crate::fibonacci::{FIBONACCI_RATIOS, FibonacciLevels, fibonacci_levels};
pub use crate::ichimoku::{
    Ichimoku, IchimokuConfig, IchimokuConfigBuilder, IchimokuValue, ichimoku, ichimoku_line,
};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue, macd};
pub use crate::mfi::{Mfi, MfiConfig, MfiConfigBuilder, mfi};
pub use crate::obv::{Obv, ObvConfig, ObvConfigBuilder, obv};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder, rsi};
pub use crate::sar::{
    Acceleration, ParabolicSar, SarConfig, SarConfigBuilder, SarState, Trend, parabolic_sar,
    sar_path,
};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder, sma};
pub use crate::stochastic::{
    Stochastic, StochasticConfig, StochasticConfigBuilder, StochasticValue, stochastic,
};
pub use crate::support_resistance::{
    SupportResistance, SupportResistanceConfig, SupportResistanceConfigBuilder,
    SupportResistanceLevels, support_resistance,
};
pub use crate::vwap::{Vwap, VwapConfig, VwapConfigBuilder, vwap};
pub use crate::williams_r::{WilliamsR, WilliamsRConfig, WilliamsRConfigBuilder, williams_r};
pub use crate::wma::{Wma, WmaConfig, WmaConfigBuilder, wma};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            ///
            /// # Errors
            ///
            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&self, series: &OhlcvSeries) -> Result<$output> {
                <Self as Indicator>::compute(self, series)
            }

            /// See [`Indicator::config`].
            #[must_use]
            #[inline]
            pub fn config(&self) -> &$config {
                <Self as Indicator>::config(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Vec<Price>);
impl_indicator_methods!(Ema, EmaConfig, Vec<Price>);
impl_indicator_methods!(Wma, WmaConfig, Vec<Price>);
impl_indicator_methods!(Vwap, VwapConfig, Vec<Price>);
impl_indicator_methods!(Rsi, RsiConfig, f64);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Stochastic, StochasticConfig, StochasticValue);
impl_indicator_methods!(WilliamsR, WilliamsRConfig, f64);
impl_indicator_methods!(Adx, AdxConfig, AdxValue);
impl_indicator_methods!(Aroon, AroonConfig, AroonValue);
impl_indicator_methods!(Mfi, MfiConfig, f64);
impl_indicator_methods!(Bb, BbConfig, BbValue);
impl_indicator_methods!(Atr, AtrConfig, Price);
impl_indicator_methods!(Natr, NatrConfig, f64);
impl_indicator_methods!(Obv, ObvConfig, Vec<f64>);
impl_indicator_methods!(ParabolicSar, SarConfig, Vec<Price>);
impl_indicator_methods!(Ichimoku, IchimokuConfig, IchimokuValue);
impl_indicator_methods!(SupportResistance, SupportResistanceConfig, SupportResistanceLevels);

#[cfg(test)]
mod test_util;
