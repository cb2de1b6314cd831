use crate::Price;

use std::fmt::{Debug, Display};

/// Price series derived from each bar of an [`OhlcvSeries`](crate::OhlcvSeries)
/// before it is fed into a single-series indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, open: Price, high: Price, low: Price, close: Price) -> Price {
        match self {
            Self::Open => open,
            Self::High => high,
            Self::Close => close,
            Self::Low => low,
            Self::HL2 => f64::midpoint(high, low),
            Self::HLC3 => typical_price(high, low, close),
            Self::OHLC4 => (open + high + low + close) / 4.0,
            Self::HLCC4 => (high + low + close + close) / 4.0,
        }
    }
}

/// Typical price `(high + low + close) / 3`, the MFI input.
#[inline]
pub(crate) fn typical_price(high: Price, low: Price, close: Price) -> Price {
    (high + low + close) / 3.0
}
