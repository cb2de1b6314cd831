use std::fmt::Display;

use crate::{Price, Result, error::Error};

/// Retracement ratios, in ascending order.
pub const FIBONACCI_RATIOS: [f64; 6] = [0.0, 0.236, 0.382, 0.5, 0.618, 1.0];

/// Fibonacci retracement levels between a swing low and a swing high.
///
/// Each level is `low + ratio × (high − low)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FibonacciLevels {
    levels: [Price; 6],
}

impl FibonacciLevels {
    /// Level at ratio `0`, the swing low.
    #[inline]
    #[must_use]
    pub fn level_0(&self) -> Price {
        self.levels[0]
    }

    #[inline]
    #[must_use]
    pub fn level_236(&self) -> Price {
        self.levels[1]
    }

    #[inline]
    #[must_use]
    pub fn level_382(&self) -> Price {
        self.levels[2]
    }

    #[inline]
    #[must_use]
    pub fn level_500(&self) -> Price {
        self.levels[3]
    }

    #[inline]
    #[must_use]
    pub fn level_618(&self) -> Price {
        self.levels[4]
    }

    /// Level at ratio `1`, the swing high.
    #[inline]
    #[must_use]
    pub fn level_100(&self) -> Price {
        self.levels[5]
    }

    /// `(ratio, price)` pairs in ratio order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, Price)> + '_ {
        FIBONACCI_RATIOS.iter().copied().zip(self.levels.iter().copied())
    }
}

impl Display for FibonacciLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fib(")?;
        for (i, (ratio, price)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ratio}: {price}")?;
        }
        write!(f, ")")
    }
}

/// Fibonacci retracement levels for a swing from `low` to `high`.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `high < low` or either bound is not finite.
///
/// # Example
///
/// ```
/// use quantedge_engine::fibonacci_levels;
///
/// let levels = fibonacci_levels(100.0, 50.0).unwrap();
/// assert_eq!(levels.level_500(), 75.0);
/// assert_eq!(levels.level_100(), 100.0);
/// ```
pub fn fibonacci_levels(high: Price, low: Price) -> Result<FibonacciLevels> {
    if !high.is_finite() || !low.is_finite() {
        return Err(Error::invalid(
            "fibonacci_levels",
            format!("bounds must be finite: high={high}, low={low}"),
        ));
    }

    if high < low {
        return Err(Error::invalid(
            "fibonacci_levels",
            format!("high < low: high={high}, low={low}"),
        ));
    }

    let range = high - low;

    Ok(FibonacciLevels {
        levels: FIBONACCI_RATIOS.map(|ratio| low + ratio * range),
    })
}
