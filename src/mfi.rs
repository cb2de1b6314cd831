use std::fmt::{Debug, Display};

use crate::{
    Indicator, OhlcvSeries, Price, Result,
    error::{ensure_hlc, ensure_len, ensure_period, ensure_same_len},
    indicator::period_config,
    price_source::typical_price,
};

period_config! {
    /// Configuration for the Money Flow Index ([`Mfi`]).
    hlc MfiConfig, MfiConfigBuilder {
        label: "Mfi",
        default_length: 14,
        required_bars: |config| config.length.saturating_add(1),
    }
}

/// Trailing Money Flow Index, in `[0, 100]`.
///
/// Raw money flow is `typical price × volume`, with typical price
/// `(high + low + close) / 3`. Over the last `period` bar-to-bar changes,
/// flow is positive when the typical price rose and negative when it fell.
/// Unchanged typical prices count toward neither side.
///
/// `MFI = 100 − 100 / (1 + positive / negative)`. Zero negative flow
/// resolves to `100`, or to `50` when positive flow is zero as well.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) on a zero period,
///   mismatched lengths or `high < low`.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if fewer
///   than `period + 1` bars are supplied.
pub fn mfi(
    high: &[Price],
    low: &[Price],
    close: &[Price],
    volume: &[f64],
    period: usize,
) -> Result<f64> {
    ensure_period("mfi", "period", period)?;
    ensure_hlc("mfi", high, low, close)?;
    ensure_same_len("mfi", &[("close", close.len()), ("volume", volume.len())])?;
    ensure_len("mfi", period.saturating_add(1), close.len())?;

    let start = close.len() - period - 1;
    let typical: Vec<Price> = (start..close.len())
        .map(|i| typical_price(high[i], low[i], close[i]))
        .collect();

    let (positive, negative) = typical
        .windows(2)
        .zip(&volume[start + 1..])
        .fold((0.0, 0.0), |(pos, neg), (pair, vol)| {
            let flow = pair[1] * vol;
            if pair[1] > pair[0] {
                (pos + flow, neg)
            } else if pair[1] < pair[0] {
                (pos, neg + flow)
            } else {
                (pos, neg)
            }
        });

    if negative == 0.0 {
        if positive == 0.0 {
            tracing::debug!("mfi: no money flow, resolving to 50");
            return Ok(50.0);
        }

        tracing::debug!(positive, "mfi: zero negative flow, resolving to 100");
        return Ok(100.0);
    }

    Ok(100.0 - 100.0 / (1.0 + positive / negative))
}

/// Money Flow Index (MFI), a volume-weighted RSI.
#[derive(Clone, Debug)]
pub struct Mfi {
    config: MfiConfig,
}

impl Indicator for Mfi {
    type Config = MfiConfig;
    type Output = f64;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, series: &OhlcvSeries) -> Result<Self::Output> {
        mfi(
            series.high(),
            series.low(),
            series.close(),
            series.volume(),
            self.config.length(),
        )
    }
}

impl Display for Mfi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MFI({})", self.config.length())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{
        Error,
        test_util::{assert_approx, ohlc},
    };
    use std::num::NonZero;

    mod computation {
        use super::*;

        #[test]
        fn splits_flow_by_direction() {
            // flat bars: typical price = close
            // 10 → 12 (+12 × 2 = 24), 12 → 11 (−11 × 1 = 11), 11 → 13 (+13 × 1 = 13)
            // positive 37, negative 11
            let close = [10.0, 12.0, 11.0, 13.0];
            let value = mfi(&close, &close, &close, &[1.0, 2.0, 1.0, 1.0], 3).unwrap();
            assert_approx!(value, 100.0 - 100.0 / (1.0 + 37.0 / 11.0));
        }

        #[test]
        fn unchanged_typical_price_counts_nowhere() {
            // 10 → 10 is ignored, 10 → 8 is negative 8, 8 → 9 is positive 9
            let close = [10.0, 10.0, 8.0, 9.0];
            let value = mfi(&close, &close, &close, &[1.0; 4], 3).unwrap();
            assert_approx!(value, 100.0 - 100.0 / (1.0 + 9.0 / 8.0));
        }

        #[test]
        fn uses_trailing_window_only() {
            // the drop 50 → 10 is outside the last two changes
            let close = [50.0, 10.0, 11.0, 12.0];
            assert_eq!(mfi(&close, &close, &close, &[1.0; 4], 2).unwrap(), 100.0);
        }
    }

    mod degenerate {
        use super::*;

        #[test]
        fn only_falling_is_0() {
            let close = [5.0, 4.0, 3.0, 2.0];
            assert_eq!(mfi(&close, &close, &close, &[1.0; 4], 3).unwrap(), 0.0);
        }

        #[test]
        fn flat_is_50() {
            let close = [5.0; 4];
            assert_eq!(mfi(&close, &close, &close, &[1.0; 4], 3).unwrap(), 50.0);
        }

        #[test]
        fn zero_volume_is_50() {
            let close = [1.0, 2.0, 3.0];
            assert_eq!(mfi(&close, &close, &close, &[0.0; 3], 2).unwrap(), 50.0);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn needs_period_plus_one_bars() {
            let close = [1.0; 14];
            assert!(matches!(
                mfi(&close, &close, &close, &close, 14),
                Err(Error::InsufficientData { required: 15, actual: 14, .. })
            ));
        }

        #[test]
        fn max_period_is_insufficient() {
            let close = [1.0; 14];
            assert!(matches!(
                mfi(&close, &close, &close, &close, usize::MAX),
                Err(Error::InsufficientData { indicator: "mfi", required: usize::MAX, actual: 14 })
            ));
        }

        #[test]
        fn rejects_short_volume() {
            let close = [1.0; 5];
            assert!(matches!(
                mfi(&close, &close, &close, &[1.0; 4], 2),
                Err(Error::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn indicator_reads_volume() {
        let bars = [
            ohlc(1, 10.0, 10.0, 10.0, 10.0, 1.0),
            ohlc(2, 12.0, 12.0, 12.0, 12.0, 2.0),
            ohlc(3, 11.0, 11.0, 11.0, 11.0, 1.0),
            ohlc(4, 13.0, 13.0, 13.0, 13.0, 1.0),
        ];
        let series = OhlcvSeries::from_bars(&bars).unwrap();
        let mfi_ind = Mfi::new(MfiConfig::with_length(NonZero::new(3).unwrap()));
        assert_approx!(
            mfi_ind.compute(&series).unwrap(),
            100.0 - 100.0 / (1.0 + 37.0 / 11.0)
        );
        assert_eq!(mfi_ind.to_string(), "MFI(3)");
    }
}
