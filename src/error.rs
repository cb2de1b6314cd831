use thiserror::Error;

/// Error returned by every indicator computation.
///
/// Failures are never masked: a bad series yields one of these variants and
/// the caller decides how to present it. No variant is fatal, a failure for
/// one series has no effect on any other computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Inputs violate the indicator contract: mismatched lengths, zero
    /// periods, a bar with `high < low`, out-of-order timestamps.
    #[error("{indicator}: invalid input: {reason}")]
    InvalidInput {
        /// Indicator or primitive that rejected the input.
        indicator: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The series is shorter than the indicator's warm-up requirement.
    #[error("{indicator}: insufficient data: required {required} values, got {actual}")]
    InsufficientData {
        /// Indicator or primitive that needed more history.
        indicator: &'static str,
        /// Minimum number of values required.
        required: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A mathematical edge case with no meaningful resolved value.
    #[error("{indicator}: degenerate computation: {reason}")]
    DegenerateComputation {
        /// Indicator that hit the edge case.
        indicator: &'static str,
        /// Which quantity degenerated.
        reason: &'static str,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(indicator: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            indicator,
            reason: reason.into(),
        }
    }
}

/// Rejects a zero window length.
pub(crate) fn ensure_period(indicator: &'static str, name: &str, period: usize) -> Result<()> {
    if period == 0 {
        return Err(Error::invalid(indicator, format!("{name} must be positive")));
    }

    Ok(())
}

/// Rejects inputs shorter than `required`.
pub(crate) fn ensure_len(indicator: &'static str, required: usize, actual: usize) -> Result<()> {
    if actual < required {
        return Err(Error::InsufficientData {
            indicator,
            required,
            actual,
        });
    }

    Ok(())
}

/// Rejects parallel inputs whose lengths differ.
pub(crate) fn ensure_same_len(indicator: &'static str, columns: &[(&str, usize)]) -> Result<()> {
    if let Some(&(first_name, first_len)) = columns.first() {
        for &(name, len) in &columns[1..] {
            if len != first_len {
                return Err(Error::invalid(
                    indicator,
                    format!("length mismatch: {first_name}={first_len}, {name}={len}"),
                ));
            }
        }
    }

    Ok(())
}

/// Rejects any bar whose high is below its low.
pub(crate) fn ensure_high_low(indicator: &'static str, high: &[f64], low: &[f64]) -> Result<()> {
    match high.iter().zip(low).position(|(h, l)| h < l) {
        Some(i) => Err(Error::invalid(
            indicator,
            format!("high < low at bar {i}: high={}, low={}", high[i], low[i]),
        )),
        None => Ok(()),
    }
}

/// Validates aligned high/low/close columns: equal lengths, then `high >= low`.
pub(crate) fn ensure_hlc(
    indicator: &'static str,
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> Result<()> {
    ensure_same_len(
        indicator,
        &[("high", high.len()), ("low", low.len()), ("close", close.len())],
    )?;
    ensure_high_low(indicator, high, low)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod display {
        use super::*;

        #[test]
        fn invalid_input() {
            let err = Error::invalid("sma", "period must be positive");
            assert_eq!(err.to_string(), "sma: invalid input: period must be positive");
        }

        #[test]
        fn insufficient_data() {
            let err = Error::InsufficientData {
                indicator: "rsi",
                required: 15,
                actual: 10,
            };
            assert_eq!(
                err.to_string(),
                "rsi: insufficient data: required 15 values, got 10"
            );
        }

        #[test]
        fn degenerate_computation() {
            let err = Error::DegenerateComputation {
                indicator: "natr",
                reason: "trailing close is zero",
            };
            assert_eq!(
                err.to_string(),
                "natr: degenerate computation: trailing close is zero"
            );
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn zero_period_rejected() {
            assert!(matches!(
                ensure_period("sma", "period", 0),
                Err(Error::InvalidInput { indicator: "sma", .. })
            ));
            assert!(ensure_period("sma", "period", 1).is_ok());
        }

        #[test]
        fn short_input_rejected() {
            assert_eq!(
                ensure_len("sma", 5, 3),
                Err(Error::InsufficientData {
                    indicator: "sma",
                    required: 5,
                    actual: 3,
                })
            );
            assert!(ensure_len("sma", 5, 5).is_ok());
        }

        #[test]
        fn length_mismatch_names_columns() {
            let err = ensure_same_len("obv", &[("prices", 3), ("volumes", 2)]).unwrap_err();
            assert_eq!(
                err.to_string(),
                "obv: invalid input: length mismatch: prices=3, volumes=2"
            );
        }

        #[test]
        fn inverted_bar_reported_with_index() {
            let err = ensure_high_low("atr", &[2.0, 1.0], &[1.0, 3.0]).unwrap_err();
            assert_eq!(
                err.to_string(),
                "atr: invalid input: high < low at bar 1: high=1, low=3"
            );
        }

        #[test]
        fn hlc_checks_lengths_before_bars() {
            let err = ensure_hlc("adx", &[1.0], &[2.0, 1.0], &[1.0, 1.0]).unwrap_err();
            assert!(err.to_string().contains("length mismatch"));
        }
    }
}
