//! Window statistics shared by the indicator families.
//!
//! All functions operate on the slice they are given; callers slice the
//! trailing range themselves. Variance-style statistics are population
//! statistics (divide by `N`).

use crate::{
    Price,
    error::{Result, ensure_len, ensure_same_len},
};

/// Arithmetic mean of `window`.
///
/// # Errors
///
/// [`Error::InsufficientData`](crate::Error::InsufficientData) if `window` is empty.
pub fn mean(window: &[f64]) -> Result<f64> {
    ensure_len("mean", 1, window.len())?;

    Ok(mean_unchecked(window))
}

/// Population standard deviation of `window`.
///
/// # Errors
///
/// [`Error::InsufficientData`](crate::Error::InsufficientData) if `window` is empty.
pub fn stddev(window: &[f64]) -> Result<f64> {
    ensure_len("stddev", 1, window.len())?;

    Ok(stddev_unchecked(window))
}

/// Population variance of `series`.
///
/// # Errors
///
/// [`Error::InsufficientData`](crate::Error::InsufficientData) if `series` is empty.
pub fn variance(series: &[f64]) -> Result<f64> {
    ensure_len("variance", 1, series.len())?;

    Ok(variance_unchecked(series))
}

/// Population covariance of two aligned series.
///
/// # Errors
///
/// - [`Error::InvalidInput`](crate::Error::InvalidInput) if the lengths differ.
/// - [`Error::InsufficientData`](crate::Error::InsufficientData) if they are empty.
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    ensure_same_len("covariance", &[("x", x.len()), ("y", y.len())])?;
    ensure_len("covariance", 1, x.len())?;

    let x_mean = mean_unchecked(x);
    let y_mean = mean_unchecked(y);
    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    Ok(sum / len_f64(x))
}

/// Largest value in `window`.
///
/// # Errors
///
/// [`Error::InsufficientData`](crate::Error::InsufficientData) if `window` is empty.
pub fn highest(window: &[Price]) -> Result<Price> {
    ensure_len("highest", 1, window.len())?;

    Ok(highest_unchecked(window))
}

/// Smallest value in `window`.
///
/// # Errors
///
/// [`Error::InsufficientData`](crate::Error::InsufficientData) if `window` is empty.
pub fn lowest(window: &[Price]) -> Result<Price> {
    ensure_len("lowest", 1, window.len())?;

    Ok(lowest_unchecked(window))
}

#[inline]
pub(crate) fn highest_unchecked(window: &[Price]) -> Price {
    window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[inline]
pub(crate) fn lowest_unchecked(window: &[Price]) -> Price {
    window.iter().copied().fold(f64::INFINITY, f64::min)
}

#[inline]
pub(crate) fn mean_unchecked(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / len_f64(window)
}

#[inline]
pub(crate) fn stddev_unchecked(window: &[f64]) -> f64 {
    variance_unchecked(window).sqrt()
}

#[inline]
fn variance_unchecked(window: &[f64]) -> f64 {
    let mean = mean_unchecked(window);
    let sum_sq: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();

    sum_sq / len_f64(window)
}

#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn len_f64<T>(values: &[T]) -> f64 {
    values.len() as f64
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{Error, test_util::assert_approx};

    mod averaging {
        use super::*;

        #[test]
        fn averages_window() {
            assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        }

        #[test]
        fn empty_is_insufficient() {
            assert!(matches!(
                mean(&[]),
                Err(Error::InsufficientData { indicator: "mean", required: 1, actual: 0 })
            ));
        }
    }

    mod deviation {
        use super::*;

        #[test]
        fn population_not_sample() {
            // mean 5, squared deviations sum to 32, 32 / 8 = 4
            let window = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
            assert_eq!(stddev(&window).unwrap(), 2.0);
        }

        #[test]
        fn constant_window_is_zero() {
            assert_eq!(stddev(&[7.5; 10]).unwrap(), 0.0);
        }

        #[test]
        fn single_value_is_zero() {
            assert_eq!(stddev(&[3.0]).unwrap(), 0.0);
        }

        #[test]
        fn empty_is_insufficient() {
            assert!(matches!(stddev(&[]), Err(Error::InsufficientData { .. })));
        }
    }

    mod dispersion {
        use super::*;

        #[test]
        fn population_variance() {
            // mean 2, deviations 1, 0, 1 -> 2 / 3
            assert_approx!(variance(&[1.0, 2.0, 3.0]).unwrap(), 2.0 / 3.0);
        }

        #[test]
        fn equals_covariance_with_itself() {
            let x = [1.5, -2.0, 3.25, 0.5, 8.0];
            assert_approx!(variance(&x).unwrap(), covariance(&x, &x).unwrap());
        }

        #[test]
        fn empty_is_insufficient() {
            assert!(matches!(variance(&[]), Err(Error::InsufficientData { .. })));
        }
    }

    mod co_movement {
        use super::*;

        #[test]
        fn positively_related() {
            // x mean 2, y mean 4: (-1)(-2) + 0 + (1)(2) = 4, / 3
            assert_approx!(covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap(), 4.0 / 3.0);
        }

        #[test]
        fn inversely_related() {
            assert_approx!(
                covariance(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap(),
                -4.0 / 3.0
            );
        }

        #[test]
        fn length_mismatch_is_invalid() {
            assert!(matches!(
                covariance(&[1.0, 2.0], &[1.0]),
                Err(Error::InvalidInput { indicator: "covariance", .. })
            ));
        }

        #[test]
        fn empty_is_insufficient() {
            assert!(matches!(
                covariance(&[], &[]),
                Err(Error::InsufficientData { .. })
            ));
        }
    }

    mod extrema {
        use super::*;

        #[test]
        fn highest_and_lowest() {
            let window = [3.0, -1.0, 7.0, 2.0];
            assert_eq!(highest(&window).unwrap(), 7.0);
            assert_eq!(lowest(&window).unwrap(), -1.0);
        }

        #[test]
        fn empty_is_insufficient() {
            assert!(matches!(highest(&[]), Err(Error::InsufficientData { .. })));
            assert!(matches!(lowest(&[]), Err(Error::InsufficientData { .. })));
        }
    }
}
