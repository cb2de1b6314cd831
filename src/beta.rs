use crate::{
    Result,
    error::{Error, ensure_len, ensure_same_len},
    stats::{covariance, variance},
};

/// Beta of an asset against the market: `cov(asset, market) / var(market)`.
///
/// Both inputs are aligned return series (not prices). Population
/// statistics are used for numerator and denominator alike.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the lengths differ or the market returns
///   have zero variance.
/// - [`Error::InsufficientData`] on empty input.
///
/// # Example
///
/// ```
/// use quantedge_engine::beta;
///
/// let market = [0.01, -0.02, 0.015, 0.003];
/// let doubled: Vec<f64> = market.iter().map(|r| r * 2.0).collect();
///
/// assert!((beta(&doubled, &market).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn beta(asset_returns: &[f64], market_returns: &[f64]) -> Result<f64> {
    ensure_same_len(
        "beta",
        &[
            ("asset_returns", asset_returns.len()),
            ("market_returns", market_returns.len()),
        ],
    )?;
    ensure_len("beta", 1, market_returns.len())?;

    let market_variance = variance(market_returns)?;
    if market_variance == 0.0 {
        return Err(Error::invalid("beta", "market returns have zero variance"));
    }

    Ok(covariance(asset_returns, market_returns)? / market_variance)
}
