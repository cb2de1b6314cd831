mod fixtures;

use fixtures::{assert_near, bars_through, load_reference_ohlcvs, load_stoch_ref, prefix_series};
use quantedge_engine::{Error, IndicatorConfig, Stochastic, StochasticConfig};

const REF_PATH: &str = "tests/fixtures/data/stoch-14-3-3.csv";

const TOLERANCE: f64 = 1e-6;

#[test]
fn stoch_14_3_3_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_stoch_ref(REF_PATH);
    let stoch = Stochastic::new(StochasticConfig::default());

    for (ref_idx, row) in reference.iter().enumerate() {
        let len = bars_through(&bars, row.open_time);
        let value = stoch
            .compute(&prefix_series(&bars, len))
            .unwrap_or_else(|e| panic!("STOCH failed at t={}: {e}", row.open_time));
        let ctx = format!("STOCH(14,3,3) at row {ref_idx} (t={})", row.open_time);

        assert_near(value.k(), row.k, TOLERANCE, &format!("{ctx} %K"));
        assert_near(value.d(), row.d, TOLERANCE, &format!("{ctx} %D"));
    }
}

#[test]
fn stoch_needs_both_smoothing_windows() {
    let bars = load_reference_ohlcvs();
    let reference = load_stoch_ref(REF_PATH);
    let stoch = Stochastic::new(StochasticConfig::default());

    let len = bars_through(&bars, reference[0].open_time);
    assert_eq!(len, stoch.config().required_bars());
    assert!(matches!(
        stoch.compute(&prefix_series(&bars, len - 1)),
        Err(Error::InsufficientData { .. })
    ));
}
