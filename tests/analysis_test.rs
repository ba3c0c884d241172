//! Analysis engine behaviour over whole price series.

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use proptest::prelude::*;
use stockdash::domain::analysis::{
    compute_analysis, compute_moving_average, round2, Trend, INSUFFICIENT_DATA, LONG_PERIOD,
    MEDIUM_PERIOD, SHORT_PERIOD,
};
use stockdash::domain::error::DashError;

#[test]
fn flat_series_has_zero_volatility() {
    let bars = bars_from_closes(&[10.0; 5]);
    assert_eq!(compute_moving_average(&bars, 5), 10.0);

    let summary = compute_analysis(&bars).unwrap();
    assert_eq!(summary.moving_average_5, 10.0);
    assert_eq!(summary.volatility, 0.0);
}

#[test]
fn short_series_yields_insufficient_data() {
    let bars = bars_from_closes(&[10.0, 11.0, 12.0]);
    assert_eq!(compute_moving_average(&bars, 5), INSUFFICIENT_DATA);

    let summary = compute_analysis(&bars).unwrap();
    assert_eq!(summary.moving_average_5, 0.0);
    assert_eq!(summary.moving_average_20, 0.0);
    assert_eq!(summary.moving_average_50, 0.0);
    assert_eq!(summary.trend, Trend::Sideways);
}

#[test]
fn population_volatility_of_one_to_five() {
    let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let summary = compute_analysis(&bars).unwrap();
    assert_eq!(summary.moving_average_5, 3.0);
    assert_eq!(summary.volatility, 1.41);
}

#[test]
fn trend_classification() {
    assert_eq!(Trend::classify(105.0, 100.0, 95.0), Trend::Up);
    assert_eq!(Trend::classify(95.0, 100.0, 105.0), Trend::Down);
    assert_eq!(Trend::classify(100.0, 100.0, 100.0), Trend::Sideways);
}

#[test]
fn rising_series_of_sixty_days_trends_up() {
    let bars = generate_bars(60, 100.0, 1.0);
    let summary = compute_analysis(&bars).unwrap();
    // last five closes are 155..=159
    assert_eq!(summary.moving_average_5, 157.0);
    assert_eq!(summary.moving_average_20, 149.5);
    assert_eq!(summary.moving_average_50, 134.5);
    assert_eq!(summary.trend, Trend::Up);
}

#[test]
fn falling_series_trends_down() {
    let bars = generate_bars(LONG_PERIOD, 200.0, -1.0);
    let summary = compute_analysis(&bars).unwrap();
    assert_eq!(summary.trend, Trend::Down);
}

#[test]
fn thirty_one_bars_leave_long_average_unavailable() {
    let bars = generate_bars(31, 100.0, 0.5);
    let summary = compute_analysis(&bars).unwrap();
    assert!(summary.moving_average_5 > 0.0);
    assert!(summary.moving_average_20 > 0.0);
    assert_eq!(summary.moving_average_50, INSUFFICIENT_DATA);
    // the sentinel takes part in the ordering: 5 > 20 > 0
    assert_eq!(summary.trend, Trend::Up);
}

#[test]
fn empty_series_is_rejected() {
    let err = compute_analysis(&[]).unwrap_err();
    assert!(matches!(err, DashError::InvalidArgument { .. }));
}

#[test]
fn summary_serializes_camel_case() {
    let summary = compute_analysis(&generate_bars(25, 50.0, 1.0)).unwrap();
    let json = serde_json::to_value(summary).unwrap();
    assert!(json.get("movingAverage5").is_some());
    assert_eq!(json["movingAverage50"], 0.0);
    assert_eq!(json["trend"], "up");
}

fn closes_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..=500, 1..=60)
}

fn to_bars(closes: &[u32]) -> Vec<PriceBar> {
    let closes: Vec<f64> = closes.iter().map(|&c| c as f64).collect();
    bars_from_closes(&closes)
}

proptest! {
    #[test]
    fn moving_average_is_mean_of_trailing_window(closes in closes_strategy()) {
        let bars = to_bars(&closes);
        for period in [SHORT_PERIOD, MEDIUM_PERIOD, LONG_PERIOD] {
            let ma = compute_moving_average(&bars, period);
            if closes.len() < period {
                prop_assert_eq!(ma, INSUFFICIENT_DATA);
            } else {
                let window = &closes[closes.len() - period..];
                let mean = window.iter().map(|&c| c as f64).sum::<f64>() / period as f64;
                assert_abs_diff_eq!(ma, mean, epsilon = 0.005 + 1e-9);
            }
        }
    }

    #[test]
    fn volatility_is_zero_only_for_flat_series(closes in closes_strategy()) {
        let summary = compute_analysis(&to_bars(&closes)).unwrap();
        prop_assert!(summary.volatility >= 0.0);
        let flat = closes.iter().all(|&c| c == closes[0]);
        prop_assert_eq!(summary.volatility == 0.0, flat);
    }

    #[test]
    fn rounded_values_print_as_the_raw_value(v in -1.0e6f64..1.0e6) {
        prop_assert_eq!(format!("{:.2}", round2(v)), format!("{:.2}", v));
    }

    #[test]
    fn equal_averages_are_sideways(a in 1.0f64..1000.0, b in 1.0f64..1000.0) {
        prop_assert_eq!(Trend::classify(a, a, b), Trend::Sideways);
        prop_assert_eq!(Trend::classify(a, b, b), Trend::Sideways);
        prop_assert_eq!(Trend::classify(b, a, b), Trend::Sideways);
    }
}
