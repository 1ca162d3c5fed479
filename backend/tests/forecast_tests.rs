//! Sales forecast tests
//!
//! Covers weekly resampling and the seasonal forecaster.

use chrono::{Datelike, NaiveDate, Weekday};

use shared::forecast::{
    fit_and_forecast, resample_weekly, week_ending, ForecastError, WEEKS_PER_YEAR,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Weekly Resampling
// ============================================================================

#[test]
fn test_week_ending_is_sunday() {
    // 2024-07-01 is a Monday
    assert_eq!(week_ending(date(2024, 7, 1)), date(2024, 7, 7));
    // Sundays map to themselves
    assert_eq!(week_ending(date(2024, 7, 7)), date(2024, 7, 7));

    for offset in 0..14 {
        let d = date(2024, 7, 1) + chrono::Duration::days(offset);
        assert_eq!(week_ending(d).weekday(), Weekday::Sun);
        assert!(week_ending(d) >= d);
    }
}

#[test]
fn test_resample_drops_partial_first_week() {
    // a Friday sale, then sales across the two full following weeks
    let daily = vec![
        (date(2024, 7, 5), 3),
        (date(2024, 7, 8), 2),
        (date(2024, 7, 10), 1),
        (date(2024, 7, 16), 4),
    ];

    let weekly = resample_weekly(&daily);
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0].week_ending, date(2024, 7, 14));
    assert_eq!(weekly[0].quantity, 3.0);
    assert_eq!(weekly[1].week_ending, date(2024, 7, 21));
    assert_eq!(weekly[1].quantity, 4.0);
}

#[test]
fn test_resample_zero_fills_gap_weeks() {
    let daily = vec![(date(2024, 7, 1), 5), (date(2024, 7, 22), 5)];

    // weeks ending 7/7, 7/14, 7/21, 7/28; the first is dropped
    let weekly = resample_weekly(&daily);
    assert_eq!(weekly.len(), 3);
    assert_eq!(weekly[0].week_ending, date(2024, 7, 14));
    assert_eq!(weekly[0].quantity, 0.0);
    assert_eq!(weekly[1].quantity, 0.0);
    assert_eq!(weekly[2].week_ending, date(2024, 7, 28));
    assert_eq!(weekly[2].quantity, 5.0);
}

#[test]
fn test_resample_single_week_collapses_to_empty() {
    let daily = vec![(date(2024, 7, 2), 4), (date(2024, 7, 4), 1)];
    assert!(resample_weekly(&daily).is_empty());
}

#[test]
fn test_resample_empty_input() {
    assert!(resample_weekly(&[]).is_empty());
}

// ============================================================================
// Forecaster
// ============================================================================

#[test]
fn test_forecast_insufficient_data() {
    assert_eq!(
        fit_and_forecast(&[], WEEKS_PER_YEAR, 52),
        Err(ForecastError::InsufficientData)
    );
    assert_eq!(
        fit_and_forecast(&[1.0], WEEKS_PER_YEAR, 52),
        Err(ForecastError::InsufficientData)
    );
}

#[test]
fn test_forecast_horizon_length() {
    let series: Vec<f64> = (0..120).map(|i| (i % 10) as f64 + 5.0).collect();

    let forecast = fit_and_forecast(&series, WEEKS_PER_YEAR, 52).unwrap();
    assert_eq!(forecast.len(), 52);
    assert!(forecast.iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
fn test_forecast_short_history_uses_trend() {
    // a steadily rising series, far less than two seasons of history
    let series: Vec<f64> = (1..=10).map(|i| i as f64).collect();

    let forecast = fit_and_forecast(&series, WEEKS_PER_YEAR, 4).unwrap();
    assert_eq!(forecast.len(), 4);
    assert!(forecast[0] > 9.0);
    assert!(forecast[3] >= forecast[0]);
}

#[test]
fn test_forecast_follows_seasonal_pattern() {
    // four full cycles of a strongly seasonal pattern
    let pattern = [10.0, 50.0, 10.0, 50.0];
    let series: Vec<f64> = std::iter::repeat(pattern).take(4).flatten().collect();

    let forecast = fit_and_forecast(&series, 4, 8).unwrap();
    assert_eq!(forecast.len(), 8);

    // peaks and troughs continue to alternate
    assert!(forecast[1] > forecast[0]);
    assert!(forecast[2] < forecast[1]);
    assert!((forecast[0] - 10.0).abs() < 5.0);
    assert!((forecast[1] - 50.0).abs() < 5.0);
}

#[test]
fn test_forecast_never_negative() {
    // a steeply falling series would extrapolate below zero without the floor
    let series: Vec<f64> = (0..10).map(|i| 100.0 - 12.0 * i as f64).collect();

    let forecast = fit_and_forecast(&series, WEEKS_PER_YEAR, 10).unwrap();
    assert!(forecast.iter().all(|v| *v >= 0.0));
}
