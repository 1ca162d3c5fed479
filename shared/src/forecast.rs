//! Weekly sales resampling and the seasonal forecaster behind the sales
//! forecast report

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Weeks in one seasonal cycle
pub const WEEKS_PER_YEAR: usize = 52;

const ALPHA: f64 = 0.3;
const BETA: f64 = 0.05;
const GAMMA: f64 = 0.2;

/// A weekly observation or forecast point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub week_ending: NaiveDate,
    pub quantity: f64,
}

/// Forecasting failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Not enough history to fit any model
    InsufficientData,
}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::InsufficientData => write!(f, "not enough history to fit a forecast"),
        }
    }
}

impl std::error::Error for ForecastError {}

/// The Sunday that closes the week containing `date`
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(days_to_sunday))
}

/// Sum daily quantities into calendar weeks ending Sunday. Weeks inside the
/// observed range with no sales count as zero. The first bucket is dropped
/// because it usually covers a partial week.
pub fn resample_weekly(daily: &[(NaiveDate, i64)]) -> Vec<WeeklyPoint> {
    if daily.is_empty() {
        return Vec::new();
    }

    let mut by_week: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for &(date, quantity) in daily {
        *by_week.entry(week_ending(date)).or_insert(0) += quantity;
    }

    let first = *by_week.keys().next().unwrap();
    let last = *by_week.keys().next_back().unwrap();

    let mut points = Vec::new();
    let mut week = first;
    while week <= last {
        points.push(WeeklyPoint {
            week_ending: week,
            quantity: by_week.get(&week).copied().unwrap_or(0) as f64,
        });
        week = week + Duration::weeks(1);
    }
    points.remove(0);
    points
}

/// Fit a seasonal model to a regularly spaced series and project `horizon`
/// steps ahead. Additive Holt-Winters when at least two full seasons of
/// history exist, Holt's linear trend otherwise. Projections are floored at
/// zero since negative sales quantities are meaningless.
pub fn fit_and_forecast(
    series: &[f64],
    season_length: usize,
    horizon: usize,
) -> Result<Vec<f64>, ForecastError> {
    if series.len() < 2 {
        return Err(ForecastError::InsufficientData);
    }

    if season_length >= 2 && series.len() >= 2 * season_length {
        Ok(holt_winters_additive(series, season_length, horizon))
    } else {
        Ok(holt_linear(series, horizon))
    }
}

fn holt_winters_additive(series: &[f64], season_length: usize, horizon: usize) -> Vec<f64> {
    let m = season_length;
    let first_season_mean: f64 = series[..m].iter().sum::<f64>() / m as f64;
    let second_season_mean: f64 = series[m..2 * m].iter().sum::<f64>() / m as f64;

    let mut level = first_season_mean;
    let mut trend = (second_season_mean - first_season_mean) / m as f64;
    let mut seasonal: Vec<f64> = (0..m).map(|i| series[i] - first_season_mean).collect();

    for (t, &observed) in series.iter().enumerate() {
        let s = t % m;
        let prev_level = level;
        level = ALPHA * (observed - seasonal[s]) + (1.0 - ALPHA) * (level + trend);
        trend = BETA * (level - prev_level) + (1.0 - BETA) * trend;
        seasonal[s] = GAMMA * (observed - level) + (1.0 - GAMMA) * seasonal[s];
    }

    let n = series.len();
    (1..=horizon)
        .map(|h| {
            let s = (n + h - 1) % m;
            (level + h as f64 * trend + seasonal[s]).max(0.0)
        })
        .collect()
}

fn holt_linear(series: &[f64], horizon: usize) -> Vec<f64> {
    let mut level = series[0];
    let mut trend = series[1] - series[0];

    for &observed in &series[1..] {
        let prev_level = level;
        level = ALPHA * observed + (1.0 - ALPHA) * (level + trend);
        trend = BETA * (level - prev_level) + (1.0 - BETA) * trend;
    }

    (1..=horizon)
        .map(|h| (level + h as f64 * trend).max(0.0))
        .collect()
}
