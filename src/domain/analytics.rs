//! Client-side derivations over the backend's analytics aggregate.

use jamjournal_api_types::{Analytics, CountryCount};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryShare {
    pub country: String,
    pub count: u64,
    /// Whole percent of all visits, rounded half away from zero.
    pub percent: u32,
}

pub fn total_visits(rows: &[CountryCount]) -> u64 {
    rows.iter().map(|row| row.count).sum()
}

/// Percent share per country; every share is 0 when there were no visits.
pub fn country_shares(rows: &[CountryCount]) -> Vec<CountryShare> {
    let total = total_visits(rows);
    rows.iter()
        .map(|row| CountryShare {
            country: row.country.clone(),
            count: row.count,
            percent: percent_of(row.count, total),
        })
        .collect()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percent_of(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub total_rating: u64,
    /// Average rating rounded to two decimals.
    pub avg_rating: f64,
    pub countries: Vec<CountryShare>,
}

impl AnalyticsSummary {
    pub fn from_report(report: &Analytics) -> Self {
        Self {
            total_views: report.total_views,
            total_rating: report.total_rating,
            avg_rating: (report.avg_rating * 100.0).round() / 100.0,
            countries: country_shares(&report.global_distribution),
        }
    }
}
