//! Headline numbers shown for the home location.

use chrono::NaiveDate;
use serde::Serialize;

use crate::reports::ReportEntity;

/// Case totals and day-over-day deltas for one matched entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub date: NaiveDate,
    pub confirmed: i64,
    pub confirmed_diff: i64,
    pub deaths: i64,
    pub deaths_diff: i64,
}

impl From<&ReportEntity> for ReportSummary {
    fn from(entity: &ReportEntity) -> Self {
        Self {
            date: entity.date,
            confirmed: entity.confirmed,
            confirmed_diff: entity.confirmed_diff,
            deaths: entity.deaths,
            deaths_diff: entity.deaths_diff,
        }
    }
}
