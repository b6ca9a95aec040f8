//! Report fetching with day-by-day fallback.
//!
//! Upstream data for "today" is often not yet published, so an empty answer
//! for a date is retried one day earlier, down to a fixed lookback boundary.

use chrono::{Days, NaiveDate};

use super::client::ReportSource;
use super::types::ReportDataset;
use crate::config::MAX_LOOKBACK_DAYS;
use crate::error_handling::ReportError;

/// Computes the lookback boundary: `today` minus `lookback_days`.
///
/// Callers compute this once, when a resolution starts, and pass it down.
pub fn lookback_boundary(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Fetches reports, stepping back one day at a time while data is missing.
pub struct ReportFetcher<'a> {
    source: &'a dyn ReportSource,
    boundary: NaiveDate,
}

impl<'a> ReportFetcher<'a> {
    /// Creates a fetcher that never steps back past `boundary`.
    pub fn new(source: &'a dyn ReportSource, boundary: NaiveDate) -> Self {
        Self { source, boundary }
    }

    pub fn boundary(&self) -> NaiveDate {
        self.boundary
    }

    /// Returns the first non-empty dataset for `date`, `date - 1`, ...
    ///
    /// A date is retried one day earlier only while it is strictly after the
    /// boundary, so data that is permanently empty costs exactly
    /// `date - boundary` retries. A `date` at or before the boundary is queried
    /// once. Independently of the boundary, no more than `MAX_LOOKBACK_DAYS`
    /// retries are made.
    ///
    /// # Errors
    ///
    /// Transport and payload errors from the source are returned immediately;
    /// they are not treated as "no data".
    pub async fn fetch(
        &self,
        date: NaiveDate,
        region: &str,
        province: &str,
    ) -> Result<Option<ReportDataset>, ReportError> {
        let mut working_date = date;

        for retry in 0..=MAX_LOOKBACK_DAYS {
            match self
                .source
                .fetch_reports(working_date, region, province)
                .await?
            {
                Some(dataset) if !dataset.has_no_entities() => {
                    if retry > 0 {
                        log::debug!(
                            "Reports for {} / {} found on {} after {} fallback day(s)",
                            region,
                            province,
                            working_date,
                            retry
                        );
                    }
                    return Ok(Some(dataset));
                }
                _ => {}
            }

            if working_date <= self.boundary {
                break;
            }
            working_date = match working_date.pred_opt() {
                Some(previous) => previous,
                None => break,
            };
        }

        log::info!(
            "No reports for {} / {} between {} and {}",
            region,
            province,
            working_date,
            date
        );
        Ok(None)
    }
}
