//! Report source access.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_retry::RetryIf;
use url::Url;

use super::types::{ReportDataset, ReportResponse};
use crate::config::REPORT_DATE_FORMAT;
use crate::error_handling::{get_retry_strategy, is_retriable_reqwest_error, ReportError};

/// A source of dated, per-province case reports.
///
/// `Ok(None)` (or a dataset without sub-records) means "nothing published for
/// this date", which the fetcher answers by trying an earlier date.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_reports(
        &self,
        date: NaiveDate,
        region: &str,
        province: &str,
    ) -> Result<Option<ReportDataset>, ReportError>;
}

/// Report source backed by the covid-api.com `/reports` endpoint.
pub struct CovidApiSource {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl CovidApiSource {
    /// Creates a source for `base_url` (e.g. `https://covid-api.com/api`).
    pub fn new(client: Arc<reqwest::Client>, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/reports", base_url.trim_end_matches('/')),
        }
    }

    fn reports_url(&self, date: NaiveDate, region: &str, province: &str) -> Result<Url, ReportError> {
        let formatted_date = date.format(REPORT_DATE_FORMAT).to_string();
        let q = format!("{} {}", region, province);
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[
                ("date", formatted_date.as_str()),
                ("q", q.trim()),
                ("iso", region),
                ("region_province", province),
            ],
        )?)
    }
}

#[async_trait]
impl ReportSource for CovidApiSource {
    async fn fetch_reports(
        &self,
        date: NaiveDate,
        region: &str,
        province: &str,
    ) -> Result<Option<ReportDataset>, ReportError> {
        let url = self.reports_url(date, region, province)?;
        log::debug!("Fetching reports: {}", url);

        let response = RetryIf::spawn(
            get_retry_strategy(),
            || {
                let url = url.clone();
                async move {
                    self.client
                        .get(url)
                        .send()
                        .await?
                        .error_for_status()?
                        .json::<ReportResponse>()
                        .await
                }
            },
            is_retriable_reqwest_error,
        )
        .await?;

        response.into_dataset()
    }
}
