//! Report data structures.
//!
//! `*Record` types mirror the report API JSON; [`ReportDataset`],
//! [`AggregateReport`] and [`ReportEntity`] are the validated domain values the
//! fetcher and matcher work with.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{REPORT_DATE_FORMAT, REPORT_TIMESTAMP_FORMAT};
use crate::error_handling::ReportError;

/// Top-level report API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub data: Vec<RegionRecord>,
}

/// One region/province report for one date, with its sub-region records.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub date: String,
    #[serde(default)]
    pub confirmed: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub recovered: i64,
    #[serde(default)]
    pub confirmed_diff: i64,
    #[serde(default)]
    pub deaths_diff: i64,
    #[serde(default)]
    pub recovered_diff: i64,
    pub last_update: String,
    #[serde(default)]
    pub active: i64,
    #[serde(default)]
    pub active_diff: i64,
    #[serde(default)]
    pub fatality_rate: f64,
    pub region: RegionInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionInfo {
    #[serde(default)]
    pub iso: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub long: Option<f64>,
    #[serde(default)]
    pub cities: Vec<CityRecord>,
}

/// Sub-region (county-equivalent) record.
#[derive(Debug, Clone, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub fips: Option<i64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub long: Option<f64>,
    #[serde(default)]
    pub confirmed: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub confirmed_diff: i64,
    #[serde(default)]
    pub deaths_diff: i64,
    pub last_update: String,
}

/// Coordinates arrive as strings ("41.84"), numbers, empty strings or null.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// One dated case record for a sub-region or a whole province.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntity {
    pub name: String,
    pub date: NaiveDate,
    pub confirmed: i64,
    pub deaths: i64,
    pub confirmed_diff: i64,
    pub deaths_diff: i64,
    pub last_update: NaiveDateTime,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

/// Province-level totals of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub iso: String,
    pub region_name: String,
    pub province: String,
    pub date: NaiveDate,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    pub confirmed_diff: i64,
    pub deaths_diff: i64,
    pub recovered_diff: i64,
    pub active: i64,
    pub fatality_rate: f64,
    pub last_update: NaiveDateTime,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

/// One date's report: province totals plus ordered sub-region records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDataset {
    pub aggregate: AggregateReport,
    pub entities: Vec<ReportEntity>,
}

impl ReportDataset {
    /// True when the dataset carries no sub-region records.
    pub fn has_no_entities(&self) -> bool {
        self.entities.is_empty()
    }
}

pub(crate) fn parse_report_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT)
        .map_err(|e| ReportError::Malformed(format!("date {:?}: {}", value, e)))
}

pub(crate) fn parse_report_timestamp(value: &str) -> Result<NaiveDateTime, ReportError> {
    NaiveDateTime::parse_from_str(value.trim(), REPORT_TIMESTAMP_FORMAT)
        .map_err(|e| ReportError::Malformed(format!("last_update {:?}: {}", value, e)))
}

impl TryFrom<CityRecord> for ReportEntity {
    type Error = ReportError;

    fn try_from(record: CityRecord) -> Result<Self, Self::Error> {
        Ok(ReportEntity {
            date: parse_report_date(&record.date)?,
            last_update: parse_report_timestamp(&record.last_update)?,
            name: record.name,
            confirmed: record.confirmed,
            deaths: record.deaths,
            confirmed_diff: record.confirmed_diff,
            deaths_diff: record.deaths_diff,
            lat: record.lat,
            long: record.long,
        })
    }
}

impl TryFrom<RegionRecord> for ReportDataset {
    type Error = ReportError;

    fn try_from(record: RegionRecord) -> Result<Self, Self::Error> {
        let entities = record
            .region
            .cities
            .into_iter()
            .map(ReportEntity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let aggregate = AggregateReport {
            iso: record.region.iso,
            region_name: record.region.name,
            province: record.region.province,
            date: parse_report_date(&record.date)?,
            confirmed: record.confirmed,
            deaths: record.deaths,
            recovered: record.recovered,
            confirmed_diff: record.confirmed_diff,
            deaths_diff: record.deaths_diff,
            recovered_diff: record.recovered_diff,
            active: record.active,
            fatality_rate: record.fatality_rate,
            last_update: parse_report_timestamp(&record.last_update)?,
            lat: record.region.lat,
            long: record.region.long,
        };

        Ok(ReportDataset {
            aggregate,
            entities,
        })
    }
}

impl ReportResponse {
    /// Converts the first region record into a dataset; `None` if there is none.
    pub fn into_dataset(self) -> Result<Option<ReportDataset>, ReportError> {
        match self.data.into_iter().next() {
            Some(record) => ReportDataset::try_from(record).map(Some),
            None => Ok(None),
        }
    }
}
