//! Geocoding service access.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_retry::RetryIf;
use url::Url;

use super::types::GeocodeResponse;
use crate::error_handling::{get_retry_strategy, is_retriable_reqwest_error, GeocodeError};

/// A forward/reverse geocoding service.
///
/// Implementations return the raw response including its status; callers
/// decide what a non-OK status means.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-form address.
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError>;

    /// Resolves a coordinate into addresses.
    async fn reverse_geocode(&self, lat: f64, long: f64) -> Result<GeocodeResponse, GeocodeError>;
}

/// Geocoder backed by the Google Geocoding web service (`/geocode/json`).
pub struct GoogleGeocoder {
    client: Arc<reqwest::Client>,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Creates a geocoder for `base_url` (e.g. `https://maps.googleapis.com/maps/api`).
    pub fn new(client: Arc<reqwest::Client>, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/geocode/json", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    fn address_url(&self, address: &str) -> Result<Url, GeocodeError> {
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[("address", address), ("key", self.api_key.as_str())],
        )?)
    }

    fn latlng_url(&self, lat: f64, long: f64) -> Result<Url, GeocodeError> {
        let latlng = format!("{},{}", lat, long);
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[("latlng", latlng.as_str()), ("key", self.api_key.as_str())],
        )?)
    }

    async fn fetch(&self, url: Url) -> Result<GeocodeResponse, GeocodeError> {
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
                        .json::<GeocodeResponse>()
                        .await
                }
            },
            is_retriable_reqwest_error,
        )
        .await?;

        log::debug!(
            "Geocoder returned status {} with {} result(s)",
            response.status,
            response.results.len()
        );
        Ok(response)
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        let url = self.address_url(address)?;
        self.fetch(url).await
    }

    async fn reverse_geocode(&self, lat: f64, long: f64) -> Result<GeocodeResponse, GeocodeError> {
        let url = self.latlng_url(lat, long)?;
        self.fetch(url).await
    }
}
