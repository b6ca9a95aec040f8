// Shared test helpers: canned service payloads and a resolver wired to a mock server.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};

use case_locator::geocode::GoogleGeocoder;
use case_locator::initialization::init_client;
use case_locator::reports::CovidApiSource;
use case_locator::{Config, Resolver};

fn geocode_result(tag: &str, long_name: &str, short_name: &str, lat: f64, lng: f64) -> Value {
    json!({
        "types": [tag, "political"],
        "address_components": [
            {"long_name": long_name, "short_name": short_name, "types": [tag, "political"]}
        ],
        "geometry": {"location": {"lat": lat, "lng": lng}}
    })
}

/// Reverse geocoding answer for downtown Chicago.
#[allow(dead_code)] // Used by other test files
pub fn chicago_geocode_body() -> String {
    json!({
        "status": "OK",
        "results": [
            geocode_result("locality", "Chicago", "Chicago", 41.8781, -87.6298),
            geocode_result("administrative_area_level_2", "Cook County", "Cook County", 41.7377, -87.6976),
            geocode_result("administrative_area_level_1", "Illinois", "IL", 40.6331, -89.3985),
            geocode_result("country", "United States", "US", 37.0902, -95.7129)
        ]
    })
    .to_string()
}

#[allow(dead_code)] // Used by other test files
pub fn zero_results_body() -> String {
    json!({"status": "ZERO_RESULTS", "results": []}).to_string()
}

/// Illinois report for `date` whose "Cook" record has `cook_confirmed` cases.
#[allow(dead_code)] // Used by other test files
pub fn illinois_reports_body(date: NaiveDate, cook_confirmed: i64) -> String {
    let date = date.format("%Y-%m-%d").to_string();
    let last_update = format!("{} 23:45:00", date);
    json!({
        "data": [{
            "date": date,
            "confirmed": 20852,
            "deaths": 720,
            "recovered": 0,
            "confirmed_diff": 1293,
            "deaths_diff": 43,
            "recovered_diff": 0,
            "last_update": last_update,
            "active": 20132,
            "active_diff": 1250,
            "fatality_rate": 0.0345,
            "region": {
                "iso": "USA",
                "name": "US",
                "province": "Illinois",
                "lat": "40.3495",
                "long": "-88.9861",
                "cities": [
                    {"name": "Cook", "date": date, "fips": 17031, "lat": "41.84147", "long": "-87.81670",
                     "confirmed": cook_confirmed, "deaths": 4, "confirmed_diff": 10, "deaths_diff": 1,
                     "last_update": last_update},
                    {"name": "DuPage", "date": date, "fips": 17043, "lat": "41.85192", "long": "-88.08563",
                     "confirmed": 40, "deaths": 1, "confirmed_diff": 2, "deaths_diff": 0,
                     "last_update": last_update},
                    {"name": "Unassigned", "date": date, "fips": null, "lat": "", "long": null,
                     "confirmed": 3, "deaths": 0, "confirmed_diff": 0, "deaths_diff": 0,
                     "last_update": last_update}
                ]
            }
        }]
    })
    .to_string()
}

#[allow(dead_code)] // Used by other test files
pub fn empty_reports_body() -> String {
    json!({"data": []}).to_string()
}

/// Resolver whose geocoder and report source both point at `base_url`.
#[allow(dead_code)] // Used by other test files
pub fn resolver_for(base_url: &str) -> Resolver {
    let config = Config {
        geocoding_api_key: "test-key".to_string(),
        geocoding_base_url: base_url.to_string(),
        reports_base_url: base_url.to_string(),
        ..Default::default()
    };
    let client = init_client(&config).expect("Failed to create client");
    Resolver::new(
        Arc::new(GoogleGeocoder::new(client.clone(), base_url, "test-key")),
        Arc::new(CovidApiSource::new(client, base_url)),
        &config,
    )
}
