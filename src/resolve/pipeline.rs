//! Resolution pipeline: geocode, fetch, match.
//!
//! [`Resolver`] owns the remote collaborators and the session state (seen
//! states and statistics). Each public operation is one resolution, bounded
//! by the configured timeout. Recoverable gaps (non-OK geocode status, no
//! report within the lookback, no name match) are logged and counted;
//! transport failures and timeouts are returned.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use futures::future::join_all;

use super::markers::{markers_for_entities, MapMarker};
use super::report::ReportSummary;
use crate::config::{Config, MAX_LOOKBACK_DAYS};
use crate::error_handling::{ErrorType, ResolutionStats, ResolveError, StoreError};
use crate::geocode::{extract_hierarchy, Geocoder, LocationHierarchy, LocationNode, VisibleRegion};
use crate::notifications::{topics_for_location, TopicSubscriptions};
use crate::reports::{
    lookback_boundary, match_report, MatchLevel, ReportDataset, ReportFetcher, ReportMatch,
    ReportSource,
};
use crate::storage::{HomeLocationStore, KeyValueStore, UserSettingsStore};
use crate::tracker::SeenRegionTracker;

/// Outcome of resolving the device's home location.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeResolution {
    /// The home location in effect, with its resolved name and coordinates.
    pub location: LocationHierarchy,
    pub level: MatchLevel,
    pub summary: ReportSummary,
    /// Home marker first, then every other placeable entity of the state.
    pub markers: Vec<MapMarker>,
    /// State-wide and local topic, when country and state are known.
    pub topics: Option<[String; 2]>,
    /// Whether the stored home location was written by this resolution.
    pub updated: bool,
}

impl HomeResolution {
    /// Subscribes to this location's topics if notifications are enabled.
    ///
    /// Topics of a previous home are unsubscribed. Returns whether a
    /// subscription pass ran.
    pub async fn subscribe(
        &self,
        subscriptions: &TopicSubscriptions,
        store: &dyn KeyValueStore,
    ) -> Result<bool, StoreError> {
        let settings = UserSettingsStore::new(store).load()?;
        if !settings.enable_notifications {
            log::debug!("Notifications disabled; not subscribing");
            return Ok(false);
        }

        match &self.topics {
            Some(topics) => {
                subscriptions.subscribe_to_topics(topics.as_slice(), true).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Outcome of resolving a newly seen state while panning the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResolution {
    pub location: LocationHierarchy,
    pub matched: ReportMatch,
    pub markers: Vec<MapMarker>,
}

fn capped_lookback(lookback_days: u32) -> u32 {
    if lookback_days > MAX_LOOKBACK_DAYS {
        log::warn!(
            "Lookback of {} days exceeds the maximum; using {}",
            lookback_days,
            MAX_LOOKBACK_DAYS
        );
        return MAX_LOOKBACK_DAYS;
    }
    lookback_days
}

pub struct Resolver {
    geocoder: Arc<dyn Geocoder>,
    reports: Arc<dyn ReportSource>,
    tracker: SeenRegionTracker,
    stats: ResolutionStats,
    lookback_days: u32,
    timeout: Duration,
}

impl Resolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, reports: Arc<dyn ReportSource>, config: &Config) -> Self {
        Self {
            geocoder,
            reports,
            tracker: SeenRegionTracker::new(),
            stats: ResolutionStats::new(),
            lookback_days: capped_lookback(config.lookback_days),
            timeout: Duration::from_secs(config.resolution_timeout_secs),
        }
    }

    /// Overrides the per-resolution timeout.
    pub fn with_resolution_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tracker(&self) -> &SeenRegionTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    /// Reverse geocodes a coordinate into a hierarchy.
    ///
    /// `Ok(None)` when the geocoder answers with a non-OK status.
    pub async fn resolve_hierarchy(
        &self,
        lat: f64,
        long: f64,
    ) -> Result<Option<LocationHierarchy>, ResolveError> {
        self.bounded(self.hierarchy_for(lat, long)).await
    }

    /// Resolves the home location and reconciles it with the stored one.
    ///
    /// With no stored home, the new one is saved. When the stored home has a
    /// different resolved name, `on_change(stored, new)` decides: `true`
    /// saves the new location, `false` keeps the stored one and reports for
    /// it instead. The state is marked seen on success.
    ///
    /// `Ok(None)` when no hierarchy or no report could be obtained.
    pub async fn resolve_home<F>(
        &self,
        lat: f64,
        long: f64,
        store: &dyn KeyValueStore,
        on_change: F,
    ) -> Result<Option<HomeResolution>, ResolveError>
    where
        F: FnOnce(&LocationHierarchy, &LocationHierarchy) -> bool + Send,
    {
        self.bounded(self.home_for(lat, long, store, on_change)).await
    }

    /// Resolves the state around a coordinate unless it was already seen.
    ///
    /// `Ok(None)` for an already seen state as well as for a coordinate
    /// without hierarchy or reports. The state is marked seen only after a
    /// successful resolution, so a failure here is retried on the next call.
    pub async fn resolve_region(
        &self,
        lat: f64,
        long: f64,
    ) -> Result<Option<RegionResolution>, ResolveError> {
        self.bounded(self.region_for(lat, long)).await
    }

    /// Resolves the four corners of the visible map area concurrently.
    ///
    /// Results are in corner order: far left, far right, near left, near right.
    pub async fn resolve_visible_region(
        &self,
        region: &VisibleRegion,
    ) -> Vec<Result<Option<RegionResolution>, ResolveError>> {
        let corners = region
            .corners()
            .into_iter()
            .map(|corner| self.resolve_region(corner.lat, corner.long));
        let results = join_all(corners).await;

        for result in &results {
            if let Err(e) = result {
                log::warn!("Failed to resolve visible region corner: {}", e);
            }
        }
        results
    }

    async fn bounded<T, F>(&self, resolution: F) -> Result<T, ResolveError>
    where
        F: Future<Output = Result<T, ResolveError>>,
    {
        let result = match tokio::time::timeout(self.timeout, resolution).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Timeout(self.timeout.as_secs())),
        };

        if let Err(e) = &result {
            self.stats.increment_error(ErrorType::from(e));
        }
        result
    }

    async fn hierarchy_for(
        &self,
        lat: f64,
        long: f64,
    ) -> Result<Option<LocationHierarchy>, ResolveError> {
        let response = self.geocoder.reverse_geocode(lat, long).await?;
        if !response.is_ok() {
            log::warn!(
                "Geocode status for ({}, {}) is {}; no location available",
                lat,
                long,
                response.status
            );
            self.stats.increment_error(ErrorType::GeocodeStatusNotOk);
            return Ok(None);
        }

        Ok(Some(extract_hierarchy(&response.results)))
    }

    /// Fetches the most recent dataset for the hierarchy's country and state.
    async fn dataset_for(
        &self,
        location: &LocationHierarchy,
    ) -> Result<Option<(ReportDataset, LocationNode)>, ResolveError> {
        let (Some(country), Some(state)) = (location.country_name(), location.state.as_ref()) else {
            log::warn!("Location has no country or state; reports skipped");
            self.stats.increment_error(ErrorType::GeocodeNoProvince);
            return Ok(None);
        };

        let today = Local::now().date_naive();
        let fetcher = ReportFetcher::new(
            self.reports.as_ref(),
            lookback_boundary(today, self.lookback_days),
        );

        match fetcher.fetch(today, country, &state.name).await? {
            Some(dataset) => Ok(Some((dataset, state.clone()))),
            None => {
                log::warn!(
                    "No reports for {} / {} since {}",
                    country,
                    state.name,
                    fetcher.boundary()
                );
                self.stats.increment_error(ErrorType::ReportUnavailable);
                Ok(None)
            }
        }
    }

    fn match_entity(&self, dataset: &ReportDataset, location: &LocationHierarchy) -> ReportMatch {
        let matched = match_report(dataset, location);
        if matched.is_aggregate() {
            self.stats.increment_error(ErrorType::NameNotMatched);
        }
        matched
    }

    /// Matches the dataset and records the entity as the resolved location.
    ///
    /// An entity without coordinates takes the state's.
    fn match_location(
        &self,
        dataset: &ReportDataset,
        location: &mut LocationHierarchy,
        state: &LocationNode,
    ) -> ReportMatch {
        let matched = self.match_entity(dataset, location);
        let lat = matched.entity.lat.unwrap_or(state.lat);
        let long = matched.entity.long.unwrap_or(state.long);
        location.resolve_to(&matched.entity.name, lat, long);
        matched
    }

    async fn home_for<F>(
        &self,
        lat: f64,
        long: f64,
        store: &dyn KeyValueStore,
        on_change: F,
    ) -> Result<Option<HomeResolution>, ResolveError>
    where
        F: FnOnce(&LocationHierarchy, &LocationHierarchy) -> bool,
    {
        let Some(mut location) = self.hierarchy_for(lat, long).await? else {
            return Ok(None);
        };
        let Some((mut dataset, mut state)) = self.dataset_for(&location).await? else {
            return Ok(None);
        };
        let mut matched = self.match_location(&dataset, &mut location, &state);

        let homes = HomeLocationStore::new(store);
        let mut updated = true;
        match homes.load()? {
            Some(stored) if stored.resolved_name != location.resolved_name => {
                if on_change(&stored, &location) {
                    log::info!(
                        "Home location changed from {} to {}",
                        stored.resolved_name,
                        location.resolved_name
                    );
                    homes.save(&location)?;
                } else {
                    log::info!("Keeping stored home location {}", stored.resolved_name);
                    updated = false;
                    location = stored;
                    let Some((stored_dataset, stored_state)) = self.dataset_for(&location).await?
                    else {
                        return Ok(None);
                    };
                    dataset = stored_dataset;
                    state = stored_state;
                    // The stored resolved name stays; only the report is refreshed
                    matched = self.match_entity(&dataset, &location);
                }
            }
            _ => homes.save(&location)?,
        }

        self.tracker.mark_seen(&state.name);
        self.stats.increment_resolved();

        let mut markers = vec![MapMarker::home(&location, &matched.entity)];
        markers.extend(markers_for_entities(
            &dataset.entities,
            &state,
            Some(location.resolved_name.as_str()),
        ));

        Ok(Some(HomeResolution {
            summary: ReportSummary::from(&matched.entity),
            level: matched.level,
            topics: topics_for_location(&location),
            location,
            markers,
            updated,
        }))
    }

    async fn region_for(
        &self,
        lat: f64,
        long: f64,
    ) -> Result<Option<RegionResolution>, ResolveError> {
        let Some(mut location) = self.hierarchy_for(lat, long).await? else {
            return Ok(None);
        };
        if let Some(state_name) = location.state_name() {
            if self.tracker.has_seen(state_name) {
                log::debug!("{} already resolved this session", state_name);
                return Ok(None);
            }
        }

        let Some((dataset, state)) = self.dataset_for(&location).await? else {
            return Ok(None);
        };
        let matched = self.match_location(&dataset, &mut location, &state);
        let markers = markers_for_entities(&dataset.entities, &state, None);

        self.tracker.mark_seen(&state.name);
        self.stats.increment_resolved();
        log::info!(
            "Resolved {} with {} marker(s)",
            state.name,
            markers.len()
        );

        Ok(Some(RegionResolution {
            location,
            matched,
            markers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{GeocodeError, NotificationError, ReportError};
    use crate::geocode::{AddressComponent, Coordinate, GeocodeResponse, GeocodeResult, Geometry, LatLng};
    use crate::notifications::NotificationSubscriber;
    use crate::reports::{AggregateReport, ReportEntity};
    use crate::storage::{MemoryStore, UserSettings};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn result(tag: &str, long_name: &str, short_name: &str, lat: f64, lng: f64) -> GeocodeResult {
        GeocodeResult {
            types: vec![tag.to_string(), "political".to_string()],
            address_components: vec![AddressComponent {
                long_name: long_name.to_string(),
                short_name: short_name.to_string(),
                types: vec![tag.to_string(), "political".to_string()],
            }],
            geometry: Geometry {
                location: LatLng { lat, lng },
            },
        }
    }

    fn illinois_response(county: &str) -> GeocodeResponse {
        GeocodeResponse {
            status: "OK".into(),
            results: vec![
                result("locality", "Chicago", "Chicago", 41.88, -87.63),
                result("administrative_area_level_2", county, county, 41.74, -87.86),
                result("administrative_area_level_1", "Illinois", "IL", 40.63, -89.40),
                result("country", "United States", "US", 37.09, -95.71),
            ],
        }
    }

    /// Answers every coordinate with the same response.
    struct FixedGeocoder {
        response: GeocodeResponse,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, _address: &str) -> Result<GeocodeResponse, GeocodeError> {
            Ok(self.response.clone())
        }

        async fn reverse_geocode(&self, _lat: f64, _long: f64) -> Result<GeocodeResponse, GeocodeError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.response.clone())
        }
    }

    /// Serves one dataset for every date and counts queries.
    struct FixedSource {
        dataset: Option<ReportDataset>,
        queries: AtomicUsize,
    }

    impl FixedSource {
        fn new(dataset: Option<ReportDataset>) -> Self {
            Self {
                dataset,
                queries: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReportSource for FixedSource {
        async fn fetch_reports(
            &self,
            _date: NaiveDate,
            _region: &str,
            _province: &str,
        ) -> Result<Option<ReportDataset>, ReportError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.dataset.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReportSource for FailingSource {
        async fn fetch_reports(
            &self,
            _date: NaiveDate,
            _region: &str,
            _province: &str,
        ) -> Result<Option<ReportDataset>, ReportError> {
            Err(ReportError::Malformed("lat \"x\"".into()))
        }
    }

    #[derive(Default)]
    struct RecordingSubscriber {
        topics: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSubscriber for RecordingSubscriber {
        async fn subscribe(&self, topic: &str) -> Result<(), NotificationError> {
            self.topics.lock().expect("lock").push(topic.to_string());
            Ok(())
        }

        async fn unsubscribe(&self, _topic: &str) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    fn entity(name: &str, confirmed: i64, coords: Option<(f64, f64)>) -> ReportEntity {
        let date = NaiveDate::from_ymd_opt(2020, 4, 12).expect("valid date");
        ReportEntity {
            name: name.to_string(),
            date,
            confirmed,
            deaths: 1,
            confirmed_diff: 2,
            deaths_diff: 0,
            last_update: date.and_hms_opt(23, 0, 0).expect("valid time"),
            lat: coords.map(|c| c.0),
            long: coords.map(|c| c.1),
        }
    }

    fn illinois_dataset() -> ReportDataset {
        let date = NaiveDate::from_ymd_opt(2020, 4, 12).expect("valid date");
        ReportDataset {
            aggregate: AggregateReport {
                iso: "USA".into(),
                region_name: "US".into(),
                province: "Illinois".into(),
                date,
                confirmed: 20852,
                deaths: 720,
                recovered: 0,
                confirmed_diff: 1293,
                deaths_diff: 43,
                recovered_diff: 0,
                active: 20132,
                fatality_rate: 0.0345,
                last_update: date.and_hms_opt(23, 0, 0).expect("valid time"),
                lat: Some(40.35),
                long: Some(-88.99),
            },
            entities: vec![
                entity("Cook", 100, Some((41.84, -87.82))),
                entity("DuPage", 40, Some((41.85, -88.09))),
                entity("Unassigned", 5, None),
            ],
        }
    }

    fn resolver(geocoder: FixedGeocoder, source: Arc<dyn ReportSource>) -> Resolver {
        Resolver::new(Arc::new(geocoder), source, &Config::default())
    }

    fn geocoder(response: GeocodeResponse) -> FixedGeocoder {
        FixedGeocoder {
            response,
            delay: None,
        }
    }

    #[tokio::test]
    async fn test_non_ok_status_yields_no_hierarchy() {
        let resolver = resolver(
            geocoder(GeocodeResponse {
                status: "ZERO_RESULTS".into(),
                results: vec![],
            }),
            Arc::new(FixedSource::new(None)),
        );

        assert!(resolver.resolve_hierarchy(0.0, 0.0).await.expect("resolve").is_none());
        assert_eq!(resolver.stats().get_error_count(ErrorType::GeocodeStatusNotOk), 1);
    }

    #[tokio::test]
    async fn test_ok_status_without_results_skips_reports() {
        let source = Arc::new(FixedSource::new(Some(illinois_dataset())));
        let resolver = resolver(
            geocoder(GeocodeResponse {
                status: "OK".into(),
                results: vec![],
            }),
            source.clone(),
        );

        let hierarchy = resolver
            .resolve_hierarchy(0.0, 0.0)
            .await
            .expect("resolve")
            .expect("OK status yields a hierarchy");
        assert!(hierarchy.is_empty());

        assert!(resolver.resolve_region(0.0, 0.0).await.expect("resolve").is_none());
        assert_eq!(source.queries.load(Ordering::SeqCst), 0);
        assert_eq!(resolver.stats().get_error_count(ErrorType::GeocodeNoProvince), 1);
        assert_eq!(resolver.stats().get_error_count(ErrorType::GeocodeStatusNotOk), 0);
        assert!(resolver.tracker().is_empty());
    }

    #[test]
    fn test_lookback_is_capped() {
        let config = Config {
            lookback_days: MAX_LOOKBACK_DAYS + 10,
            ..Default::default()
        };
        let resolver = Resolver::new(
            Arc::new(geocoder(illinois_response("Cook County"))),
            Arc::new(FixedSource::new(None)),
            &config,
        );
        assert_eq!(resolver.lookback_days, MAX_LOOKBACK_DAYS);

        let resolver = Resolver::new(
            Arc::new(geocoder(illinois_response("Cook County"))),
            Arc::new(FixedSource::new(None)),
            &Config::default(),
        );
        assert_eq!(resolver.lookback_days, 1);
    }

    #[tokio::test]
    async fn test_resolve_home_saves_first_location() {
        let store = MemoryStore::new();
        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
        );

        let home = resolver
            .resolve_home(41.88, -87.63, &store, |_, _| panic!("no stored home"))
            .await
            .expect("resolve")
            .expect("home");

        assert!(home.updated);
        assert_eq!(home.level, MatchLevel::County);
        assert_eq!(home.location.resolved_name, "Cook");
        assert_eq!(home.summary.confirmed, 100);
        assert_eq!(
            home.topics,
            Some([
                "US_Illinois".to_string(),
                "US_Illinois_Cook".to_string()
            ])
        );

        let titles: Vec<&str> = home.markers.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Cook", "DuPage", "Unassigned"]);
        assert!(home.markers[0].show_info);

        let stored = HomeLocationStore::new(&store).load().expect("load").expect("stored");
        assert_eq!(stored.resolved_name, "Cook");
        assert!(resolver.tracker().has_seen("Illinois"));
    }

    #[tokio::test]
    async fn test_resolve_home_keeps_stored_location_when_declined() {
        let store = MemoryStore::new();
        let mut stored = extract_hierarchy(&illinois_response("DuPage County").results);
        stored.resolve_to("DuPage", 41.85, -88.09);
        HomeLocationStore::new(&store).save(&stored).expect("save");

        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
        );

        let mut asked = false;
        let home = resolver
            .resolve_home(41.88, -87.63, &store, |old, new| {
                asked = true;
                assert_eq!(old.resolved_name, "DuPage");
                assert_eq!(new.resolved_name, "Cook");
                false
            })
            .await
            .expect("resolve")
            .expect("home");

        assert!(asked);
        assert!(!home.updated);
        assert_eq!(home.location.resolved_name, "DuPage");
        assert_eq!(home.summary.confirmed, 40);
        let saved = HomeLocationStore::new(&store).load().expect("load").expect("stored");
        assert_eq!(saved.resolved_name, "DuPage");
    }

    #[tokio::test]
    async fn test_declined_home_keeps_stored_name_when_its_record_is_missing() {
        let store = MemoryStore::new();
        let mut stored = extract_hierarchy(&illinois_response("DuPage County").results);
        stored.resolve_to("DuPage", 41.85, -88.09);
        HomeLocationStore::new(&store).save(&stored).expect("save");

        let mut dataset = illinois_dataset();
        dataset.entities.retain(|entity| entity.name != "DuPage");
        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(Some(dataset))),
        );

        let home = resolver
            .resolve_home(41.88, -87.63, &store, |_, _| false)
            .await
            .expect("resolve")
            .expect("home");

        assert!(!home.updated);
        assert_eq!(home.location, stored);
        assert_eq!(
            home.topics,
            Some([
                "US_Illinois".to_string(),
                "US_Illinois_DuPage".to_string()
            ])
        );
        // Report falls back to the province totals
        assert_eq!(home.level, MatchLevel::Aggregate);
        assert_eq!(home.summary.confirmed, 20852);
        assert_eq!(home.markers[0].title, "DuPage");
        assert_eq!((home.markers[0].lat, home.markers[0].long), (41.85, -88.09));

        let saved = HomeLocationStore::new(&store).load().expect("load").expect("stored");
        assert_eq!(saved, stored);
    }

    #[tokio::test]
    async fn test_resolve_home_accepts_new_location() {
        let store = MemoryStore::new();
        let mut stored = extract_hierarchy(&illinois_response("DuPage County").results);
        stored.resolve_to("DuPage", 41.85, -88.09);
        HomeLocationStore::new(&store).save(&stored).expect("save");

        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
        );

        let home = resolver
            .resolve_home(41.88, -87.63, &store, |_, _| true)
            .await
            .expect("resolve")
            .expect("home");

        assert!(home.updated);
        let saved = HomeLocationStore::new(&store).load().expect("load").expect("stored");
        assert_eq!(saved.resolved_name, "Cook");
    }

    #[tokio::test]
    async fn test_unmatched_county_falls_back_to_province() {
        let store = MemoryStore::new();
        let mut response = illinois_response("Lake County");
        // No city level either
        response.results.remove(0);
        let resolver = resolver(
            geocoder(response),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
        );

        let home = resolver
            .resolve_home(42.3, -87.9, &store, |_, _| true)
            .await
            .expect("resolve")
            .expect("home");

        assert_eq!(home.level, MatchLevel::Aggregate);
        assert_eq!(home.location.resolved_name, "Illinois");
        assert_eq!(home.summary.confirmed, 20852);
        assert_eq!(resolver.stats().get_error_count(ErrorType::NameNotMatched), 1);
    }

    #[tokio::test]
    async fn test_resolve_region_runs_once_per_state() {
        let source = Arc::new(FixedSource::new(Some(illinois_dataset())));
        let resolver = resolver(geocoder(illinois_response("Cook County")), source.clone());

        let first = resolver
            .resolve_region(41.88, -87.63)
            .await
            .expect("resolve")
            .expect("new state");
        assert_eq!(first.matched.entity.name, "Cook");
        assert_eq!(first.markers.len(), 3);

        assert!(resolver.resolve_region(41.9, -87.7).await.expect("resolve").is_none());
        assert_eq!(source.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_region_is_not_marked_seen() {
        let resolver = resolver(geocoder(illinois_response("Cook County")), Arc::new(FailingSource));

        let err = resolver
            .resolve_region(41.88, -87.63)
            .await
            .expect_err("report failure");
        assert!(matches!(err, ResolveError::Report(ReportError::Malformed(_))));
        assert!(!resolver.tracker().has_seen("Illinois"));
        assert_eq!(resolver.stats().get_error_count(ErrorType::ReportMalformed), 1);
    }

    #[tokio::test]
    async fn test_missing_reports_yield_none() {
        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(None)),
        );

        assert!(resolver.resolve_region(41.88, -87.63).await.expect("resolve").is_none());
        assert!(!resolver.tracker().has_seen("Illinois"));
        assert_eq!(resolver.stats().get_error_count(ErrorType::ReportUnavailable), 1);
    }

    #[tokio::test]
    async fn test_visible_region_corners_share_tracker() {
        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
        );
        let corner = Coordinate::new(41.88, -87.63);
        let region = VisibleRegion {
            far_left: corner,
            far_right: corner,
            near_left: corner,
            near_right: corner,
        };

        let results = resolver.resolve_visible_region(&region).await;
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.is_ok()));
        // Concurrent corners may race on the same unseen state
        assert!(results.iter().filter(|r| matches!(r, Ok(Some(_)))).count() >= 1);
        assert_eq!(resolver.tracker().len(), 1);
    }

    #[tokio::test]
    async fn test_resolution_timeout() {
        let resolver = Resolver::new(
            Arc::new(FixedGeocoder {
                response: illinois_response("Cook County"),
                delay: Some(Duration::from_secs(5)),
            }),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
            &Config::default(),
        )
        .with_resolution_timeout(Duration::from_millis(20));

        let err = resolver
            .resolve_hierarchy(41.88, -87.63)
            .await
            .expect_err("should time out");
        assert!(matches!(err, ResolveError::Timeout(_)));
        assert_eq!(resolver.stats().get_error_count(ErrorType::ResolutionTimeout), 1);
    }

    #[tokio::test]
    async fn test_subscribe_respects_settings() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let subscriber = Arc::new(RecordingSubscriber::default());
        let subscriptions = TopicSubscriptions::new(subscriber.clone(), store.clone());
        let resolver = resolver(
            geocoder(illinois_response("Cook County")),
            Arc::new(FixedSource::new(Some(illinois_dataset()))),
        );

        let home = resolver
            .resolve_home(41.88, -87.63, store.as_ref(), |_, _| true)
            .await
            .expect("resolve")
            .expect("home");

        UserSettingsStore::new(store.as_ref())
            .save(&UserSettings {
                enable_notifications: false,
            })
            .expect("save");
        assert!(!home.subscribe(&subscriptions, store.as_ref()).await.expect("subscribe"));
        assert!(subscriber.topics.lock().expect("lock").is_empty());

        UserSettingsStore::new(store.as_ref())
            .save(&UserSettings::default())
            .expect("save");
        assert!(home.subscribe(&subscriptions, store.as_ref()).await.expect("subscribe"));
        assert_eq!(
            *subscriber.topics.lock().expect("lock"),
            vec!["US_Illinois", "US_Illinois_Cook"]
        );
    }
}
