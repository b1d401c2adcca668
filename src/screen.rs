//! The location screen controller
//!
//! Holds all transient UI state for the single screen, invokes the location
//! and geocoding providers, derives map markers, and issues recenter
//! commands through the [`MapHandle`] seam. This is the only in-scope logic
//! of the application; everything else is bridging.
//!
//! The controller moves through a small, terminal state machine:
//! `Uninitialized -> PermissionDenied` or
//! `Uninitialized -> PositionPending -> PositionReady`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{
    Coordinate, Marker, MarkerColor, Region, INITIAL_SPAN, RECENTER_DURATION_MS, RECENTER_SPAN,
};
use crate::providers::{DevicePosition, Geocoder, LocationProvider, MapHandle, PermissionGrant};

/// Lifecycle phase of the screen, terminal once denied or ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenPhase {
    Uninitialized,
    PermissionDenied,
    PositionPending,
    PositionReady,
}

/// Renderable view of the screen, sent to the webview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSnapshot {
    pub phase: ScreenPhase,
    /// The map is only mounted once the current position is known
    pub map_visible: bool,
    /// Initial viewport around the current position, if known
    pub initial_region: Option<Region>,
    pub markers: Vec<Marker>,
    pub error_message: Option<String>,
}

/// Mediates between user input, the two data providers, and the map widget
pub struct ScreenController {
    location: Arc<dyn LocationProvider>,
    geocoder: Arc<dyn Geocoder>,
    map: Arc<dyn MapHandle>,
    phase: ScreenPhase,
    position: Option<DevicePosition>,
    searched: Option<Coordinate>,
    error_msg: Option<String>,
}

impl ScreenController {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        geocoder: Arc<dyn Geocoder>,
        map: Arc<dyn MapHandle>,
    ) -> Self {
        Self {
            location,
            geocoder,
            map,
            phase: ScreenPhase::Uninitialized,
            position: None,
            searched: None,
            error_msg: None,
        }
    }

    /// Runs once when the screen mounts: permission request, then a one-shot
    /// position read.
    ///
    /// Denial is the only user-visible failure; it pins the fixed error
    /// message and leaves the map unmounted. A failed position read is
    /// returned to the caller (the spawned init task logs it).
    pub async fn initialize(&mut self) -> Result<()> {
        if self.location.request_permission().await? == PermissionGrant::Denied {
            self.error_msg = Some(Error::PermissionDenied.to_string());
            self.phase = ScreenPhase::PermissionDenied;
            return Ok(());
        }

        self.phase = ScreenPhase::PositionPending;
        let position = self.location.current_position().await?;
        log::info!(
            "device position acquired at {:.4}, {:.4}",
            position.latitude,
            position.longitude
        );
        self.position = Some(position);
        self.phase = ScreenPhase::PositionReady;
        Ok(())
    }

    /// Handles an explicit search submission with the raw query string.
    ///
    /// Geocoding failures and empty candidate lists are swallowed after
    /// logging; neither produces user-visible feedback.
    pub async fn submit_search(&mut self, query: &str) -> Result<()> {
        if query.is_empty() {
            return Ok(());
        }

        let candidates = match self.geocoder.geocode(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                log::error!("error searching location: {e}");
                return Ok(());
            }
        };

        let Some(first) = candidates.first() else {
            log::debug!("geocode returned no candidates");
            return Ok(());
        };

        let target = Coordinate::new(first.latitude, first.longitude);
        self.searched = Some(target);
        self.map
            .animate_to(Region::around(target, RECENTER_SPAN), RECENTER_DURATION_MS)
    }

    /// Recenters on the stored current position, discarding any search result.
    ///
    /// No-op while the current position is unknown.
    pub fn go_to_my_location(&mut self) -> Result<()> {
        let Some(position) = self.position else {
            return Ok(());
        };

        self.searched = None;
        self.map.animate_to(
            Region::around(position.coordinate(), RECENTER_SPAN),
            RECENTER_DURATION_MS,
        )
    }

    /// Markers currently visible on the map
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::with_capacity(2);

        if let Some(position) = self.position {
            markers.push(Marker {
                coordinate: position.coordinate(),
                title: "Your Location".to_string(),
                description: "You are here".to_string(),
                color: MarkerColor::Blue,
            });
        }

        if let Some(searched) = self.searched {
            markers.push(Marker {
                coordinate: searched,
                title: "Searched Location".to_string(),
                description: "Your searched location".to_string(),
                color: MarkerColor::Red,
            });
        }

        markers
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            phase: self.phase,
            map_visible: self.position.is_some(),
            initial_region: self
                .position
                .map(|p| Region::around(p.coordinate(), INITIAL_SPAN)),
            markers: self.markers(),
            error_message: self.error_msg.clone(),
        }
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn current_position(&self) -> Option<DevicePosition> {
        self.position
    }

    pub fn searched_location(&self) -> Option<Coordinate> {
        self.searched
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_msg.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::GeocodeCandidate;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeLocation {
        grant: PermissionGrant,
        position: Option<DevicePosition>,
        fail_fetch: bool,
    }

    impl FakeLocation {
        fn denied() -> Self {
            Self {
                grant: PermissionGrant::Denied,
                position: None,
                fail_fetch: false,
            }
        }

        fn granted_at(latitude: f64, longitude: f64) -> Self {
            Self {
                grant: PermissionGrant::Granted,
                position: Some(DevicePosition {
                    latitude,
                    longitude,
                    accuracy: 5.0,
                    timestamp_ms: 1_700_000_000_000,
                }),
                fail_fetch: false,
            }
        }
    }

    #[async_trait]
    impl LocationProvider for FakeLocation {
        async fn request_permission(&self) -> Result<PermissionGrant> {
            Ok(self.grant)
        }

        async fn current_position(&self) -> Result<DevicePosition> {
            if self.fail_fetch {
                return Err(Error::PositionFetch("gps unavailable".to_string()));
            }
            self.position
                .ok_or_else(|| Error::PositionFetch("no fix".to_string()))
        }
    }

    struct FakeGeocoder {
        candidates: Result<Vec<GeocodeCandidate>>,
        calls: AtomicUsize,
    }

    impl FakeGeocoder {
        fn returning(candidates: Vec<(f64, f64)>) -> Self {
            Self {
                candidates: Ok(candidates
                    .into_iter()
                    .map(|(latitude, longitude)| GeocodeCandidate {
                        latitude,
                        longitude,
                        display_name: String::new(),
                    })
                    .collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                candidates: Err(Error::Geocode("service unreachable".to_string())),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, _query: &str) -> Result<Vec<GeocodeCandidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.candidates {
                Ok(candidates) => Ok(candidates.clone()),
                Err(_) => Err(Error::Geocode("service unreachable".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingMap {
        calls: Mutex<Vec<(Region, u64)>>,
    }

    impl RecordingMap {
        fn calls(&self) -> Vec<(Region, u64)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MapHandle for RecordingMap {
        fn animate_to(&self, region: Region, duration_ms: u64) -> Result<()> {
            self.calls.lock().unwrap().push((region, duration_ms));
            Ok(())
        }
    }

    fn controller(
        location: FakeLocation,
        geocoder: Arc<FakeGeocoder>,
        map: Arc<RecordingMap>,
    ) -> ScreenController {
        ScreenController::new(Arc::new(location), geocoder, map)
    }

    async fn ready_controller(
        geocoder: Arc<FakeGeocoder>,
        map: Arc<RecordingMap>,
    ) -> ScreenController {
        let mut screen = controller(FakeLocation::granted_at(37.0, -122.0), geocoder, map);
        screen.initialize().await.unwrap();
        screen
    }

    #[tokio::test]
    async fn denied_permission_sets_fixed_error_and_never_mounts_map() {
        let map = Arc::new(RecordingMap::default());
        let mut screen = controller(
            FakeLocation::denied(),
            Arc::new(FakeGeocoder::returning(vec![])),
            map.clone(),
        );

        screen.initialize().await.unwrap();

        assert_eq!(screen.phase(), ScreenPhase::PermissionDenied);
        assert_eq!(
            screen.error_message(),
            Some("Permission to access location was denied")
        );
        assert!(screen.current_position().is_none());

        let snapshot = screen.snapshot();
        assert!(!snapshot.map_visible);
        assert!(snapshot.initial_region.is_none());
        assert!(snapshot.markers.is_empty());
    }

    #[tokio::test]
    async fn granted_permission_stores_exact_position_and_blue_marker() {
        let map = Arc::new(RecordingMap::default());
        let screen =
            ready_controller(Arc::new(FakeGeocoder::returning(vec![])), map.clone()).await;

        assert_eq!(screen.phase(), ScreenPhase::PositionReady);
        let position = screen.current_position().unwrap();
        assert_eq!(position.latitude, 37.0);
        assert_eq!(position.longitude, -122.0);

        let snapshot = screen.snapshot();
        assert!(snapshot.map_visible);
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.markers[0].color, MarkerColor::Blue);
        assert_eq!(snapshot.markers[0].coordinate, Coordinate::new(37.0, -122.0));
        assert_eq!(snapshot.markers[0].title, "Your Location");

        let initial = snapshot.initial_region.unwrap();
        assert_eq!(initial.latitude_delta, 0.09);
        assert_eq!(initial.longitude_delta, 0.04);
    }

    #[tokio::test]
    async fn position_fetch_failure_surfaces_as_error() {
        let mut location = FakeLocation::granted_at(0.0, 0.0);
        location.fail_fetch = true;
        let mut screen = controller(
            location,
            Arc::new(FakeGeocoder::returning(vec![])),
            Arc::new(RecordingMap::default()),
        );

        let err = screen.initialize().await.unwrap_err();
        assert!(matches!(err, Error::PositionFetch(_)));
        assert_eq!(screen.phase(), ScreenPhase::PositionPending);
        assert!(!screen.snapshot().map_visible);
    }

    #[tokio::test]
    async fn empty_query_makes_no_provider_call() {
        let geocoder = Arc::new(FakeGeocoder::returning(vec![(48.8566, 2.3522)]));
        let map = Arc::new(RecordingMap::default());
        let mut screen = ready_controller(geocoder.clone(), map.clone()).await;

        screen.submit_search("").await.unwrap();

        assert_eq!(geocoder.call_count(), 0);
        assert!(screen.searched_location().is_none());
        assert!(map.calls().is_empty());
    }

    #[tokio::test]
    async fn search_stores_first_candidate_and_recenters() {
        let geocoder = Arc::new(FakeGeocoder::returning(vec![
            (48.8566, 2.3522),
            (48.87, 2.36),
        ]));
        let map = Arc::new(RecordingMap::default());
        let mut screen = ready_controller(geocoder.clone(), map.clone()).await;

        screen.submit_search("Paris").await.unwrap();

        assert_eq!(geocoder.call_count(), 1);
        assert_eq!(
            screen.searched_location(),
            Some(Coordinate::new(48.8566, 2.3522))
        );

        let calls = map.calls();
        assert_eq!(calls.len(), 1);
        let (region, duration_ms) = calls[0];
        assert_eq!(region.center(), Coordinate::new(48.8566, 2.3522));
        assert_eq!(region.latitude_delta, 0.09);
        assert_eq!(region.longitude_delta, 0.05);
        assert_eq!(duration_ms, 1000);

        // Red marker joins the blue one
        let markers = screen.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].color, MarkerColor::Red);
        assert_eq!(markers[1].title, "Searched Location");
    }

    #[tokio::test]
    async fn empty_geocode_result_changes_nothing() {
        let geocoder = Arc::new(FakeGeocoder::returning(vec![]));
        let map = Arc::new(RecordingMap::default());
        let mut screen = ready_controller(geocoder.clone(), map.clone()).await;

        screen.submit_search("nowhere at all").await.unwrap();

        assert_eq!(geocoder.call_count(), 1);
        assert!(screen.searched_location().is_none());
        assert!(map.calls().is_empty());
    }

    #[tokio::test]
    async fn geocode_failure_is_swallowed() {
        let geocoder = Arc::new(FakeGeocoder::failing());
        let map = Arc::new(RecordingMap::default());
        let mut screen = ready_controller(geocoder.clone(), map.clone()).await;

        screen.submit_search("Paris").await.unwrap();

        assert_eq!(geocoder.call_count(), 1);
        assert!(screen.searched_location().is_none());
        assert!(map.calls().is_empty());
    }

    #[tokio::test]
    async fn new_search_replaces_previous_result() {
        let geocoder = Arc::new(FakeGeocoder::returning(vec![(51.5074, -0.1278)]));
        let map = Arc::new(RecordingMap::default());
        let mut screen = ready_controller(geocoder.clone(), map.clone()).await;
        screen.submit_search("Paris").await.unwrap();

        screen.submit_search("London").await.unwrap();

        assert_eq!(
            screen.searched_location(),
            Some(Coordinate::new(51.5074, -0.1278))
        );
        assert_eq!(map.calls().len(), 2);
    }

    #[tokio::test]
    async fn go_to_my_location_clears_search_and_recenters() {
        let geocoder = Arc::new(FakeGeocoder::returning(vec![(48.8566, 2.3522)]));
        let map = Arc::new(RecordingMap::default());
        let mut screen = ready_controller(geocoder.clone(), map.clone()).await;
        screen.submit_search("Paris").await.unwrap();
        assert_eq!(screen.markers().len(), 2);

        screen.go_to_my_location().unwrap();

        assert!(screen.searched_location().is_none());
        assert_eq!(screen.markers().len(), 1);
        assert_eq!(screen.markers()[0].color, MarkerColor::Blue);

        let calls = map.calls();
        assert_eq!(calls.len(), 2);
        let (region, duration_ms) = calls[1];
        assert_eq!(region.center(), Coordinate::new(37.0, -122.0));
        assert_eq!(region.latitude_delta, 0.09);
        assert_eq!(region.longitude_delta, 0.05);
        assert_eq!(duration_ms, 1000);
    }

    #[tokio::test]
    async fn go_to_my_location_without_position_is_noop() {
        let map = Arc::new(RecordingMap::default());
        let mut screen = controller(
            FakeLocation::denied(),
            Arc::new(FakeGeocoder::returning(vec![])),
            map.clone(),
        );
        screen.initialize().await.unwrap();

        screen.go_to_my_location().unwrap();

        assert!(map.calls().is_empty());
    }
}
