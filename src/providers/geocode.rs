//! Forward geocoding via the Nominatim/OpenStreetMap search API
//!
//! Maps a free-text place query to a list of coordinate candidates. The
//! screen controller only ever uses the first candidate; the rest are
//! carried so the webview could show them in the future.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeCandidate {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable place label as returned by the provider
    pub display_name: String,
}

/// Forward geocoding provider seam
///
/// The production implementation is [`NominatimGeocoder`]; tests inject a
/// fake that returns canned candidate lists.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a raw query string to zero or more coordinate candidates
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>>;
}

/// Configuration for the Nominatim client
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Search endpoint URL
    pub endpoint: String,
    /// User-Agent header, required by the Nominatim usage policy
    pub user_agent: String,
    /// Maximum number of candidates requested per query
    pub limit: u8,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: format!("busoclock/{}", env!("CARGO_PKG_VERSION")),
            limit: 5,
            timeout: Duration::from_secs(10),
        }
    }
}

/// One entry of a Nominatim `format=jsonv2` response
///
/// Nominatim serializes coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimPlace {
    /// Parse the string coordinates, discarding the entry if they are malformed
    fn into_candidate(self) -> Option<GeocodeCandidate> {
        let latitude = self.lat.parse::<f64>().ok()?;
        let longitude = self.lon.parse::<f64>().ok()?;
        Some(GeocodeCandidate {
            latitude,
            longitude,
            display_name: self.display_name,
        })
    }
}

/// Nominatim-backed [`Geocoder`]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    endpoint: String,
    limit: u8,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            limit: config.limit,
        })
    }

    fn parse_places(places: Vec<NominatimPlace>) -> Vec<GeocodeCandidate> {
        places
            .into_iter()
            .filter_map(|place| {
                let label = place.display_name.clone();
                let candidate = place.into_candidate();
                if candidate.is_none() {
                    log::warn!("skipping geocode candidate with malformed coordinates: {label}");
                }
                candidate
            })
            .collect()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>> {
        let places: Vec<NominatimPlace> = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", &self.limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Geocode(format!("nominatim returned an error status: {e}")))?
            .json()
            .await?;

        Ok(Self::parse_places(places))
    }
}
