use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{AirlyError, Coordinates};

use super::{GeoResolver, truncate_body};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

// Nominatim's usage policy rejects requests without an identifying User-Agent.
const USER_AGENT: &str = concat!("airly-cli/", env!("CARGO_PKG_VERSION"));

/// Geocoder backed by an OpenStreetMap Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(DEFAULT_GEOCODER_URL)
    }
}

// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
}

fn first_coordinates(places: &[NmPlace]) -> Result<Option<Coordinates>, AirlyError> {
    let Some(place) = places.first() else {
        return Ok(None);
    };

    let lat = place.lat.parse::<f64>().map_err(|e| AirlyError::malformed("geocoder", e))?;
    let lng = place.lon.parse::<f64>().map_err(|e| AirlyError::malformed("geocoder", e))?;

    Ok(Some(Coordinates { lat, lng }))
}

#[async_trait]
impl GeoResolver for NominatimGeocoder {
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>, AirlyError> {
        tracing::debug!(url = %self.url, query, "geocoding");

        let res = self
            .http
            .get(&self.url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| AirlyError::UpstreamUnavailable(format!("geocoding request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            AirlyError::UpstreamUnavailable(format!("failed to read geocoder response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(AirlyError::UpstreamUnavailable(format!(
                "geocoding failed with status {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        let places: Vec<NmPlace> =
            serde_json::from_str(&body).map_err(|e| AirlyError::malformed("geocoder", e))?;

        first_coordinates(&places)
    }
}
