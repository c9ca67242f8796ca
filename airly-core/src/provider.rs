use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    AirlyError, Coordinates, Credential, CurrentMeasurements, InstallationCandidate, InstallationId,
    InstallationInfo,
};

pub mod airly;
pub mod nominatim;

pub use airly::AirlyClient;
pub use nominatim::NominatimGeocoder;

/// Read-only view of the upstream measurement service.
#[async_trait]
pub trait AirQualityApi: Send + Sync + Debug {
    async fn current_measurements(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<CurrentMeasurements, AirlyError>;

    async fn installation(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<InstallationInfo, AirlyError>;

    /// Up to `max_results` installations nearest to `at`, closest first.
    async fn nearest_installations(
        &self,
        at: Coordinates,
        max_results: usize,
        credential: &Credential,
    ) -> Result<Vec<InstallationCandidate>, AirlyError>;
}

/// Free-text location → coordinates.
#[async_trait]
pub trait GeoResolver: Send + Sync + Debug {
    /// `Ok(None)` when the location is unknown.
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>, AirlyError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
