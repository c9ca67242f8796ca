//! Core library for the `airly` CLI.
//!
//! This crate defines:
//! - Credential storage and configuration
//! - Abstraction over the Airly measurement API and a geocoder
//! - Installation resolution, measurement fetching and report shaping
//! - Plain-text report rendering
//!
//! It is used by `airly-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod shaper;

#[cfg(test)]
mod testing;

pub use config::{Config, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::AirlyError;
pub use fetcher::{MeasurementFetcher, Snapshot};
pub use model::{
    Coordinates, Credential, CurrentMeasurements, InstallationCandidate, InstallationId,
    InstallationInfo, InstallationQuery, MeasurementValue, ShapedMeasurement,
};
pub use pipeline::Pipeline;
pub use provider::{AirQualityApi, AirlyClient, GeoResolver, NominatimGeocoder};
pub use report::{ChartStyle, Report};
pub use resolver::{InstallationResolver, Resolution, SelectionRequest, default_selection_index};
pub use shaper::FilterPolicy;
