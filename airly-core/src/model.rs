use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::AirlyError;

/// The API key sent with every upstream request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input, which never counts as a configured key.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationQuery {
    ById(String),
    ByCity(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A resolved, non-empty installation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallationId(String);

impl InstallationId {
    pub fn new(raw: impl Into<String>) -> Result<Self, AirlyError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AirlyError::EmptyInstallationId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstallationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One installation offered to the user when resolving by location.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallationCandidate {
    pub id: InstallationId,
    pub street: Option<String>,
    pub city: String,
    pub country: String,
}

impl InstallationCandidate {
    /// Prompt label: the street address, or the city for installations without one.
    pub fn label(&self) -> String {
        match &self.street {
            Some(street) => format!("{street}, {}", self.city),
            None => format!("{}, {}", self.city, self.country),
        }
    }
}

/// Installation metadata used for the report caption.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallationInfo {
    pub id: InstallationId,
    pub street: Option<String>,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValue {
    pub name: String,
    pub value: f64,
}

/// The current snapshot of an installation: raw values plus the averaging window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentMeasurements {
    pub from: Option<DateTime<Utc>>,
    pub till: Option<DateTime<Utc>>,
    pub values: Vec<MeasurementValue>,
}

/// A measurement selected for charting; `key` is the bar label.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedMeasurement {
    pub key: String,
    pub name: String,
    pub value: f64,
}

impl From<&MeasurementValue> for ShapedMeasurement {
    fn from(raw: &MeasurementValue) -> Self {
        Self { key: raw.name.clone(), name: raw.name.clone(), value: raw.value }
    }
}
