//! In-memory doubles for the upstream traits.

use async_trait::async_trait;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    AirQualityApi, AirlyError, Coordinates, Credential, CurrentMeasurements, GeoResolver,
    InstallationCandidate, InstallationId, InstallationInfo, MeasurementValue,
};

pub fn key() -> Credential {
    Credential::new("TEST_KEY").expect("non-blank key")
}

pub fn values(pairs: &[(&str, f64)]) -> Vec<MeasurementValue> {
    pairs.iter().map(|(name, value)| MeasurementValue { name: (*name).into(), value: *value }).collect()
}

pub fn candidate(id: &str, street: &str) -> InstallationCandidate {
    InstallationCandidate {
        id: InstallationId::new(id).expect("valid id"),
        street: Some(street.into()),
        city: "Kraków".into(),
        country: "Poland".into(),
    }
}

/// Installation 204 in Krakow, with three non-particulate fields trailing.
pub fn krakow_204() -> FakeApi {
    FakeApi {
        values: values(&[
            ("PM1", 5.0),
            ("PM25", 8.0),
            ("PM10", 12.0),
            ("x", 1.0),
            ("y", 2.0),
            ("z", 3.0),
        ]),
        info: Some(InstallationInfo {
            id: InstallationId::new("204").expect("valid id"),
            street: None,
            city: "Krakow".into(),
            country: "Poland".into(),
        }),
        ..FakeApi::default()
    }
}

#[derive(Debug, Default)]
pub struct FakeApi {
    pub values: Vec<MeasurementValue>,
    pub info: Option<InstallationInfo>,
    pub nearby: Vec<InstallationCandidate>,
    /// Returned by both fetch calls instead of data.
    pub fail_with: Mutex<Option<AirlyError>>,
    pub fetches: AtomicUsize,
    pub nearest_queries: Mutex<Vec<(Coordinates, usize)>>,
}

impl FakeApi {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check(&self, id: &InstallationId, credential: &Credential) -> Result<(), AirlyError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.fail_with.lock().expect("lock").take() {
            return Err(err);
        }
        if credential.as_str() != "TEST_KEY" {
            return Err(AirlyError::Unauthorized);
        }
        match &self.info {
            Some(info) if info.id == *id => Ok(()),
            _ => Err(AirlyError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl AirQualityApi for FakeApi {
    async fn current_measurements(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<CurrentMeasurements, AirlyError> {
        self.check(id, credential)?;
        Ok(CurrentMeasurements { from: None, till: None, values: self.values.clone() })
    }

    async fn installation(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<InstallationInfo, AirlyError> {
        self.check(id, credential)?;
        Ok(self.info.clone().expect("checked above"))
    }

    async fn nearest_installations(
        &self,
        at: Coordinates,
        max_results: usize,
        _credential: &Credential,
    ) -> Result<Vec<InstallationCandidate>, AirlyError> {
        self.nearest_queries.lock().expect("lock").push((at, max_results));
        Ok(self.nearby.iter().take(max_results).cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct FakeGeocoder {
    pub known: Vec<(String, Coordinates)>,
}

impl FakeGeocoder {
    pub fn krakow() -> Self {
        Self { known: vec![("Krakow".into(), Coordinates { lat: 50.06, lng: 19.94 })] }
    }
}

#[async_trait]
impl GeoResolver for FakeGeocoder {
    async fn locate(&self, query: &str) -> Result<Option<Coordinates>, AirlyError> {
        Ok(self.known.iter().find(|(name, _)| name.eq_ignore_ascii_case(query)).map(|(_, at)| *at))
    }
}
