use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    AirlyError, Coordinates, Credential, CurrentMeasurements, InstallationCandidate, InstallationId,
    InstallationInfo, MeasurementValue,
};

use super::{AirQualityApi, truncate_body};

/// Client for the Airly v2 REST API.
#[derive(Debug, Clone)]
pub struct AirlyClient {
    base_url: String,
    http: Client,
}

impl AirlyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AirlyError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AirlyError::UpstreamUnavailable(format!("invalid API url '{}': {e}", self.base_url))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                AirlyError::UpstreamUnavailable(format!("invalid API url '{}'", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        credential: &Credential,
        what: &'static str,
        id: Option<&InstallationId>,
    ) -> Result<T, AirlyError> {
        tracing::debug!(%url, ?query, "requesting {what}");

        let res = self
            .http
            .get(url)
            .query(query)
            .header("apikey", credential.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AirlyError::UpstreamUnavailable(format!("request for {what} failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            AirlyError::UpstreamUnavailable(format!("failed to read {what} response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(classify_failure(status, id, &body));
        }

        serde_json::from_str(&body).map_err(|e| AirlyError::malformed(what, e))
    }
}

fn classify_failure(status: StatusCode, id: Option<&InstallationId>, body: &str) -> AirlyError {
    tracing::debug!(%status, body = %truncate_body(body), "upstream request failed");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AirlyError::Unauthorized,
        StatusCode::NOT_FOUND => {
            AirlyError::NotFound(id.map(|id| id.to_string()).unwrap_or_else(|| "?".into()))
        }
        _ => AirlyError::UpstreamUnavailable(format!(
            "request failed with status {}: {}",
            status,
            truncate_body(body)
        )),
    }
}

#[derive(Debug, Deserialize)]
struct AwMeasurementsResponse {
    current: Option<AwCurrent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AwCurrent {
    from_date_time: Option<DateTime<Utc>>,
    till_date_time: Option<DateTime<Utc>>,
    values: Vec<MeasurementValue>,
}

#[derive(Debug, Deserialize)]
struct AwAddress {
    street: Option<String>,
    city: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AwInstallation {
    id: serde_json::Value,
    address: Option<AwAddress>,
}

impl AwInstallation {
    fn into_parts(self) -> Result<(InstallationId, Option<String>, String, String), AirlyError> {
        let id = match self.id {
            serde_json::Value::Number(n) => InstallationId::new(n.to_string()),
            serde_json::Value::String(s) => InstallationId::new(s),
            other => return Err(AirlyError::malformed("installation", format!("id {other}"))),
        }
        .map_err(|e| AirlyError::malformed("installation", e))?;

        let address =
            self.address.ok_or_else(|| AirlyError::malformed("installation", "missing address"))?;
        let city = address
            .city
            .ok_or_else(|| AirlyError::malformed("installation", "missing address.city"))?;
        let country = address
            .country
            .ok_or_else(|| AirlyError::malformed("installation", "missing address.country"))?;
        let street = address.street.filter(|s| !s.trim().is_empty());

        Ok((id, street, city, country))
    }
}

impl TryFrom<AwInstallation> for InstallationInfo {
    type Error = AirlyError;

    fn try_from(raw: AwInstallation) -> Result<Self, Self::Error> {
        let (id, street, city, country) = raw.into_parts()?;
        Ok(InstallationInfo { id, street, city, country })
    }
}

impl TryFrom<AwInstallation> for InstallationCandidate {
    type Error = AirlyError;

    fn try_from(raw: AwInstallation) -> Result<Self, Self::Error> {
        let (id, street, city, country) = raw.into_parts()?;
        Ok(InstallationCandidate { id, street, city, country })
    }
}

fn measurements_from(raw: AwMeasurementsResponse) -> Result<CurrentMeasurements, AirlyError> {
    let current = raw.current.ok_or_else(|| AirlyError::malformed("measurements", "missing current"))?;

    Ok(CurrentMeasurements {
        from: current.from_date_time,
        till: current.till_date_time,
        values: current.values,
    })
}

#[async_trait]
impl AirQualityApi for AirlyClient {
    async fn current_measurements(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<CurrentMeasurements, AirlyError> {
        let url = self.endpoint(&["v2", "measurements", "installation"])?;
        let raw: AwMeasurementsResponse = self
            .get_json(url, &[("installationId", id.to_string())], credential, "measurements", Some(id))
            .await?;

        measurements_from(raw)
    }

    async fn installation(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<InstallationInfo, AirlyError> {
        let url = self.endpoint(&["v2", "installations", id.as_str()])?;
        let raw: AwInstallation = self.get_json(url, &[], credential, "installation", Some(id)).await?;

        raw.try_into()
    }

    async fn nearest_installations(
        &self,
        at: Coordinates,
        max_results: usize,
        credential: &Credential,
    ) -> Result<Vec<InstallationCandidate>, AirlyError> {
        let url = self.endpoint(&["v2", "installations", "nearest"])?;
        let query = [
            ("lat", at.lat.to_string()),
            ("lng", at.lng.to_string()),
            ("maxResults", max_results.to_string()),
            ("maxDistanceKM", "-1".to_string()),
        ];
        let raw: Vec<AwInstallation> =
            self.get_json(url, &query, credential, "nearest installations", None).await?;

        raw.into_iter().map(InstallationCandidate::try_from).collect()
    }
}
