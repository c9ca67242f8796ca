use crate::{AirQualityApi, AirlyError, Credential, CurrentMeasurements, InstallationId, InstallationInfo};

/// Everything fetched for one installation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub current: CurrentMeasurements,
    pub installation: InstallationInfo,
}

#[derive(Debug, Clone, Copy)]
pub struct MeasurementFetcher<'a> {
    api: &'a dyn AirQualityApi,
}

impl<'a> MeasurementFetcher<'a> {
    pub fn new(api: &'a dyn AirQualityApi) -> Self {
        Self { api }
    }

    /// Reads current measurements and installation metadata concurrently.
    ///
    /// Both reads must succeed; the first failure is returned.
    pub async fn fetch(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<Snapshot, AirlyError> {
        let (current, installation) = tokio::try_join!(
            self.api.current_measurements(id, credential),
            self.api.installation(id, credential),
        )?;

        tracing::debug!(%id, values = current.values.len(), "fetched snapshot");

        Ok(Snapshot { current, installation })
    }
}
