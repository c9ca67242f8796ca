use crate::{
    AirQualityApi, AirlyError, Credential, FilterPolicy, GeoResolver, InstallationId,
    InstallationQuery, InstallationResolver, MeasurementFetcher, Report, Resolution,
};

/// Resolve → fetch → shape, shared by every query mode.
///
/// Resolution may suspend on a [`crate::SelectionRequest`]; the caller resumes it and
/// hands the resulting id to [`Pipeline::report`].
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    api: &'a dyn AirQualityApi,
    geocoder: &'a dyn GeoResolver,
    policy: FilterPolicy,
}

impl<'a> Pipeline<'a> {
    pub fn new(api: &'a dyn AirQualityApi, geocoder: &'a dyn GeoResolver, policy: FilterPolicy) -> Self {
        Self { api, geocoder, policy }
    }

    pub async fn resolve(
        &self,
        query: &InstallationQuery,
        credential: &Credential,
    ) -> Result<Resolution, AirlyError> {
        InstallationResolver::new(self.api, self.geocoder).resolve(query, credential).await
    }

    pub async fn report(
        &self,
        id: &InstallationId,
        credential: &Credential,
    ) -> Result<Report, AirlyError> {
        let snapshot = MeasurementFetcher::new(self.api).fetch(id, credential).await?;

        Ok(Report {
            measurements: self.policy.shape(&snapshot.current.values),
            installation: snapshot.installation,
            from: snapshot.current.from,
            till: snapshot.current.till,
        })
    }
}
