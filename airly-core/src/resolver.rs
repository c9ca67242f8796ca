use crate::{
    AirQualityApi, AirlyError, Credential, GeoResolver, InstallationCandidate, InstallationId,
    InstallationQuery,
};

/// How many nearby installations are offered when resolving by location.
pub(crate) const MAX_CANDIDATES: usize = 3;

/// Preferred default choice: the second candidate, clamped to the list.
pub fn default_selection_index(len: usize) -> usize {
    1.min(len.saturating_sub(1))
}

/// Outcome of [`InstallationResolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(InstallationId),
    /// The user has to pick one of several candidates before the pipeline can continue.
    Pending(SelectionRequest),
}

/// A suspended resolution waiting for the user's choice.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    candidates: Vec<InstallationCandidate>,
    default_index: usize,
}

impl SelectionRequest {
    /// `None` for an empty candidate list.
    pub fn new(candidates: Vec<InstallationCandidate>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        let default_index = default_selection_index(candidates.len());
        Some(Self { candidates, default_index })
    }

    pub fn candidates(&self) -> &[InstallationCandidate] {
        &self.candidates
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    pub fn labels(&self) -> Vec<String> {
        self.candidates.iter().map(InstallationCandidate::label).collect()
    }

    /// Resume with the user's choice; `None` means the prompt was cancelled.
    pub fn resume(self, choice: Option<usize>) -> Result<InstallationId, AirlyError> {
        let index = choice.ok_or(AirlyError::SelectionAborted)?;

        self.candidates
            .into_iter()
            .nth(index)
            .map(|candidate| candidate.id)
            .ok_or(AirlyError::SelectionAborted)
    }
}

/// Turns an [`InstallationQuery`] into exactly one installation id.
#[derive(Debug, Clone, Copy)]
pub struct InstallationResolver<'a> {
    api: &'a dyn AirQualityApi,
    geocoder: &'a dyn GeoResolver,
}

impl<'a> InstallationResolver<'a> {
    pub fn new(api: &'a dyn AirQualityApi, geocoder: &'a dyn GeoResolver) -> Self {
        Self { api, geocoder }
    }

    pub async fn resolve(
        &self,
        query: &InstallationQuery,
        credential: &Credential,
    ) -> Result<Resolution, AirlyError> {
        match query {
            InstallationQuery::ById(raw) => {
                let id = InstallationId::new(raw.as_str())?;
                tracing::info!(%id, "using installation");
                Ok(Resolution::Resolved(id))
            }
            InstallationQuery::ByCity(name) => {
                let at = self
                    .geocoder
                    .locate(name)
                    .await?
                    .ok_or_else(|| AirlyError::LocationNotFound(name.clone()))?;
                tracing::info!(city = %name, lat = at.lat, lng = at.lng, "located");

                let mut candidates =
                    self.api.nearest_installations(at, MAX_CANDIDATES, credential).await?;
                candidates.truncate(MAX_CANDIDATES);
                tracing::info!(count = candidates.len(), "nearby installations");

                SelectionRequest::new(candidates)
                    .map(Resolution::Pending)
                    .ok_or_else(|| AirlyError::NoInstallationsNearby(name.clone()))
            }
        }
    }
}
