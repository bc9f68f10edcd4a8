use std::sync::Arc;

use lingua_core::model::{ProfileId, Resource, ResourceDraft, ResourceId};
use storage::repository::ResourceRepository;

use crate::error::ResourceServiceError;

/// The learning-material library: a flat list of resources per profile.
#[derive(Clone)]
pub struct ResourceService {
    repo: Arc<dyn ResourceRepository>,
}

impl ResourceService {
    #[must_use]
    pub fn new(repo: Arc<dyn ResourceRepository>) -> Self {
        Self { repo }
    }

    /// All resources for a profile, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `ResourceServiceError` on storage failures.
    pub fn list(&self, profile: &ProfileId) -> Result<Vec<Resource>, ResourceServiceError> {
        Ok(self.repo.load_resources(profile)?)
    }

    /// Validate a draft and append it under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `ResourceServiceError` if the draft is invalid or the write
    /// fails; nothing is persisted on rejection.
    pub fn add(
        &self,
        profile: &ProfileId,
        draft: ResourceDraft,
    ) -> Result<Resource, ResourceServiceError> {
        let resource = draft.validate(ResourceId::generate())?;
        let mut resources = self.repo.load_resources(profile)?;
        resources.push(resource.clone());
        self.repo.save_resources(profile, &resources)?;
        Ok(resource)
    }

    /// Validate a draft and replace the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownResource` if the id is not in the library, a
    /// validation error for a bad draft, or a storage error.
    pub fn update(
        &self,
        profile: &ProfileId,
        id: ResourceId,
        draft: ResourceDraft,
    ) -> Result<Resource, ResourceServiceError> {
        let updated = draft.validate(id)?;
        let mut resources = self.repo.load_resources(profile)?;
        let entry = resources
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(ResourceServiceError::UnknownResource(id))?;
        *entry = updated.clone();
        self.repo.save_resources(profile, &resources)?;
        Ok(updated)
    }

    /// Remove a resource outright (user-confirmed deletion).
    ///
    /// # Errors
    ///
    /// Returns `UnknownResource` if the id is not in the library, or a
    /// storage error.
    pub fn remove(
        &self,
        profile: &ProfileId,
        id: ResourceId,
    ) -> Result<(), ResourceServiceError> {
        let mut resources = self.repo.load_resources(profile)?;
        let before = resources.len();
        resources.retain(|r| r.id() != id);
        if resources.len() == before {
            return Err(ResourceServiceError::UnknownResource(id));
        }
        self.repo.save_resources(profile, &resources)?;
        Ok(())
    }
}
