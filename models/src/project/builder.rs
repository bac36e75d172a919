use crate::ModelError;
use crate::ProjectIdentifier;

use common::ErrorLocation;

use std::panic::Location;

/// Builder for creating validated ProjectIdentifier instances.
#[derive(Debug, Default)]
pub struct ProjectIdentifierBuilder {
    owner: Option<String>,
    repository: Option<String>,
    project: Option<String>,
}

impl ProjectIdentifierBuilder {
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Build the ProjectIdentifier with validation.
    ///
    /// Every component is required, non-empty, and free of `/` so it maps
    /// to exactly one path segment.
    #[track_caller]
    pub fn build(self) -> Result<ProjectIdentifier, ModelError> {
        let owner = required_segment(self.owner, "Owner")?;
        let repository = required_segment(self.repository, "Repository")?;
        let project = required_segment(self.project, "Project")?;

        Ok(ProjectIdentifier {
            owner,
            repository,
            project,
        })
    }
}

#[track_caller]
fn required_segment(value: Option<String>, field: &str) -> Result<String, ModelError> {
    let value = value.ok_or_else(|| ModelError::Validation {
        message: format!("{field} is required"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if value.trim().is_empty() {
        return Err(ModelError::Validation {
            message: format!("{field} cannot be empty"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if value.contains('/') {
        return Err(ModelError::Validation {
            message: format!("{field} cannot contain '/': {value}"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(value)
}
