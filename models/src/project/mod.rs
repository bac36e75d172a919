pub mod builder;

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// Addressing triple for a project hosted on the control plane.
///
/// Carries no behavior beyond turning itself into API path components.
/// Build through [`builder::ProjectIdentifierBuilder`] so every component is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectIdentifier {
    pub owner: String,
    pub repository: String,
    pub project: String,
}

impl ProjectIdentifier {
    /// `{owner}/{repository}/{project}`
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.owner, self.repository, self.project)
    }

    /// `{owner}/{repository}/{project}/{suffix}`, tolerating a leading `/` on `suffix`.
    pub fn join(&self, suffix: &str) -> String {
        let suffix = suffix.trim_start_matches('/');
        if suffix.is_empty() {
            return self.path();
        }
        format!("{}/{}", self.path(), suffix)
    }
}

impl Display for ProjectIdentifier {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.path())
    }
}
