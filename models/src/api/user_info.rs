use serde::{Deserialize, Serialize};

/// Identity the control plane reports for an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
}
