use super::CredentialStore;
use crate::endpoint::Endpoint;
use crate::error::CredentialStoreError;

use common::{ErrorLocation, RedactedToken};

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use zeroize::Zeroize;

const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// On-disk shape: `{"access_tokens": {"<endpoint>": "<token>"}}`.
#[derive(Default, Serialize, Deserialize)]
pub(crate) struct CredentialsFile {
    #[serde(default)]
    pub(crate) access_tokens: BTreeMap<String, String>,
}

// Endpoints only; token values never reach Debug output.
impl fmt::Debug for CredentialsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsFile")
            .field("endpoints", &self.access_tokens.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for CredentialsFile {
    fn drop(&mut self) {
        for token in self.access_tokens.values_mut() {
            token.zeroize();
        }
    }
}

/// JSON-file credential store under the nimbus home directory.
///
/// Writers in one process are serialized, and clones share the same lock.
/// Each write goes through its own temp file, so writers in separate
/// processes never trip over each other's rename.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileCredentialStore {
    /// Store at `{home_dir}/credentials.json`.
    pub fn new(home_dir: &Path) -> Self {
        Self {
            path: home_dir.join(CREDENTIALS_FILE_NAME),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<CredentialsFile, CredentialStoreError> {
        if !self.path.exists() {
            debug!("No credentials file at {}", self.path.display());
            return Ok(CredentialsFile::default());
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| CredentialStoreError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            })?;

        serde_json::from_str(&contents).map_err(|e| CredentialStoreError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Held across load + save so concurrent writers see each other's updates.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomic write: unique temp file in the same directory, then rename.
    fn save(&self, file: &CredentialsFile) -> Result<(), CredentialStoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| CredentialStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut json =
            serde_json::to_string_pretty(file).map_err(|e| CredentialStoreError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        let write_result = NamedTempFile::new_in(dir).and_then(|mut temp| {
            temp.write_all(json.as_bytes())?;
            Ok(temp)
        });
        json.zeroize();
        let temp = write_result.map_err(|e| CredentialStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: dir.to_path_buf(),
            source: e,
        })?;

        restrict_permissions(temp.as_file(), temp.path())?;

        temp.persist(&self.path)
            .map_err(|e| CredentialStoreError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e.error,
            })?;

        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File, path: &Path) -> Result<(), CredentialStoreError> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(0o600))
        .map_err(|e| CredentialStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File, _path: &Path) -> Result<(), CredentialStoreError> {
    Ok(())
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, endpoint: &Endpoint) -> Result<Option<RedactedToken>, CredentialStoreError> {
        let file = self.load()?;

        Ok(file
            .access_tokens
            .get(endpoint.as_str())
            .and_then(|token| RedactedToken::non_empty(token.as_str())))
    }

    fn set(&self, endpoint: &Endpoint, token: &RedactedToken) -> Result<(), CredentialStoreError> {
        let _guard = self.lock_writes();
        let mut file = self.load()?;
        if let Some(mut previous) = file
            .access_tokens
            .insert(endpoint.to_string(), token.as_str().to_string())
        {
            previous.zeroize();
        }
        self.save(&file)?;

        info!(
            "Stored access token for {endpoint} ({} chars) in {}",
            token.len(),
            self.path.display()
        );
        Ok(())
    }

    fn delete(&self, endpoint: &Endpoint) -> Result<(), CredentialStoreError> {
        let _guard = self.lock_writes();
        let mut file = self.load()?;

        match file.access_tokens.remove(endpoint.as_str()) {
            Some(mut removed) => removed.zeroize(),
            None => {
                debug!("No stored access token for {endpoint}, nothing to delete");
                return Ok(());
            }
        }

        self.save(&file)?;
        info!("Deleted access token for {endpoint}");
        Ok(())
    }
}
