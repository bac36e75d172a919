use std::path::PathBuf;

use log::{info, warn};

/// Load `.env` from the working directory, else from next to the executable.
///
/// Variables already set in the process win over the file. Returns the file
/// that was loaded, if any.
pub fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {path:?}");
        return Some(path);
    }

    let exe_dir = std::env::current_exe().ok()?.parent()?.to_path_buf();
    let env_path = exe_dir.join(".env");
    if !env_path.exists() {
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from: {env_path:?}");
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {env_path:?}: {e}");
            None
        }
    }
}
