use crate::cli::CloudUrlArgs;
use crate::error::NimbusError;

use cloud_client::{CloudConfig, FileCredentialStore, auth};

/// `nimbus logout`: drop the stored token for the chosen cloud.
pub fn run(config: &CloudConfig, args: &CloudUrlArgs) -> Result<(), NimbusError> {
    let cloud_url = args.resolve_or(&config.api_url);
    let store = FileCredentialStore::new(&config.home_dir);

    auth::logout(&store, cloud_url)?;

    println!("Logged out of {cloud_url}");
    Ok(())
}
