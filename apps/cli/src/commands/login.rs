use crate::cli::CloudUrlArgs;
use crate::error::NimbusError;

use cloud_client::{ACCESS_TOKEN_ENV_VAR, CloudClient, CloudConfig, auth};

use common::{ErrorLocation, RedactedToken};

use std::io::{self, BufRead, Write};
use std::panic::Location;

use zeroize::Zeroize;

/// `nimbus login`: verify a token and store it for the chosen cloud.
pub async fn run(config: &CloudConfig, args: &CloudUrlArgs) -> Result<(), NimbusError> {
    let cloud_url = args.resolve_or(&config.api_url);

    let token = match &config.access_token {
        Some(token) => token.clone(),
        None => prompt_for_token(cloud_url)?,
    };

    let client = CloudClient::from_config(config)?;
    let user = auth::login(&client, cloud_url, &token).await?;

    println!("Logged in to {cloud_url} as {}", user.name);
    Ok(())
}

fn prompt_for_token(cloud_url: &str) -> Result<RedactedToken, NimbusError> {
    let mut prompt = io::stderr();
    write!(
        prompt,
        "Enter your access token from {cloud_url} (or set {ACCESS_TOKEN_ENV_VAR}): "
    )
    .and_then(|()| prompt.flush())
    .map_err(|e| NimbusError::Input {
        message: format!("Failed to write prompt: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    read_token(io::stdin().lock())
}

/// Read one line and turn it into a token. Surrounding whitespace is dropped.
///
/// # Errors
///
/// Returns [`NimbusError::Input`] if reading fails or the line is blank.
pub fn read_token(mut reader: impl BufRead) -> Result<RedactedToken, NimbusError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| NimbusError::Input {
            message: format!("Failed to read access token: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let token = RedactedToken::non_empty(line.trim());
    line.zeroize();

    token.ok_or_else(|| NimbusError::Input {
        message: "access token must not be empty".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
