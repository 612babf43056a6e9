//! Backend configuration: environment variables plus an optional profile file.
//!
//! Resolution order per field: environment variable first, then the
//! `aula.yaml` profile in the working directory. The access token is optional
//! (login itself needs none); data commands fail at the backend without one.

use std::env;
use std::path::Path;

use serde::Deserialize;

/// Environment variable naming the backend's base URL.
pub const BASE_URL_VAR: &str = "ROBLE_BASE_URL";
/// Environment variable naming the project contract (database name).
pub const CONTRACT_VAR: &str = "ROBLE_CONTRACT";
/// Environment variable carrying the session's access token.
pub const ACCESS_TOKEN_VAR: &str = "ROBLE_ACCESS_TOKEN";

/// Profile file read when environment variables are not set.
pub const PROFILE_FILE: &str = "aula.yaml";

/// Connection settings for the hosted Roble backend.
#[derive(Debug, Clone)]
pub struct RobleConfig {
    /// Base URL, e.g. `https://roble-api.openlab.uninorte.edu.co`.
    pub base_url: String,
    /// Project contract identifying the database.
    pub contract: String,
    /// Bearer token from a prior login, if any.
    pub access_token: Option<String>,
}

/// On-disk shape of the optional `aula.yaml` profile.
#[derive(Debug, Default, Deserialize)]
struct Profile {
    base_url: Option<String>,
    contract: Option<String>,
    access_token: Option<String>,
}

impl RobleConfig {
    /// Loads configuration from the environment and the optional profile.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing variable when neither the
    /// environment nor the profile provides a required field.
    pub fn load() -> Result<Self, String> {
        Self::load_from(Path::new(PROFILE_FILE))
    }

    fn load_from(profile_path: &Path) -> Result<Self, String> {
        let profile = read_profile(profile_path)?;

        let base_url = env::var(BASE_URL_VAR).ok().or(profile.base_url).ok_or_else(|| {
            format!("{BASE_URL_VAR} is not set and {PROFILE_FILE} has no base_url")
        })?;
        let contract = env::var(CONTRACT_VAR).ok().or(profile.contract).ok_or_else(|| {
            format!("{CONTRACT_VAR} is not set and {PROFILE_FILE} has no contract")
        })?;
        let access_token = env::var(ACCESS_TOKEN_VAR).ok().or(profile.access_token);

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), contract, access_token })
    }
}

fn read_profile(path: &Path) -> Result<Profile, String> {
    if !path.exists() {
        return Ok(Profile::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}
