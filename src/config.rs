use std::env;

use crate::error::{Error, Result};

/// Spotify Developer credentials, read from the environment at startup
/// (a `.env` file in the working directory is honored).
///
/// Required variables:
/// - `SPOTIFY_CLIENT_ID`
/// - `SPOTIFY_CLIENT_SECRET`
/// - `SPOTIFY_REDIRECT_URI`, which must match one of the redirect URIs
///   registered for the app, e.g. `http://localhost:8888/callback`; the
///   authorization flow listens on its host and port.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: require("SPOTIFY_REDIRECT_URI")?,
        })
    }
}

fn require(var: &'static str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(var)),
    }
}
