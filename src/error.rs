use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between the button click and the share link.
///
/// Variants carry display-ready text; the display string is what the user
/// sees in the outcome dialog. Nothing below the app layer formats messages.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is absent. Checked once, at startup.
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    /// The date field was empty or whitespace-only.
    #[error("Please enter a date in YYYY-MM-DD format.")]
    EmptyDate,

    /// The interactive Spotify login did not produce a usable session.
    #[error("Spotify authorization failed: {0}")]
    Auth(String),

    /// The chart page could not be fetched (network fault or non-2xx status).
    #[error("Could not fetch the chart: {0}")]
    Fetch(String),

    /// The chart page fetched fine but no song titles matched the markup
    /// heuristic, usually a mistyped date or a chart that does not exist.
    #[error("No songs found. Double-check the date format or chart availability.")]
    NoSongsFound,

    /// Spotify rejected the playlist creation call.
    #[error("Could not create the playlist: {0}")]
    CreatePlaylist(String),

    /// Any other Spotify Web API failure (user lookup, search, add).
    #[error("Spotify API error: {0}")]
    Spotify(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

impl From<rspotify::ClientError> for Error {
    fn from(err: rspotify::ClientError) -> Self {
        Error::Spotify(err.to_string())
    }
}
