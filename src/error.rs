use thiserror::Error;

/// Exit code for usage, configuration and local I/O failures.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when the statistics API cannot be reached.
pub const EXIT_TRANSPORT: u8 = 3;
/// Exit code for unusable response data.
pub const EXIT_DATA: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures while talking to the statistics API or reading its payloads.
///
/// Only `Transport` is fatal for a run; the other variants describe a single
/// station (or a single record) with unusable data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} is not valid JSON")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Station '{code}' rejected by the API with status {status}")]
    InvalidSiteCode { code: String, status: u16 },

    #[error("Malformed record #{index} for station '{station}': {reason}")]
    DataShape {
        station: String,
        index: usize,
        reason: String,
    },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let exit_code = if err.is_transport() { EXIT_TRANSPORT } else { EXIT_DATA };
        // Keep the reqwest cause in the message; AppError has no source chain.
        let message = match std::error::Error::source(&err) {
            Some(cause) => format!("{err}: {cause}"),
            None => err.to_string(),
        };
        AppError::new(exit_code, message)
    }
}
