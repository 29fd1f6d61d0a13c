use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzdoError {
    #[error("Missing credential: {0} was not provided and has no default")]
    MissingCredential(&'static str),

    #[error("Request to {endpoint} failed{}: {message}", status_suffix(.status))]
    UpstreamRequestFailed {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with status {code}"))
        .unwrap_or_default()
}

impl AzdoError {
    /// HTTP status carried by an upstream failure, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamRequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AzdoError>;
