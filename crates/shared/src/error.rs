use thiserror::Error;

/// Failure of a catalog fetch. `Display` is meant for logs, [`CatalogError::user_message`]
/// for the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog entry '{key}' not found")]
    NotFound { key: String },
    #[error("catalog request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("catalog unreachable: {0}")]
    NetworkError(String),
    #[error("invalid catalog payload: {0}")]
    InvalidPayload(String),
}

impl CatalogError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { key } => format!("No creature named or numbered '{key}' was found."),
            Self::RequestFailed { .. } => {
                "The catalog rejected the request. Please try again.".to_string()
            }
            Self::NetworkError(_) => {
                "Could not reach the catalog. Check your connection and try again.".to_string()
            }
            Self::InvalidPayload(_) => {
                "The catalog returned data that could not be read.".to_string()
            }
        }
    }

    /// HTTP status behind the failure, for log fields.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::RequestFailed { status } => Some(*status),
            Self::NetworkError(_) | Self::InvalidPayload(_) => None,
        }
    }
}
