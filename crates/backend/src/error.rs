use studio_core::SiteId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the generation backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend address: {0}")]
    InvalidBase(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `detail` is the backend's own explanation when the
    /// body carried one.
    #[error("backend returned {status}: {message}")]
    Api {
        status: u16,
        detail: Option<String>,
        message: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn api(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .clone()
            .unwrap_or_else(|| format!("request failed with status code {}", status));
        BackendError::Api {
            status,
            detail,
            message,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The backend's `detail` when present, else the transport-level message
    pub fn user_message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }
}

/// Failure of an archive download, kept apart from creation failures
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("archive transfer failed: {0}")]
    Transfer(#[from] BackendError),

    #[error("backend sent an empty archive for site {0}")]
    Empty(SiteId),

    #[error("could not save archive to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DownloadError {
    pub fn user_message(&self) -> String {
        match self {
            DownloadError::Transfer(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = BackendError::api(500, Some("LLM unavailable".to_string()));
        assert_eq!(err.user_message(), "LLM unavailable");
        assert_eq!(err.detail(), Some("LLM unavailable"));
    }

    #[test]
    fn test_user_message_without_detail() {
        let err = BackendError::api(502, None);
        assert_eq!(err.detail(), None);
        assert!(err.user_message().contains("502"));
    }

    #[test]
    fn test_download_error_wraps_backend_detail() {
        let err = DownloadError::from(BackendError::api(404, Some("Site not found".to_string())));
        assert_eq!(err.user_message(), "Site not found");
    }
}
