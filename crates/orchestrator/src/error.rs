use crate::busy::Action;
use studio_backend::{BackendError, DownloadError};
use thiserror::Error;

/// Local faults caught before any request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please describe the website you want to create")]
    EmptyDescription,

    #[error("Please fill in site name and description")]
    MissingSiteFields,

    #[error("Please create a site first")]
    NoCurrentSite,

    #[error("Please fill in title and requirements")]
    MissingContentFields,

    #[error("That message has no website to download")]
    NoSiteOnTurn,
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot {0} while another request of the same kind is in progress")]
    Busy(Action),

    #[error("could not {action}: {source}")]
    Backend {
        action: Action,
        #[source]
        source: BackendError,
    },

    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    /// Orchestrator state was addressed inconsistently (a bug, not a user
    /// fault)
    #[error(transparent)]
    State(#[from] studio_core::Error),
}

impl ActionError {
    /// True when the fault was local and no request reached the backend
    pub fn is_local(&self) -> bool {
        matches!(self, ActionError::Validation(_) | ActionError::Busy(_))
    }
}
