// Request orchestration for the site studio: turns user intents into
// backend requests, one in flight per action class, and writes each result
// back to the state slot captured before the request was issued.

pub mod busy;
pub mod chat;
mod download;
pub mod error;
pub mod form;
pub mod notice;

#[cfg(test)]
mod mock;

pub use busy::{Action, BusyFlags, BusyGuard};
pub use chat::ChatOrchestrator;
pub use error::{ActionError, ValidationError};
pub use form::FormOrchestrator;
pub use notice::{Notice, NoticeLevel, Notifier};
