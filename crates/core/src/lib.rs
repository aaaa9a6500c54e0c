pub mod config;
pub mod error;
pub mod session;
pub mod transcript;
pub mod types;

pub use config::{ClientConfig, SitePlan, parse_site_plan};
pub use error::{Error, Result};
pub use session::{CurrentSite, Session};
pub use transcript::Transcript;
pub use types::*;
