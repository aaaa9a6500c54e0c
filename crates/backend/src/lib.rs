// Client side of the site generation service: the backend contract, its
// HTTP implementation and the artifacts derived from a built site.

pub mod archive;
pub mod artifact;
pub mod error;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studio_core::{ContentType, GeneratedContent, SiteConfig, SiteId, SiteResult, Tone};

pub use artifact::{ArtifactResolver, SavedArchive, archive_file_name, preview_url};
pub use error::{ArchiveError, BackendError, DownloadError};
pub use http::HttpBackend;

/// Body of a generate-content request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub site_id: SiteId,
    pub content_type: ContentType,
    pub title: String,
    pub requirements: String,
    pub tone: Tone,
    pub site_config: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteListing {
    pub sites: Vec<SiteId>,
    #[serde(default)]
    pub count: usize,
}

/// Server-side view of one site
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteInfo {
    #[serde(alias = "siteId")]
    pub site_id: SiteId,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub content: Vec<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "previewUrl")]
    pub preview_url: Option<String>,
}

/// The generation service, as seen by the orchestrator.
///
/// Every method is one network exchange. Implementations never retry.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Build a site from a free-text description
    async fn create_website(&self, description: &str) -> Result<SiteResult, BackendError>;

    /// Build a site from a structured config
    async fn create_site(&self, config: &SiteConfig) -> Result<SiteResult, BackendError>;

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, BackendError>;

    /// Fetch the zip archive of a built site
    async fn download_archive(&self, site_id: &SiteId) -> Result<Vec<u8>, BackendError>;

    async fn health(&self) -> Result<HealthStatus, BackendError>;

    async fn list_sites(&self) -> Result<SiteListing, BackendError>;

    async fn site_info(&self, site_id: &SiteId) -> Result<SiteInfo, BackendError>;
}
