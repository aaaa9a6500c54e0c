use crate::error::BackendError;
use crate::{Backend, GenerateContentRequest, HealthStatus, SiteInfo, SiteListing};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use studio_core::config::{BackendConfig, validate_base_url};
use studio_core::{GeneratedContent, SiteConfig, SiteId, SiteResult};
use tracing::debug;
use url::Url;

/// reqwest client for the generation backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
    api_base: String,
}

/// Site creation response. The description endpoint answers in camelCase,
/// the structured one with `site_id` and no name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteResponse {
    #[serde(alias = "site_id")]
    site_id: SiteId,
    #[serde(default, alias = "site_name")]
    site_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl HttpBackend {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, BackendError> {
        let url = validate_base_url(api_base, "api_base")
            .map_err(|e| BackendError::InvalidBase(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("site-studio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: url.as_str().trim_end_matches('/').to_string(),
            base: url,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::new(&config.api_base, Duration::from_secs(config.timeout_secs))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Endpoint under the base URL. Each segment is percent-encoded, so a
    /// site id can never turn into a query, a fragment or another path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) bases always have path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Turn a non-2xx response into `BackendError::Api`, pulling out
    /// `detail` when the body is JSON carrying one.
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });

        debug!(status = status.as_u16(), ?detail, "backend error response");
        Err(BackendError::api(status.as_u16(), detail))
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let response = Self::checked(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn create_website(&self, description: &str) -> Result<SiteResult, BackendError> {
        let url = self.endpoint(&["api", "create-from-description"]);
        let response = self
            .client
            .post(url)
            .json(&json!({ "description": description }))
            .send()
            .await?;

        let site: SiteResponse = Self::json(response).await?;
        debug!(site_id = %site.site_id, status = ?site.status, "website created");

        let site_name = site
            .site_name
            .ok_or_else(|| BackendError::Decode("response is missing siteName".to_string()))?;

        Ok(SiteResult {
            site_id: site.site_id,
            site_name,
        })
    }

    async fn create_site(&self, config: &SiteConfig) -> Result<SiteResult, BackendError> {
        let url = self.endpoint(&["api", "sites"]);
        let response = self.client.post(url).json(config).send().await?;

        let site: SiteResponse = Self::json(response).await?;
        debug!(site_id = %site.site_id, status = ?site.status, "site created");

        Ok(SiteResult {
            site_id: site.site_id,
            site_name: site.site_name.unwrap_or_else(|| config.site_name.clone()),
        })
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, BackendError> {
        let url = self.endpoint(&["api", "generate-content"]);
        let response = self.client.post(url).json(request).send().await?;
        Self::json(response).await
    }

    async fn download_archive(&self, site_id: &SiteId) -> Result<Vec<u8>, BackendError> {
        let url = self.endpoint(&["api", "sites", site_id.as_str(), "download"]);
        let response = self.client.get(url).send().await?;
        let response = Self::checked(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let response = self.client.get(self.endpoint(&["health"])).send().await?;
        Self::json(response).await
    }

    async fn list_sites(&self) -> Result<SiteListing, BackendError> {
        let response = self.client.get(self.endpoint(&["api", "sites"])).send().await?;
        Self::json(response).await
    }

    async fn site_info(&self, site_id: &SiteId) -> Result<SiteInfo, BackendError> {
        let url = self.endpoint(&["api", "sites", site_id.as_str()]);
        let response = self.client.get(url).send().await?;
        Self::json(response).await
    }
}
