use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;
use studio_backend::{ArtifactResolver, HttpBackend};
use studio_core::ClientConfig;
use studio_core::config::{client_config_path, load_client_config, validate_base_url};
use tracing::debug;

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub preview_base: Option<String>,
    pub download_dir: Option<PathBuf>,
}

/// Everything a command needs to talk to the backend
pub struct Context {
    pub config: ClientConfig,
    pub backend: Arc<HttpBackend>,
    pub artifacts: ArtifactResolver,
}

impl Context {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let path = client_config_path()?;
        let stored = load_client_config(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        if stored.is_none() {
            debug!(path = %path.display(), "no config file, using defaults");
        }

        let config = apply_overrides(stored.unwrap_or_default(), overrides)?;
        let backend =
            HttpBackend::from_config(&config.backend).context("Invalid backend configuration")?;
        let artifacts = ArtifactResolver::new(
            config.backend.preview_base.clone(),
            config.download.dir.clone(),
        );

        Ok(Self {
            config,
            backend: Arc::new(backend),
            artifacts,
        })
    }
}

pub fn apply_overrides(mut config: ClientConfig, overrides: &Overrides) -> Result<ClientConfig> {
    if let Some(api_base) = &overrides.api_base {
        validate_base_url(api_base, "--api-base")?;
        config.backend.api_base = api_base.clone();
    }
    if let Some(preview_base) = &overrides.preview_base {
        validate_base_url(preview_base, "--preview-base")?;
        config.backend.preview_base = preview_base.clone();
    }
    if let Some(dir) = &overrides.download_dir {
        config.download.dir = dir.clone();
    }
    Ok(config)
}
