use crate::error::{Error, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_PREVIEW_BASE: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration (~/.site-studio/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Generation backend, e.g. "http://localhost:8000"
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Static file server that hosts built sites
    #[serde(default = "default_preview_base")]
    pub preview_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            preview_base: default_preview_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_download_dir")]
    pub dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_preview_base() -> String {
    DEFAULT_PREVIEW_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Parse client config from a string (useful for testing)
pub fn parse_client_config_str(content: &str) -> Result<ClientConfig> {
    let config: ClientConfig = toml::from_str(content)?;
    validate_base_url(&config.backend.api_base, "backend.api_base")?;
    validate_base_url(&config.backend.preview_base, "backend.preview_base")?;
    if config.backend.timeout_secs == 0 {
        return Err(Error::ConfigParse(
            "backend.timeout_secs must be greater than 0".to_string(),
        ));
    }
    Ok(config)
}

/// Load client config, returning `None` when the file does not exist
pub fn load_client_config<P: AsRef<Path>>(path: P) -> Result<Option<ClientConfig>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    parse_client_config_str(&content).map(Some)
}

pub fn save_client_config<P: AsRef<Path>>(path: P, config: &ClientConfig) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

/// Location of the client config file: `$HOME/.site-studio/config.toml`
pub fn client_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| Error::ConfigParse("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".site-studio").join("config.toml"))
}

/// Check that `value` is an absolute http(s) URL.
///
/// Rejects relative strings, other schemes and URLs carrying a query or
/// fragment, since paths are appended to these bases.
pub fn validate_base_url(value: &str, field_name: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| {
        Error::ConfigParse(format!("Invalid URL in '{}': '{}' ({})", field_name, value, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigParse(format!(
            "Only http and https are allowed in '{}': '{}'",
            field_name, value
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::ConfigParse(format!(
            "Query strings and fragments not allowed in '{}': '{}'",
            field_name, value
        )));
    }

    Ok(url)
}

/// A form-mode run described in a file: the site to create, the content to
/// generate for it and whether to fetch the archive afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePlan {
    pub site: SiteConfig,
    pub content: Vec<ContentForm>,
    pub download: bool,
}

/// Raw TOML structure of a site plan (site.toml)
#[derive(Debug, Deserialize)]
struct RawPlan {
    site: RawSite,
    #[serde(default)]
    content: Vec<RawContent>,
    #[serde(default)]
    download: Option<RawDownload>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    theme: Option<String>,
    sections: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(rename = "type")]
    content_type: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    requirements: String,
    tone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDownload {
    #[serde(default)]
    enabled: bool,
}

/// Parse site.toml from a file path
pub fn parse_site_plan<P: AsRef<Path>>(path: P) -> Result<SitePlan> {
    let content = fs::read_to_string(path)?;
    parse_site_plan_str(&content)
}

/// Parse site.toml from a string.
///
/// Missing names, descriptions, titles and requirements are left empty on
/// purpose: the orchestrator rejects them before any request is made.
pub fn parse_site_plan_str(content: &str) -> Result<SitePlan> {
    let raw: RawPlan = toml::from_str(content)?;

    let theme_type = match raw.site.theme {
        Some(theme) => theme.parse()?,
        None => ThemeType::default(),
    };

    let site = SiteConfig {
        site_name: raw.site.name,
        site_description: raw.site.description,
        theme_type,
        main_sections: raw.site.sections.unwrap_or_else(default_sections),
    };

    let content: Result<Vec<ContentForm>> = raw
        .content
        .into_iter()
        .map(|c| {
            let content_type = match c.content_type {
                Some(t) => t.parse()?,
                None => ContentType::default(),
            };
            let tone = match c.tone {
                Some(t) => t.parse()?,
                None => Tone::default(),
            };
            Ok(ContentForm {
                content_type,
                title: c.title,
                requirements: c.requirements,
                tone,
            })
        })
        .collect();

    Ok(SitePlan {
        site,
        content: content?,
        download: raw.download.map(|d| d.enabled).unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_client_config_uses_defaults() {
        let config = parse_client_config_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.backend.api_base, DEFAULT_API_BASE);
        assert_eq!(config.download.dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_client_config() {
        let config = parse_client_config_str(
            r#"
[backend]
api_base = "https://studio.example.com"

[download]
dir = "downloads"
"#,
        )
        .unwrap();
        assert_eq!(config.backend.api_base, "https://studio.example.com");
        assert_eq!(config.backend.preview_base, DEFAULT_PREVIEW_BASE);
        assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.download.dir, PathBuf::from("downloads"));
    }

    #[test]
    fn test_client_config_rejects_bad_urls() {
        let result = parse_client_config_str("[backend]\napi_base = \"ftp://host\"\n");
        assert!(result.unwrap_err().to_string().contains("backend.api_base"));

        let result = parse_client_config_str("[backend]\npreview_base = \"not a url\"\n");
        assert!(result.unwrap_err().to_string().contains("backend.preview_base"));

        let result = parse_client_config_str("[backend]\napi_base = \"http://h/?q=1\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_client_config_rejects_zero_timeout() {
        let result = parse_client_config_str("[backend]\ntimeout_secs = 0\n");
        assert!(result.unwrap_err().to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_client_config_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert!(load_client_config(&path).unwrap().is_none());

        let mut config = ClientConfig::default();
        config.backend.api_base = "http://10.0.0.2:8000".to_string();
        save_client_config(&path, &config).unwrap();

        assert_eq!(load_client_config(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_parse_minimal_plan() {
        let plan = parse_site_plan_str(
            r#"
[site]
name = "Tech Innovation Blog"
description = "Emerging technology"
"#,
        )
        .unwrap();
        assert_eq!(plan.site.site_name, "Tech Innovation Blog");
        assert_eq!(plan.site.theme_type, ThemeType::Blog);
        assert_eq!(plan.site.main_sections, vec!["About", "Blog"]);
        assert!(plan.content.is_empty());
        assert!(!plan.download);
    }

    #[test]
    fn test_parse_full_plan() {
        let plan = parse_site_plan_str(
            r#"
[site]
name = "Studio Lumen"
description = "Photography portfolio"
theme = "portfolio"
sections = ["Work", "Contact"]

[[content]]
type = "About Page"
title = "About me"
requirements = "Ten years behind the lens"
tone = "Friendly"

[[content]]
title = "First shoot"
requirements = "Story of the first commission"

[download]
enabled = true
"#,
        )
        .unwrap();

        assert_eq!(plan.site.theme_type, ThemeType::Portfolio);
        assert_eq!(plan.site.main_sections, vec!["Work", "Contact"]);
        assert_eq!(plan.content.len(), 2);
        assert_eq!(plan.content[0].content_type, ContentType::AboutPage);
        assert_eq!(plan.content[0].tone, Tone::Friendly);
        assert_eq!(plan.content[1].content_type, ContentType::BlogPost);
        assert_eq!(plan.content[1].tone, Tone::Professional);
        assert!(plan.download);
    }

    #[test]
    fn test_plan_keeps_empty_fields_for_orchestrator() {
        let plan = parse_site_plan_str("[site]\nname = \"Only a name\"\n").unwrap();
        assert!(plan.site.site_description.is_empty());
    }

    #[test]
    fn test_plan_rejects_unknown_theme() {
        let result = parse_site_plan_str("[site]\nname = \"x\"\ntheme = \"wiki\"\n");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("theme"));
        assert!(message.contains("wiki"));
    }

    #[test]
    fn test_plan_rejects_unknown_tone() {
        let result = parse_site_plan_str(
            r#"
[site]
name = "x"

[[content]]
title = "t"
tone = "Sarcastic"
"#,
        );
        assert!(result.unwrap_err().to_string().contains("tone"));
    }

    #[test]
    fn test_plan_requires_site_table() {
        assert!(parse_site_plan_str("[[content]]\ntitle = \"t\"\n").is_err());
    }
}
