use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a transcript turn, issued by the transcript in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Display state of a turn.
///
/// User turns and seeded assistant turns are `Settled`. A placeholder starts
/// `Pending` and moves exactly once to `Resolved` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    Settled,
    Pending,
    Resolved,
    Failed,
}

/// Opaque site identifier issued by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A successfully created site. The preview URL is derived from `site_id`
/// and is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResult {
    pub site_id: SiteId,
    pub site_name: String,
}

/// One entry of the conversational transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub content: String,
    pub status: TurnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_ref: Option<SiteResult>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn is_pending(&self) -> bool {
        self.status == TurnStatus::Pending
    }
}

/// Kind of site the backend should scaffold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    #[default]
    Blog,
    Portfolio,
    Business,
    Documentation,
}

impl ThemeType {
    pub const ALL: [ThemeType; 4] = [
        ThemeType::Blog,
        ThemeType::Portfolio,
        ThemeType::Business,
        ThemeType::Documentation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeType::Blog => "blog",
            ThemeType::Portfolio => "portfolio",
            ThemeType::Business => "business",
            ThemeType::Documentation => "documentation",
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidValue {
                field: "theme",
                value: s.to_string(),
            })
    }
}

/// Form-mode site configuration.
///
/// Editable until a create-site request is issued; the session keeps a
/// frozen copy next to the site it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: String,
    pub site_description: String,
    pub theme_type: ThemeType,
    pub main_sections: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            site_description: String::new(),
            theme_type: ThemeType::default(),
            main_sections: default_sections(),
        }
    }
}

pub fn default_sections() -> Vec<String> {
    vec!["About".to_string(), "Blog".to_string()]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    #[serde(rename = "Blog Post")]
    BlogPost,
    #[serde(rename = "About Page")]
    AboutPage,
    #[serde(rename = "Contact Page")]
    ContactPage,
    #[serde(rename = "Service Page")]
    ServicePage,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::BlogPost,
        ContentType::AboutPage,
        ContentType::ContactPage,
        ContentType::ServicePage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "Blog Post",
            ContentType::AboutPage => "About Page",
            ContentType::ContactPage => "Contact Page",
            ContentType::ServicePage => "Service Page",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    /// Accepts the display label ("Blog Post") or a slug ("blog-post").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::InvalidValue {
                field: "content.type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Formal,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Friendly, Tone::Formal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidValue {
                field: "tone",
                value: s.to_string(),
            })
    }
}

/// Input fields for the next content item.
///
/// `content_type` and `tone` are sticky across submissions; `title` and
/// `requirements` are cleared after each successful generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentForm {
    pub content_type: ContentType,
    pub title: String,
    pub requirements: String,
    pub tone: Tone,
}

impl ContentForm {
    pub fn clear_text(&mut self) {
        self.title.clear();
        self.requirements.clear();
    }
}

/// What the backend returned for a generate-content request.
///
/// Only `title` and `contentType` are known; everything else the server
/// attaches is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A generated content item, append-only within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub site_id: SiteId,
    pub content_type: ContentType,
    pub title: String,
    pub requirements: String,
    pub tone: Tone,
    pub generated: GeneratedContent,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Title as reported by the server, falling back to the requested one
    pub fn display_title(&self) -> &str {
        self.generated.title.as_deref().unwrap_or(&self.title)
    }
}
