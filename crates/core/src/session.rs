//! Form-mode session: one current site plus the content generated for it.

use crate::error::{Error, Result};
use crate::types::{ContentForm, ContentItem, SiteConfig, SiteId, SiteResult};

/// The site a session is working on, together with the configuration
/// that created it. The config here is frozen; edits to the draft do not
/// reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSite {
    pub site: SiteResult,
    pub config: SiteConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    draft: SiteConfig,
    current: Option<CurrentSite>,
    content: Vec<ContentItem>,
    form: ContentForm,
}

impl Session {
    pub fn new(draft: SiteConfig) -> Self {
        Self {
            draft,
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &SiteConfig {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SiteConfig {
        &mut self.draft
    }

    pub fn current(&self) -> Option<&CurrentSite> {
        self.current.as_ref()
    }

    pub fn form(&self) -> &ContentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContentForm {
        &mut self.form
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    /// Content generated for one site, in generation order
    pub fn content_for<'a>(&'a self, site_id: &'a SiteId) -> impl Iterator<Item = &'a ContentItem> {
        self.content.iter().filter(move |c| &c.site_id == site_id)
    }

    /// Make `site` the current site, freezing `config` alongside it
    pub fn establish_site(&mut self, site: SiteResult, config: SiteConfig) {
        self.current = Some(CurrentSite { site, config });
    }

    /// Append a generated item and clear the text fields of the form.
    ///
    /// The item keeps the id of the site it was generated for, which may no
    /// longer be the current one if a new site was created meanwhile.
    pub fn record_content(&mut self, item: ContentItem) -> Result<()> {
        if self.current.is_none() {
            return Err(Error::NoCurrentSite);
        }
        self.content.push(item);
        self.form.clear_text();
        Ok(())
    }
}
