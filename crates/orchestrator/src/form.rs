//! Form mode: create one site from a structured config, generate content
//! items against it, download its archive.

use crate::busy::{Action, BusyFlags};
use crate::download::download_site;
use crate::error::{ActionError, ValidationError};
use crate::notice::{Notice, Notifier};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use studio_backend::{ArtifactResolver, Backend, GenerateContentRequest, SavedArchive};
use studio_core::{ContentForm, ContentItem, CurrentSite, Session, SiteConfig, SiteResult};
use tracing::{info, warn};

pub struct FormOrchestrator {
    backend: Arc<dyn Backend>,
    artifacts: ArtifactResolver,
    notifier: Arc<dyn Notifier>,
    session: Mutex<Session>,
    busy: BusyFlags,
}

impl FormOrchestrator {
    pub fn new(
        backend: Arc<dyn Backend>,
        artifacts: ArtifactResolver,
        notifier: Arc<dyn Notifier>,
        draft: SiteConfig,
    ) -> Self {
        Self {
            backend,
            artifacts,
            notifier,
            session: Mutex::new(Session::new(draft)),
            busy: BusyFlags::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Edit the draft config. A site already created keeps the config it was
    /// created with.
    pub fn edit_config(&self, edit: impl FnOnce(&mut SiteConfig)) {
        edit(self.lock().draft_mut());
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut ContentForm)) {
        edit(self.lock().form_mut());
    }

    /// Snapshot of the session
    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    pub fn current_site(&self) -> Option<CurrentSite> {
        self.lock().current().cloned()
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.busy.is_busy(action)
    }

    pub fn preview_url(&self) -> Option<String> {
        self.current_site()
            .map(|current| self.artifacts.preview_url(&current.site.site_id))
    }

    fn reject(&self, fault: ValidationError) -> ActionError {
        warn!(%fault, "rejected before request");
        self.notifier.notify(Notice::error(fault.to_string()));
        ActionError::Validation(fault)
    }

    /// Create a site from the draft config. On success it becomes the
    /// current site and the config used is frozen next to it. On failure
    /// the session is left as it was.
    pub async fn create_site(&self) -> Result<SiteResult, ActionError> {
        let config = self.lock().draft().clone();
        if config.site_name.trim().is_empty() || config.site_description.trim().is_empty() {
            return Err(self.reject(ValidationError::MissingSiteFields));
        }

        let _guard = self
            .busy
            .try_acquire(Action::CreateSite)
            .ok_or(ActionError::Busy(Action::CreateSite))?;

        info!(site_name = %config.site_name, theme = %config.theme_type, "creating site");
        match self.backend.create_site(&config).await {
            Ok(site) => {
                info!(site_id = %site.site_id, "site created");
                self.lock().establish_site(site.clone(), config);
                self.notifier.notify(Notice::success("Site created successfully!"));
                Ok(site)
            }
            Err(source) => {
                warn!(error = %source, "site creation failed");
                self.notifier.notify(Notice::error(format!(
                    "Error creating site: {}",
                    source.user_message()
                )));
                Err(ActionError::Backend {
                    action: Action::CreateSite,
                    source,
                })
            }
        }
    }

    /// Generate one content item for the current site from the content
    /// form. On success the item is appended and the form's title and
    /// requirements are cleared; type and tone stay.
    pub async fn generate_content(&self) -> Result<ContentItem, ActionError> {
        let (current, form) = {
            let session = self.lock();
            (session.current().cloned(), session.form().clone())
        };
        let current = match current {
            Some(current) => current,
            None => return Err(self.reject(ValidationError::NoCurrentSite)),
        };
        if form.title.trim().is_empty() || form.requirements.trim().is_empty() {
            return Err(self.reject(ValidationError::MissingContentFields));
        }

        let _guard = self
            .busy
            .try_acquire(Action::GenerateContent)
            .ok_or(ActionError::Busy(Action::GenerateContent))?;

        let request = GenerateContentRequest {
            site_id: current.site.site_id.clone(),
            content_type: form.content_type,
            title: form.title.clone(),
            requirements: form.requirements.clone(),
            tone: form.tone,
            site_config: current.config,
        };

        info!(site_id = %request.site_id, content_type = %request.content_type, "generating content");
        match self.backend.generate_content(&request).await {
            Ok(generated) => {
                let item = ContentItem {
                    site_id: request.site_id,
                    content_type: request.content_type,
                    title: request.title,
                    requirements: request.requirements,
                    tone: request.tone,
                    generated,
                    created_at: Utc::now(),
                };
                self.lock().record_content(item.clone())?;
                self.notifier.notify(Notice::success("Content generated successfully!"));
                Ok(item)
            }
            Err(source) => {
                warn!(error = %source, "content generation failed");
                self.notifier.notify(Notice::error(format!(
                    "Error generating content: {}",
                    source.user_message()
                )));
                Err(ActionError::Backend {
                    action: Action::GenerateContent,
                    source,
                })
            }
        }
    }

    /// Download the current site's archive
    pub async fn download(&self) -> Result<SavedArchive, ActionError> {
        let site = match self.current_site() {
            Some(current) => current.site,
            None => return Err(self.reject(ValidationError::NoCurrentSite)),
        };
        download_site(
            self.backend.as_ref(),
            &self.artifacts,
            &self.busy,
            self.notifier.as_ref(),
            &site,
        )
        .await
    }
}
