//! Conversational mode: each user turn issues one build request whose
//! result is written back onto the placeholder turn created for it.

use crate::busy::{Action, BusyFlags, BusyGuard};
use crate::download::download_site;
use crate::error::{ActionError, ValidationError};
use crate::notice::{Notice, Notifier};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use studio_backend::{ArtifactResolver, Backend, BackendError, SavedArchive};
use studio_core::{Role, SiteResult, Transcript, Turn, TurnId};
use tracing::{info, warn};

pub const WORKING_MESSAGE: &str = "🤖 Creating your website...";

pub const ABANDONED_MESSAGE: &str =
    "⚠️ The request was cancelled before your website was ready.\n\nPlease send it again.";

#[derive(Debug, Default)]
struct ChatState {
    transcript: Transcript,
    draft: String,
}

pub struct ChatOrchestrator {
    backend: Arc<dyn Backend>,
    artifacts: ArtifactResolver,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ChatState>,
    busy: BusyFlags,
}

impl ChatOrchestrator {
    pub fn new(
        backend: Arc<dyn Backend>,
        artifacts: ArtifactResolver,
        notifier: Arc<dyn Notifier>,
        transcript: Transcript,
    ) -> Self {
        Self {
            backend,
            artifacts,
            notifier,
            state: Mutex::new(ChatState {
                transcript,
                draft: String::new(),
            }),
            busy: BusyFlags::default(),
        }
    }

    // State transitions never span an await, so a poisoned lock still holds
    // a consistent transcript.
    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().draft = text.into();
    }

    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// Snapshot of the transcript
    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy(Action::SendMessage)
    }

    pub fn artifacts(&self) -> &ArtifactResolver {
        &self.artifacts
    }

    pub async fn submit_text(&self, text: impl Into<String>) -> Result<Turn, ActionError> {
        self.set_draft(text);
        self.submit().await
    }

    /// Submit the current draft.
    ///
    /// Appends the user turn and a pending placeholder, issues one
    /// create-website request and patches that placeholder (by id) with the
    /// outcome. Returns the settled placeholder: `Resolved` on success,
    /// `Failed` when the backend refused. `Err` means nothing was submitted.
    ///
    /// Dropping the returned future mid-request fails the placeholder with
    /// [`ABANDONED_MESSAGE`] before the busy flag is released.
    pub async fn submit(&self) -> Result<Turn, ActionError> {
        let (description, mut pending) = {
            let mut state = self.lock();
            let description = state.draft.trim().to_string();
            if description.is_empty() {
                return Err(ValidationError::EmptyDescription.into());
            }
            let busy = self
                .busy
                .try_acquire(Action::SendMessage)
                .ok_or(ActionError::Busy(Action::SendMessage))?;

            state.transcript.append(Role::User, description.clone());
            let placeholder = state.transcript.append_placeholder(WORKING_MESSAGE);
            state.draft.clear();
            (description, PendingTurn::new(self, placeholder.id, busy))
        };
        let placeholder = pending.id;

        info!(turn = %placeholder, "creating website from description");
        let result = self.backend.create_website(&description).await;

        let mut state = self.lock();
        pending.settled = true;
        match result {
            Ok(site) => {
                info!(turn = %placeholder, site_id = %site.site_id, "website created");
                let content = success_message(&site, &self.artifacts.preview_url(&site.site_id));
                state.transcript.resolve(placeholder, content, site)?;
                self.notifier.notify(Notice::success("Website created successfully!"));
            }
            Err(err) => {
                warn!(turn = %placeholder, error = %err, "website creation failed");
                state.transcript.fail(placeholder, failure_message(&err))?;
                self.notifier.notify(Notice::error("Failed to create website"));
            }
        }

        state
            .transcript
            .get(placeholder)
            .cloned()
            .ok_or_else(|| studio_core::Error::UnknownTurn(placeholder).into())
    }

    /// Download the site attached to turn `id`
    pub async fn download_turn(&self, id: TurnId) -> Result<SavedArchive, ActionError> {
        let site = {
            let state = self.lock();
            let turn = state
                .transcript
                .get(id)
                .ok_or(studio_core::Error::UnknownTurn(id))?;
            turn.site_ref.clone().ok_or(ValidationError::NoSiteOnTurn)?
        };
        self.download(&site).await
    }

    /// Download the most recently created site
    pub async fn download_latest(&self) -> Result<SavedArchive, ActionError> {
        let site = self
            .lock()
            .transcript
            .latest_site()
            .cloned()
            .ok_or(ValidationError::NoSiteOnTurn)?;
        self.download(&site).await
    }

    async fn download(&self, site: &SiteResult) -> Result<SavedArchive, ActionError> {
        download_site(
            self.backend.as_ref(),
            &self.artifacts,
            &self.busy,
            self.notifier.as_ref(),
            site,
        )
        .await
    }
}

/// The placeholder of a submission in flight, together with its busy flag.
///
/// If the submission is dropped before its response is written back, the
/// placeholder is failed on drop, before the flag is released, so an
/// abandoned request never leaves a pending turn behind.
struct PendingTurn<'a> {
    chat: &'a ChatOrchestrator,
    id: TurnId,
    settled: bool,
    _busy: BusyGuard<'a>,
}

impl<'a> PendingTurn<'a> {
    fn new(chat: &'a ChatOrchestrator, id: TurnId, busy: BusyGuard<'a>) -> Self {
        Self {
            chat,
            id,
            settled: false,
            _busy: busy,
        }
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(turn = %self.id, "submission dropped before completion");
        let result = self
            .chat
            .lock()
            .transcript
            .fail(self.id, ABANDONED_MESSAGE.to_string());
        if let Err(err) = result {
            warn!(turn = %self.id, error = %err, "could not settle abandoned turn");
        }
    }
}

fn success_message(site: &SiteResult, preview_url: &str) -> String {
    format!(
        "✅ **{}** created successfully!\n\n🌐 Preview: {}\n\n📥 Download: your complete website files are ready.",
        site.site_name, preview_url
    )
}

fn failure_message(err: &BackendError) -> String {
    format!(
        "❌ Sorry, I couldn't create your website. Error: {}\n\nPlease try again with a different description.",
        err.user_message()
    )
}
