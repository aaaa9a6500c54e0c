//! Test doubles shared by the orchestrator tests.

use crate::notice::{Notice, NoticeLevel, Notifier};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use studio_backend::{
    Backend, BackendError, GenerateContentRequest, HealthStatus, SiteInfo, SiteListing,
};
use studio_core::{GeneratedContent, SiteConfig, SiteId, SiteResult};
use tokio::sync::{Notify, Semaphore};

pub const CREATE_WEBSITE: &str = "create_website";
pub const CREATE_SITE: &str = "create_site";
pub const GENERATE: &str = "generate_content";
pub const DOWNLOAD: &str = "download_archive";

pub struct MockBackend {
    calls: Mutex<HashMap<&'static str, usize>>,
    failures: Mutex<HashMap<&'static str, Option<String>>>,
    gated: Mutex<Vec<&'static str>>,
    site_name: String,
    next_site: AtomicUsize,
    pub requests: Mutex<Vec<GenerateContentRequest>>,
    entered: Notify,
    gate: Semaphore,
}

impl MockBackend {
    /// Sites created from a description are all named "AI Tech Blog"
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            gated: Mutex::new(Vec::new()),
            site_name: "AI Tech Blog".to_string(),
            next_site: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        }
    }

    /// Make `op` fail, with `detail` as the backend's explanation
    pub fn fail(&self, op: &'static str, detail: Option<&str>) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, detail.map(str::to_string));
    }

    pub fn succeed(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Hold `op` in flight until `release` is called
    pub fn hold(&self, op: &'static str) {
        self.gated.lock().unwrap().push(op);
    }

    /// Resolves once a held request has started
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self, op: &'static str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    async fn enter(&self, op: &'static str) -> Result<(), BackendError> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;

        let held = self.gated.lock().unwrap().contains(&op);
        if held {
            self.entered.notify_one();
            self.gate.acquire().await.unwrap().forget();
        }

        match self.failures.lock().unwrap().get(op) {
            Some(detail) => Err(BackendError::api(500, detail.clone())),
            None => Ok(()),
        }
    }

    fn issue_site(&self, name: &str) -> SiteResult {
        let n = self.next_site.fetch_add(1, Ordering::SeqCst) + 1;
        SiteResult {
            site_id: SiteId::new(format!("site-{}", n)),
            site_name: name.to_string(),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn create_website(&self, _description: &str) -> Result<SiteResult, BackendError> {
        self.enter(CREATE_WEBSITE).await?;
        Ok(self.issue_site(&self.site_name))
    }

    async fn create_site(&self, config: &SiteConfig) -> Result<SiteResult, BackendError> {
        self.enter(CREATE_SITE).await?;
        Ok(self.issue_site(&config.site_name))
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, BackendError> {
        self.enter(GENERATE).await?;
        self.requests.lock().unwrap().push(request.clone());
        Ok(GeneratedContent {
            title: Some(request.title.clone()),
            content_type: Some(request.content_type.to_string()),
            extra: Default::default(),
        })
    }

    async fn download_archive(&self, _site_id: &SiteId) -> Result<Vec<u8>, BackendError> {
        self.enter(DOWNLOAD).await?;
        Ok(b"PK\x03\x04site".to_vec())
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        unreachable!("not used by the orchestrators")
    }

    async fn list_sites(&self) -> Result<SiteListing, BackendError> {
        unreachable!("not used by the orchestrators")
    }

    async fn site_info(&self, _site_id: &SiteId) -> Result<SiteInfo, BackendError> {
        unreachable!("not used by the orchestrators")
    }
}

/// Collects notices for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
