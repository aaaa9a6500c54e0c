use crate::Backend;
use crate::error::DownloadError;
use std::io::Write;
use std::path::{Path, PathBuf};
use studio_core::SiteId;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use url::Url;

const ARCHIVE_SUFFIX: &str = "-hugo-site.zip";

/// Address of a built site on the static file server.
///
/// Pure: no request is made. The site id is percent-encoded as a single
/// path segment.
pub fn preview_url(preview_base: &str, site_id: &SiteId) -> String {
    if let Ok(mut url) = Url::parse(preview_base) {
        let appended = url
            .path_segments_mut()
            .map(|mut path| {
                path.pop_if_empty().extend(["sites", site_id.as_str(), ""]);
            })
            .is_ok();
        if appended {
            return url.into();
        }
    }
    format!("{}/sites/{}/", preview_base.trim_end_matches('/'), site_id)
}

/// Local file name for a site archive.
///
/// Whitespace runs and path separators become `-`, then the archive suffix
/// is appended. Example: "AI Tech Blog" -> "AI-Tech-Blog-hugo-site.zip"
pub fn archive_file_name(site_name: &str) -> String {
    let stem = site_name
        .trim()
        .split(|c: char| c.is_whitespace() || c == '/' || c == '\\')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        format!("site{}", ARCHIVE_SUFFIX)
    } else {
        format!("{}{}", stem, ARCHIVE_SUFFIX)
    }
}

/// A downloaded archive on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArchive {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Derives preview addresses and performs archive transfers
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    preview_base: String,
    download_dir: PathBuf,
}

impl ArtifactResolver {
    pub fn new(preview_base: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            preview_base: preview_base.into(),
            download_dir: download_dir.into(),
        }
    }

    pub fn preview_url(&self, site_id: &SiteId) -> String {
        preview_url(&self.preview_base, site_id)
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Fetch the archive for `site_id` and save it as `file_name` in the
    /// download directory.
    ///
    /// Bytes are staged in a temporary file next to the destination and
    /// renamed into place. On any failure the temporary file is dropped,
    /// which deletes it, so nothing is left behind.
    pub async fn download(
        &self,
        backend: &dyn Backend,
        site_id: &SiteId,
        file_name: &str,
    ) -> Result<SavedArchive, DownloadError> {
        debug!(%site_id, "fetching archive");
        let bytes = backend.download_archive(site_id).await?;
        if bytes.is_empty() {
            return Err(DownloadError::Empty(site_id.clone()));
        }

        let dest = self.download_dir.join(file_name);
        let save_err = |source: std::io::Error| DownloadError::Save {
            path: dest.clone(),
            source,
        };

        std::fs::create_dir_all(&self.download_dir).map_err(save_err)?;
        let mut staged = NamedTempFile::new_in(&self.download_dir).map_err(save_err)?;
        staged.write_all(&bytes).map_err(save_err)?;
        staged.flush().map_err(save_err)?;
        staged.persist(&dest).map_err(|e| save_err(e.error))?;

        info!(%site_id, path = %dest.display(), bytes = bytes.len(), "archive saved");
        Ok(SavedArchive {
            path: dest,
            bytes: bytes.len() as u64,
        })
    }
}
