use crate::busy::{Action, BusyFlags};
use crate::error::ActionError;
use crate::notice::{Notice, Notifier};
use studio_backend::{ArtifactResolver, Backend, SavedArchive, archive_file_name};
use studio_core::SiteResult;
use tracing::{info, warn};

/// Guarded archive download shared by both modes. Touches no transcript or
/// session state, so it commutes with content generation.
pub(crate) async fn download_site(
    backend: &dyn Backend,
    artifacts: &ArtifactResolver,
    busy: &BusyFlags,
    notifier: &dyn Notifier,
    site: &SiteResult,
) -> Result<SavedArchive, ActionError> {
    let _guard = busy
        .try_acquire(Action::Download)
        .ok_or(ActionError::Busy(Action::Download))?;

    notifier.notify(Notice::info("Preparing download..."));
    let file_name = archive_file_name(&site.site_name);
    info!(site_id = %site.site_id, %file_name, "downloading archive");

    match artifacts.download(backend, &site.site_id, &file_name).await {
        Ok(saved) => {
            notifier.notify(Notice::success(format!(
                "Download complete: {}",
                saved.path.display()
            )));
            Ok(saved)
        }
        Err(err) => {
            warn!(site_id = %site.site_id, error = %err, "download failed");
            notifier.notify(Notice::error(format!("Download failed: {}", err.user_message())));
            Err(ActionError::Download(err))
        }
    }
}
