use super::context::{Context, Overrides};
use super::render::format_bytes;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use studio_backend::archive::{extract, summarize};
use studio_backend::{SavedArchive, archive_file_name};
use studio_core::SiteId;

/// Download a site's archive by id, outside of any chat or form session
pub async fn run(
    overrides: &Overrides,
    site_id: String,
    name: Option<String>,
    extract_to: Option<PathBuf>,
) -> Result<()> {
    let ctx = Context::load(overrides)?;
    let site_id = SiteId::new(site_id);
    let file_name = archive_file_name(name.as_deref().unwrap_or(site_id.as_str()));

    println!("📦 Downloading {}...", site_id);
    let saved = ctx
        .artifacts
        .download(ctx.backend.as_ref(), &site_id, &file_name)
        .await
        .map_err(|e| anyhow::anyhow!("Download failed: {}", e.user_message()))?;
    report_archive(&saved)?;

    if let Some(dest) = extract_to {
        extract(&saved.path, &dest)
            .with_context(|| format!("Failed to extract into {}", dest.display()))?;
        println!("   ✓ Extracted to: {}", dest.display());
    }

    Ok(())
}

/// Print where an archive landed and what it holds
pub fn report_archive(saved: &SavedArchive) -> Result<()> {
    let summary = summarize(&saved.path)
        .with_context(|| format!("{} is not a readable zip archive", saved.path.display()))?;
    println!("   ✓ Saved: {} ({})", saved.path.display(), format_bytes(saved.bytes));
    println!(
        "   ✓ {} files, {} uncompressed",
        summary.files,
        format_bytes(summary.uncompressed_bytes)
    );
    if !summary.has_index {
        println!("   ⚠️  No index.html at the archive root");
    }
    Ok(())
}
