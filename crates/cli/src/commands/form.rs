use super::context::{Context, Overrides};
use super::download::report_archive;
use super::render::TerminalNotifier;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;
use studio_backend::SavedArchive;
use studio_core::parse_site_plan;
use studio_orchestrator::FormOrchestrator;
use tracing::{debug, warn};

/// Create a site from a site plan, generate each content entry for it and
/// download the archive when the plan asks for it.
///
/// A content entry that fails does not stop the remaining ones. The command
/// fails at the end if anything did.
pub async fn run(overrides: &Overrides, plan_path: PathBuf) -> Result<()> {
    println!("🏗️  Building site from plan...");
    println!("   Plan: {}", plan_path.display());

    if !plan_path.exists() {
        anyhow::bail!(
            "Site plan not found: {}\nRun 'studio init <dir>' to create one",
            plan_path.display()
        );
    }
    let plan = parse_site_plan(&plan_path)
        .with_context(|| format!("Failed to parse {}", plan_path.display()))?;

    println!("   ✓ Site: {}", plan.site.site_name);
    println!("   ✓ Theme: {}", plan.site.theme_type);
    println!("   ✓ Sections: {}", plan.site.main_sections.join(", "));
    println!("   ✓ Content entries: {}", plan.content.len());
    println!();

    let ctx = Context::load(overrides)?;
    let form = FormOrchestrator::new(
        ctx.backend.clone(),
        ctx.artifacts,
        Arc::new(TerminalNotifier),
        plan.site.clone(),
    );

    let site = form.create_site().await.context("Site was not created")?;
    println!("   Site ID: {}", site.site_id);
    println!();

    let mut failed = 0;
    for (i, entry) in plan.content.iter().enumerate() {
        println!(
            "📝 [{}/{}] {}: {}",
            i + 1,
            plan.content.len(),
            entry.content_type,
            entry.title
        );
        form.edit_form(|current| *current = entry.clone());
        match form.generate_content().await {
            Ok(item) => println!("   ✓ {}", item.display_title()),
            Err(err) => {
                debug!(error = %err, "content entry failed");
                failed += 1;
            }
        }
    }
    if !plan.content.is_empty() {
        println!();
    }

    if plan.download {
        match form.download().await {
            Ok(saved) => {
                if !report_download(&saved) {
                    failed += 1;
                }
            }
            Err(err) => {
                debug!(error = %err, "download failed");
                failed += 1;
            }
        }
        println!();
    }

    let session = form.session();
    println!("✅ Site ready: {}", site.site_name);
    if let Some(url) = form.preview_url() {
        println!("   🔗 Preview: {}", url);
    }
    println!("   Content: {} generated", session.content_for(&site.site_id).count());
    if failed > 0 {
        anyhow::bail!("{} step(s) failed", failed);
    }

    Ok(())
}

/// Report a saved archive. An unreadable archive is a warning here: the
/// file is already on disk and the rest of the summary still matters.
fn report_download(saved: &SavedArchive) -> bool {
    match report_archive(saved) {
        Ok(()) => true,
        Err(err) => {
            warn!(path = %saved.path.display(), error = %err, "archive summary failed");
            println!("   ⚠️  Saved {} but could not read it: {:#}", saved.path.display(), err);
            false
        }
    }
}
