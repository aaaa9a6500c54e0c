use super::render::format_bytes;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use studio_backend::archive::{extract, summarize};
use tempfile::TempDir;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Unpack a downloaded archive into a temporary directory and serve it
/// until interrupted. The directory is removed on exit.
pub async fn run(archive: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting local server...");
    println!("   Archive: {}", archive.display());

    if !archive.exists() {
        anyhow::bail!(
            "Archive does not exist: {}\nRun 'studio download <site-id>' first",
            archive.display()
        );
    }

    let summary = summarize(&archive)
        .with_context(|| format!("{} is not a readable zip archive", archive.display()))?;
    println!(
        "   ✓ {} files ({})",
        summary.files,
        format_bytes(summary.uncompressed_bytes)
    );
    if !summary.has_index {
        println!("   ⚠️  No index.html at the archive root, / will 404");
    }

    let root = TempDir::new().context("Failed to create temporary directory")?;
    extract(&archive, root.path()).context("Failed to extract archive")?;

    let app = site_router(root.path());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Site ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("Server error")?;

    drop(root);
    Ok(())
}

fn site_router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(TraceLayer::new_for_http())
}
