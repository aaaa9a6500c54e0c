use super::context::{Context, Overrides};
use anyhow::{Context as _, Result};
use serde_json::Value;
use studio_backend::{Backend, SiteInfo};
use studio_core::SiteId;

/// Check that the backend answers
pub async fn health(overrides: &Overrides) -> Result<()> {
    let ctx = Context::load(overrides)?;
    println!("🩺 Checking {}...", ctx.backend.api_base());

    let status = ctx
        .backend
        .health()
        .await
        .map_err(|e| anyhow::anyhow!("Backend unreachable: {}", e.user_message()))?;

    match status.timestamp {
        Some(timestamp) => println!("✅ {} ({})", status.status, timestamp),
        None => println!("✅ {}", status.status),
    }
    Ok(())
}

pub async fn list(overrides: &Overrides) -> Result<()> {
    let ctx = Context::load(overrides)?;
    let listing = ctx
        .backend
        .list_sites()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sites: {}", e.user_message()))?;

    if listing.sites.is_empty() {
        println!("No sites yet. Try: studio chat");
        return Ok(());
    }

    println!("📚 {} site(s)", listing.count.max(listing.sites.len()));
    for site_id in &listing.sites {
        println!("   {}  {}", site_id, ctx.artifacts.preview_url(site_id));
    }
    Ok(())
}

pub async fn show(overrides: &Overrides, site_id: String) -> Result<()> {
    let ctx = Context::load(overrides)?;
    let site_id = SiteId::new(site_id);
    let info = ctx
        .backend
        .site_info(&site_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load site {}: {}", site_id, e.user_message()))?;

    let preview = info
        .preview_url
        .clone()
        .unwrap_or_else(|| ctx.artifacts.preview_url(&info.site_id));
    for line in describe_site(&info, &preview).context("Unexpected site info")? {
        println!("{}", line);
    }
    Ok(())
}

fn text<'a>(config: &'a Value, key: &str) -> Option<&'a str> {
    config.get(key).and_then(Value::as_str)
}

fn describe_site(info: &SiteInfo, preview: &str) -> Option<Vec<String>> {
    let mut lines = vec![format!("🏷️  {}", info.site_id)];

    let config = &info.config;
    if !config.is_null() && !config.is_object() {
        return None;
    }
    if let Some(name) = text(config, "siteName").or_else(|| text(config, "site_name")) {
        lines.push(format!("   Name: {}", name));
    }
    if let Some(description) =
        text(config, "siteDescription").or_else(|| text(config, "site_description"))
    {
        lines.push(format!("   Description: {}", description));
    }
    if let Some(theme) = text(config, "themeType").or_else(|| text(config, "theme_type")) {
        lines.push(format!("   Theme: {}", theme));
    }
    if let Some(status) = &info.status {
        lines.push(format!("   Status: {}", status));
    }
    lines.push(format!("   Preview: {}", preview));

    lines.push(format!("   Content: {} item(s)", info.content.len()));
    for item in &info.content {
        let title = text(item, "title").unwrap_or("(untitled)");
        match text(item, "contentType").or_else(|| text(item, "content_type")) {
            Some(kind) => lines.push(format!("     - {} ({})", title, kind)),
            None => lines.push(format!("     - {}", title)),
        }
    }
    Some(lines)
}
