use super::render::read_input;
use anyhow::{Context, Result};
use std::path::PathBuf;
use studio_core::ClientConfig;
use studio_core::config::{
    BackendConfig, DownloadConfig, client_config_path, load_client_config, save_client_config,
    validate_base_url,
};

/// Keep `current` when the answer is blank or input has ended
fn or_current(input: Option<String>, current: &str) -> String {
    match input {
        Some(input) if !input.is_empty() => input,
        _ => current.to_string(),
    }
}

fn prompt_url(label: &str, field: &str, current: &str) -> Result<String> {
    let value = or_current(read_input(&format!("{} [current: {}]: ", label, current))?, current);
    validate_base_url(&value, field)?;
    Ok(value)
}

/// Set backend and download defaults in ~/.site-studio/config.toml
pub fn run() -> Result<()> {
    println!("🔧 Configuring site studio...\n");

    let path = client_config_path()?;
    let existing = load_client_config(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .unwrap_or_default();

    println!("📋 You'll need:");
    println!("   1. The generation backend URL (where /api/create-from-description lives)");
    println!("   2. The preview server URL (where built sites are hosted under /sites/<id>/)");
    println!("   3. A folder for downloaded archives");
    println!();

    let api_base = prompt_url("Backend URL", "backend.api_base", &existing.backend.api_base)?;
    let preview_base = prompt_url(
        "Preview URL",
        "backend.preview_base",
        &existing.backend.preview_base,
    )?;

    let current_timeout = existing.backend.timeout_secs.to_string();
    let timeout_secs: u64 = or_current(
        read_input(&format!("Request timeout in seconds [current: {}]: ", current_timeout))?,
        &current_timeout,
    )
    .parse()
    .context("Timeout must be a whole number of seconds")?;
    if timeout_secs == 0 {
        anyhow::bail!("Timeout must be at least one second");
    }

    let current_dir = existing.download.dir.display().to_string();
    let dir = or_current(
        read_input(&format!("Download folder [current: {}]: ", current_dir))?,
        &current_dir,
    );

    let config = ClientConfig {
        backend: BackendConfig {
            api_base,
            preview_base,
            timeout_secs,
        },
        download: DownloadConfig {
            dir: PathBuf::from(dir),
        },
    };
    save_client_config(&path, &config)?;

    println!();
    println!("✅ Configuration saved to: {}", path.display());
    println!("   Backend: {}", config.backend.api_base);
    println!("   Previews: {}", config.backend.preview_base);
    println!("   Downloads: {}", config.download.dir.display());
    println!();
    println!("🚀 Ready! Try: studio health");

    Ok(())
}
