use super::context::{Context, Overrides};
use anyhow::Result;
use studio_core::SiteId;

/// Print where the preview server hosts a site. No request is made.
pub fn run(overrides: &Overrides, site_id: String) -> Result<()> {
    let ctx = Context::load(overrides)?;
    println!("{}", ctx.artifacts.preview_url(&SiteId::new(site_id)));
    Ok(())
}
