use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formharvest_core::SiteConfig;
use harvest_logging::harvest_info;

/// Platform settings: built-in defaults, or a RON file overriding some of them.
pub fn load_site_config(path: Option<&Path>) -> Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read site config {}", path.display()))?;
    let site: SiteConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse site config {}", path.display()))?;
    harvest_info!("Using site config from {:?}", path);
    Ok(site)
}
