use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use formharvest_core::{Catalog, FormEntry, SiteConfig};
use harvest_logging::{harvest_info, harvest_warn};
use serde::{Deserialize, Serialize};

use crate::persist::{write_atomic, PersistError};
use crate::{Browser, BrowserError};

pub const CATALOG_FILENAME: &str = "formdata.dat";
pub const CATALOG_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog {path:?} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },
    #[error("catalog {path:?} has version {found}, newest supported is {supported}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
    #[error("failed to serialize catalog: {0}")]
    Serialize(String),
    #[error("failed to write catalog: {0}")]
    Persist(#[from] PersistError),
    #[error("catalog discovery failed: {0}")]
    Browser(#[from] BrowserError),
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    version: u32,
    forms: Catalog,
}

#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Catalog for this run and whether it came from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub from_cache: bool,
}

pub fn catalog_path(output_dir: &Path) -> PathBuf {
    output_dir.join(CATALOG_FILENAME)
}

/// Read the persisted catalog; `None` when no file exists yet.
pub fn load_catalog(output_dir: &Path) -> Result<Option<Catalog>, CatalogError> {
    let path = catalog_path(output_dir);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(CatalogError::Read { path, source }),
    };

    let probe: VersionProbe = ron::from_str(&content).map_err(|err| CatalogError::Corrupt {
        path: path.clone(),
        message: err.to_string(),
    })?;
    if probe.version > CATALOG_VERSION {
        return Err(CatalogError::UnsupportedVersion {
            path,
            found: probe.version,
            supported: CATALOG_VERSION,
        });
    }

    let file: CatalogFile = ron::from_str(&content).map_err(|err| CatalogError::Corrupt {
        path: path.clone(),
        message: err.to_string(),
    })?;
    Ok(Some(file.forms))
}

pub fn save_catalog(output_dir: &Path, catalog: &Catalog) -> Result<PathBuf, CatalogError> {
    let file = CatalogFile {
        version: CATALOG_VERSION,
        forms: catalog.clone(),
    };
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&file, pretty)
        .map_err(|err| CatalogError::Serialize(err.to_string()))?;
    let path = catalog_path(output_dir);
    write_atomic(&path, content.as_bytes())?;
    Ok(path)
}

/// Scrape the form list page of the logged-in session.
pub async fn discover_catalog(
    browser: &mut dyn Browser,
    site: &SiteConfig,
) -> Result<Catalog, BrowserError> {
    browser.navigate(&site.form_list_url).await?;
    let links = browser.read_links(&site.form_link_selector).await?;
    Ok(links
        .into_iter()
        .map(|link| FormEntry::new(link.text, link.href))
        .collect::<Vec<_>>()
        .into())
}

/// Return the cached catalog for `output_dir`, discovering and caching it on first use.
///
/// An empty cached catalog counts as missing.
pub async fn discover_or_load(
    browser: &mut dyn Browser,
    site: &SiteConfig,
    output_dir: &Path,
) -> Result<CatalogLoad, CatalogError> {
    if let Some(catalog) = load_catalog(output_dir)? {
        if !catalog.is_empty() {
            harvest_info!(
                "Loaded {} forms from {:?}",
                catalog.len(),
                catalog_path(output_dir)
            );
            return Ok(CatalogLoad {
                catalog,
                from_cache: true,
            });
        }
        harvest_warn!("Cached catalog is empty; discovering forms again");
    }

    let catalog = discover_catalog(browser, site).await?;
    if catalog.is_empty() {
        harvest_warn!("No forms found on {}; was the login accepted?", site.form_list_url);
    }
    let path = save_catalog(output_dir, &catalog)?;
    harvest_info!("Discovered {} forms, cached at {:?}", catalog.len(), path);
    Ok(CatalogLoad {
        catalog,
        from_cache: false,
    })
}
