//! Formharvest core: pure catalog, artifact and URL-derivation logic.
mod artifact;
mod catalog;
mod filename;
mod form;
mod report;
mod site;
mod stats;

pub use artifact::{ArtifactKind, ArtifactSelection};
pub use catalog::{Catalog, FilterOutcome};
pub use filename::sanitize_form_name;
pub use form::{extract_form_id, FormEntry};
pub use report::render_report;
pub use site::{LoginSelectors, SiteConfig, StatsSelectors, UrlRewrite};
pub use stats::{parse_counter, Stats};
