use std::path::PathBuf;

use formharvest_core::{ArtifactSelection, SiteConfig};
use harvest_logging::{harvest_info, harvest_warn};

use crate::bridge::bridge_session;
use crate::catalog_cache::discover_or_load;
use crate::login::login;
use crate::persist::ensure_output_dir;
use crate::{
    Browser, CompletionLog, ConsoleEncoding, Credentials, FetchSettings, Orchestrator,
    ProgressSink, ReqwestFetcher, RunError, RunEvent, RunSummary,
};

/// Everything a run needs, resolved up front by the caller.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub filter: Option<String>,
    pub selection: ArtifactSelection,
    pub credentials: Credentials,
    pub console: ConsoleEncoding,
    pub site: SiteConfig,
    pub fetch: FetchSettings,
}

/// Login, load the catalog, bridge the session, filter the catalog and download.
pub async fn run(
    browser: &mut dyn Browser,
    config: &RunConfig,
    sink: &dyn ProgressSink,
) -> Result<RunSummary, RunError> {
    ensure_output_dir(&config.output_dir).map_err(RunError::OutputDir)?;
    let mut completion = CompletionLog::open(&config.output_dir)?;
    harvest_info!(
        "{} forms already recorded in {:?}",
        completion.len(),
        completion.path()
    );

    login(browser, &config.site, &config.credentials).await?;

    let loaded = discover_or_load(browser, &config.site, &config.output_dir).await?;

    // After discovery, so cookies set by the list page travel too.
    let fetcher = ReqwestFetcher::new(&config.fetch)
        .map_err(|err| RunError::from_fetch(&config.site.form_list_url, err))?;
    bridge_session(&*browser, fetcher.cookie_jar(), &config.site.form_list_url).await?;

    sink.emit(RunEvent::CatalogReady {
        forms: loaded.catalog.len(),
        from_cache: loaded.from_cache,
    });

    let catalog = match config.filter.as_deref() {
        Some(needle) => {
            let outcome = loaded.catalog.filter(Some(needle));
            sink.emit(RunEvent::FilterApplied {
                matched: outcome.matched,
                total: outcome.total,
            });
            outcome.catalog
        }
        None => loaded.catalog,
    };

    let mut orchestrator = Orchestrator::new(
        browser,
        &fetcher,
        &config.site,
        &config.output_dir,
        config.console,
        sink,
    );
    let summary = orchestrator
        .run(&catalog, &mut completion, config.selection)
        .await?;
    harvest_info!("Run finished: {:?}", summary);
    Ok(summary)
}

/// [`run`], then close the browser whatever the outcome.
///
/// A close failure is logged and never replaces the run's own result.
pub async fn run_and_close<B: Browser>(
    mut browser: B,
    config: &RunConfig,
    sink: &dyn ProgressSink,
) -> Result<RunSummary, RunError> {
    let outcome = run(&mut browser, config, sink).await;
    if let Err(err) = browser.close().await {
        harvest_warn!("Failed to close browser: {err}");
    }
    outcome
}
