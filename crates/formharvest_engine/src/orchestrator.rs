use std::path::Path;

use formharvest_core::{
    sanitize_form_name, ArtifactKind, ArtifactSelection, Catalog, FormEntry, SiteConfig,
};
use harvest_logging::{harvest_debug, harvest_warn};

use crate::decode::decode_body;
use crate::stats::read_stats;
use crate::writers::ArtifactWriter;
use crate::{
    Browser, CompletionLog, ConsoleEncoding, FetchOutput, Fetcher, ProgressSink, RunError, RunEvent,
    RunSummary,
};

/// Sequential per-form download loop.
///
/// For every catalog entry not yet in the completion log: read the stats
/// from the results page, fetch and write each requested artifact, then
/// record the form id. The id is the durability boundary; a crash before it
/// only costs the in-flight form.
pub struct Orchestrator<'a> {
    browser: &'a mut dyn Browser,
    fetcher: &'a dyn Fetcher,
    site: &'a SiteConfig,
    writer: ArtifactWriter,
    console: ConsoleEncoding,
    sink: &'a dyn ProgressSink,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        browser: &'a mut dyn Browser,
        fetcher: &'a dyn Fetcher,
        site: &'a SiteConfig,
        output_dir: &Path,
        console: ConsoleEncoding,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            browser,
            fetcher,
            site,
            writer: ArtifactWriter::new(output_dir),
            console,
            sink,
        }
    }

    pub async fn run(
        &mut self,
        catalog: &Catalog,
        log: &mut CompletionLog,
        selection: ArtifactSelection,
    ) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();
        for entry in catalog {
            summary.considered += 1;
            let form_id = entry.form_id();
            self.ensure_renderable(entry, &form_id)?;

            if !form_id.is_empty() && log.contains(&form_id) {
                self.sink.emit(RunEvent::Skipping {
                    name: entry.name.clone(),
                    form_id,
                });
                summary.skipped += 1;
                continue;
            }

            self.sink.emit(RunEvent::Fetching {
                name: entry.name.clone(),
                form_id: form_id.clone(),
            });
            self.download(entry, selection).await?;
            summary.downloaded += 1;

            if form_id.is_empty() {
                harvest_warn!(
                    "'{}' has no form id in {}; it is not recorded and will be fetched again",
                    entry.name,
                    entry.url
                );
                summary.unidentified += 1;
                continue;
            }
            log.record(&form_id)?;
            self.sink.emit(RunEvent::Completed { form_id });
        }
        Ok(summary)
    }

    /// The terminal cannot show this name; stop rather than print garbage.
    fn ensure_renderable(&self, entry: &FormEntry, form_id: &str) -> Result<(), RunError> {
        if self.console.can_render(&entry.name) {
            return Ok(());
        }
        Err(RunError::UnrenderableName {
            form_id: form_id.to_string(),
            name: entry.name.clone(),
            encoding: self.console.name(),
            rendered: self.console.render_lossy(&entry.name),
        })
    }

    async fn download(
        &mut self,
        entry: &FormEntry,
        selection: ArtifactSelection,
    ) -> Result<(), RunError> {
        let results_url = self.site.results_url(&entry.url);
        self.browser.navigate(&results_url).await?;
        let stats = read_stats(&*self.browser, &self.site.stats).await;
        harvest_debug!("stats for {}: {:?}", entry.name, stats);

        let stem = sanitize_form_name(&entry.name);
        for kind in selection.kinds() {
            let written = match kind {
                ArtifactKind::Tsv => {
                    let body = self.fetch(&self.site.export_url(&entry.url)).await?;
                    self.writer.write_tsv(&stem, &body.bytes)
                }
                ArtifactKind::Html => {
                    let body = self.fetch_report(&self.site.report_url(&entry.url)).await?;
                    self.writer.write_report(&stem, &entry.name, &stats, &body)
                }
                ArtifactKind::Stats => self.writer.write_stats(&stem, &stats),
            };
            let path = written.map_err(|source| RunError::Persist { kind, source })?;
            self.sink.emit(RunEvent::ArtifactWritten { kind, path });
        }
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<FetchOutput, RunError> {
        self.fetcher
            .fetch(url)
            .await
            .map_err(|err| RunError::from_fetch(url, err))
    }

    /// Report markup as text; malformed bytes are replaced, never fatal.
    async fn fetch_report(&self, url: &str) -> Result<String, RunError> {
        let output = self.fetch(url).await?;
        let decoded = decode_body(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_replacements {
            harvest_warn!(
                "{url} is not valid {}; malformed bytes were replaced",
                decoded.encoding.name()
            );
        }
        Ok(decoded.text)
    }
}
