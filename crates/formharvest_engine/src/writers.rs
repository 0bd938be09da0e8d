use std::io;
use std::path::{Path, PathBuf};

use formharvest_core::{render_report, ArtifactKind, Stats};

use crate::persist::{write_atomic, PersistError};

/// Format-specific persistence into `<out>/{tsv,html,stats}/<stem>.<ext>`.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, kind: ArtifactKind, stem: &str) -> PathBuf {
        self.output_dir
            .join(kind.dir_name())
            .join(kind.file_name(stem))
    }

    /// Tabular export, stored byte for byte as the platform sent it.
    pub fn write_tsv(&self, stem: &str, body: &[u8]) -> Result<PathBuf, PersistError> {
        self.write(ArtifactKind::Tsv, stem, body)
    }

    /// Report markup wrapped in a document headed by the form's counters.
    pub fn write_report(
        &self,
        stem: &str,
        title: &str,
        stats: &Stats,
        body: &str,
    ) -> Result<PathBuf, PersistError> {
        self.write(ArtifactKind::Html, stem, render_report(title, stats, body).as_bytes())
    }

    /// Counters as a flat JSON object.
    pub fn write_stats(&self, stem: &str, stats: &Stats) -> Result<PathBuf, PersistError> {
        let json = serde_json::to_string(stats).map_err(|err| PersistError::Write {
            path: self.path_for(ArtifactKind::Stats, stem),
            source: io::Error::from(err),
        })?;
        self.write(ArtifactKind::Stats, stem, json.as_bytes())
    }

    fn write(&self, kind: ArtifactKind, stem: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let path = self.path_for(kind, stem);
        write_atomic(&path, content)?;
        Ok(path)
    }
}
