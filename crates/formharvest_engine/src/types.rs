use std::fmt;
use std::path::PathBuf;

use formharvest_core::ArtifactKind;

/// Progress notifications emitted while a run advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    CatalogReady {
        forms: usize,
        from_cache: bool,
    },
    FilterApplied {
        matched: usize,
        total: usize,
    },
    Skipping {
        name: String,
        form_id: String,
    },
    Fetching {
        name: String,
        form_id: String,
    },
    ArtifactWritten {
        kind: ArtifactKind,
        path: PathBuf,
    },
    Completed {
        form_id: String,
    },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::CatalogReady { forms, from_cache } => {
                let origin = if *from_cache { "cache" } else { "platform" };
                write!(f, "Catalog has {forms} forms (from {origin})")
            }
            RunEvent::FilterApplied { matched, total } => {
                write!(f, "Filter matched {matched} of {total} forms")
            }
            RunEvent::Skipping { name, form_id } => write!(f, "Skipping {name} (id={form_id})"),
            RunEvent::Fetching { name, form_id } => write!(f, "Fetching {name} (id={form_id})"),
            RunEvent::ArtifactWritten { kind, path } => {
                write!(f, "Wrote {kind} to {}", path.display())
            }
            RunEvent::Completed { form_id } => write!(f, "Completed id={form_id}"),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Sink that only forwards events to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: RunEvent) {
        harvest_logging::harvest_info!("{event}");
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub considered: usize,
    pub downloaded: usize,
    pub skipped: usize,
    /// Downloaded entries without an identifier; never recorded as complete.
    pub unidentified: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
