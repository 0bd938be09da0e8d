use formharvest_core::ArtifactKind;

use crate::persist::PersistError;
use crate::{BrowserError, CatalogError, CompletionLogError, FailureKind, FetchError};

/// Fatal outcome of a run. Each variant ends the run; the completion log
/// lets a rerun pick up where this one stopped.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("form id={form_id} has a name that {encoding} cannot display: {rendered}")]
    UnrenderableName {
        form_id: String,
        name: String,
        encoding: &'static str,
        /// The name as the terminal encoding shows it.
        rendered: String,
    },
    #[error("too many redirects fetching {url}: {message}")]
    TooManyRedirects { url: String, message: String },
    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("invalid site url {url}: {message}")]
    InvalidSiteUrl { url: String, message: String },
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    CompletionLog(#[from] CompletionLogError),
    #[error("output directory unusable: {0}")]
    OutputDir(#[source] PersistError),
    #[error("failed to write {kind} artifact: {source}")]
    Persist {
        kind: ArtifactKind,
        #[source]
        source: PersistError,
    },
}

impl RunError {
    /// Classify a transport failure; exhausted redirects get their own variant.
    pub fn from_fetch(url: &str, err: FetchError) -> Self {
        match err.kind {
            FailureKind::RedirectLimitExceeded => RunError::TooManyRedirects {
                url: url.to_string(),
                message: err.message,
            },
            _ => RunError::Fetch {
                url: url.to_string(),
                source: err,
            },
        }
    }

    /// Short heading for the fatal error block.
    pub fn label(&self) -> &'static str {
        match self {
            RunError::UnrenderableName { .. } => "Unrenderable form name",
            RunError::TooManyRedirects { .. } => "Too many redirects",
            RunError::Fetch { .. } => "Download failed",
            RunError::InvalidSiteUrl { .. } => "Invalid site configuration",
            RunError::Browser(_) => "Browser failure",
            RunError::Catalog(_) => "Form catalog",
            RunError::CompletionLog(_) => "Completion log",
            RunError::OutputDir(_) => "Output directory",
            RunError::Persist { .. } => "Writing output",
        }
    }

    /// What the user can do about it.
    pub fn remediation(&self) -> String {
        match self {
            RunError::UnrenderableName {
                form_id, rendered, ..
            } => format!(
                "The name of form id={form_id} shows as \"{rendered}\" in this terminal.\n\
                 Switch the terminal to UTF-8 (run `chcp 65001` on Windows, use a UTF-8 \
                 locale elsewhere) or pass `--encoding utf-8`, then rerun the same command."
            ),
            RunError::TooManyRedirects { .. } => "The platform sometimes refuses rapid requests. \
                 Wait a little while and continue by rerunning the same command; \
                 completed forms are skipped."
                .to_string(),
            RunError::Fetch { .. } => {
                "Check the network connection and that the login was accepted, then rerun \
                 the same command; completed forms are skipped."
                    .to_string()
            }
            RunError::InvalidSiteUrl { .. } => {
                "Fix the URLs in the file given to `--site`.".to_string()
            }
            RunError::Browser(_) => "Check that Chrome or Chromium is installed, or point \
                 `--chrome` at its executable, then rerun the same command."
                .to_string(),
            RunError::Catalog(CatalogError::Corrupt { path, .. }) => format!(
                "Delete {} and rerun; the form list will be fetched again.",
                path.display()
            ),
            RunError::Catalog(CatalogError::UnsupportedVersion { path, .. }) => format!(
                "{} was written by a newer formharvest. Upgrade, or delete the file to \
                 fetch the form list again.",
                path.display()
            ),
            RunError::Catalog(_) => {
                "Check that the output directory is readable and writable, then rerun."
                    .to_string()
            }
            RunError::CompletionLog(_) | RunError::OutputDir(_) | RunError::Persist { .. } => {
                "Check that the output directory is writable and the disk is not full, then \
                 rerun the same command."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_failure_advises_waiting_and_rerunning() {
        let err = RunError::from_fetch(
            "https://forms.example.org/user/form/download.html?id=1",
            FetchError::new(FailureKind::RedirectLimitExceeded, "loop"),
        );
        assert_eq!(err.label(), "Too many redirects");
        assert!(err.remediation().starts_with("The platform sometimes refuses rapid requests."));
    }

    #[test]
    fn unrenderable_name_shows_rendered_form() {
        let err = RunError::UnrenderableName {
            form_id: "2".to_string(),
            name: "Skjema ✓".to_string(),
            encoding: "windows-1252",
            rendered: "Skjema &#10003;".to_string(),
        };
        let advice = err.remediation();
        assert!(advice.contains("form id=2 shows as \"Skjema &#10003;\""));
        assert!(advice.contains("chcp 65001"));
        assert!(advice.contains("--encoding utf-8"));
    }

    #[test]
    fn other_fetch_failures_keep_their_kind() {
        let err = RunError::from_fetch("u", FetchError::new(FailureKind::HttpStatus(502), "bad"));
        assert!(matches!(
            err,
            RunError::Fetch {
                source: FetchError {
                    kind: FailureKind::HttpStatus(502),
                    ..
                },
                ..
            }
        ));
    }
}
