use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const COMPLETION_LOG_FILENAME: &str = "downloaded.txt";

#[derive(Debug, thiserror::Error)]
pub enum CompletionLogError {
    #[error("failed to read completion log {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to append to completion log {path:?}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Append-only record of form ids whose requested artifacts are all on disk.
///
/// One id per line. An id is appended only after every artifact of its
/// form has been written, and the line is synced before `record` returns.
#[derive(Debug)]
pub struct CompletionLog {
    path: PathBuf,
    ids: HashSet<String>,
    /// The file ends without a newline (edited by hand).
    unterminated: bool,
}

impl CompletionLog {
    /// Load the log of `output_dir`; a missing file is an empty log.
    pub fn open(output_dir: &Path) -> Result<Self, CompletionLogError> {
        let path = output_dir.join(COMPLETION_LOG_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(CompletionLogError::Read { path, source }),
        };
        let ids = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        let unterminated = !content.is_empty() && !content.ends_with('\n');
        Ok(Self {
            path,
            ids,
            unterminated,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, form_id: &str) -> bool {
        self.ids.contains(form_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Durably append `form_id`. Recording an id twice is a no-op.
    pub fn record(&mut self, form_id: &str) -> Result<(), CompletionLogError> {
        if self.ids.contains(form_id) {
            return Ok(());
        }
        self.append_line(form_id)
            .map_err(|source| CompletionLogError::Append {
                path: self.path.clone(),
                source,
            })?;
        self.ids.insert(form_id.to_string());
        self.unterminated = false;
        Ok(())
    }

    fn append_line(&self, form_id: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if self.unterminated {
            writeln!(file)?;
        }
        writeln!(file, "{form_id}")?;
        file.flush()?;
        file.sync_data()
    }
}
