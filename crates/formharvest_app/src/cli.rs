use std::path::PathBuf;

use clap::Parser;
use formharvest_core::ArtifactSelection;
use formharvest_engine::BrowserSettings;
use harvest_logging::LevelFilter;

/// Download survey exports, reports and response counters, resuming where the last run stopped.
#[derive(Debug, Parser)]
#[command(name = "formharvest", version)]
#[command(about = "Download survey results from nettskjema", long_about = None)]
pub struct Args {
    /// Directory receiving the catalog, the completion log and all artifacts.
    #[arg(short, long, default_value = "./downloads")]
    pub out: PathBuf,

    /// Only process forms whose name contains this text (case-sensitive).
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Login name; prompted for when omitted.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password; prompted for without echo when omitted.
    #[arg(short, long)]
    pub password: Option<String>,

    /// Download the tab-separated export.
    #[arg(long)]
    pub tsv: bool,

    /// Download the rendered report.
    #[arg(long)]
    pub html: bool,

    /// Save the response counters as JSON.
    #[arg(long)]
    pub stats: bool,

    /// Encoding of this terminal, e.g. `utf-8` or `windows-1252`. Detected from the locale when omitted.
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// RON file overriding platform URLs and page selectors.
    #[arg(long, value_name = "FILE")]
    pub site: Option<PathBuf>,

    /// Chrome or Chromium executable to drive.
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Show the browser window.
    #[arg(long)]
    pub headed: bool,

    /// Print debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Requested kinds; no kind flag means all of them.
    pub fn selection(&self) -> ArtifactSelection {
        ArtifactSelection::from_flags(self.tsv, self.html, self.stats)
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            executable: self.chrome.clone(),
            headless: !self.headed,
            ..BrowserSettings::default()
        }
    }

    pub fn terminal_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}
