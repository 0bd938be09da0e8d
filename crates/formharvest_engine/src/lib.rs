//! Formharvest engine: browser session, HTTP transfer and the resumable download pipeline.
mod bridge;
mod browser;
mod catalog_cache;
mod completion;
mod console;
mod decode;
mod error;
mod fetch;
mod login;
mod orchestrator;
mod persist;
mod pipeline;
mod stats;
mod types;
mod writers;

pub use bridge::bridge_session;
pub use browser::{
    Browser, BrowserCookie, BrowserError, BrowserSettings, ChromiumBrowser, PageLink,
};
pub use catalog_cache::{
    catalog_path, discover_catalog, discover_or_load, load_catalog, save_catalog, CatalogError,
    CatalogLoad, CATALOG_FILENAME, CATALOG_VERSION,
};
pub use completion::{CompletionLog, CompletionLogError, COMPLETION_LOG_FILENAME};
pub use console::ConsoleEncoding;
pub use decode::{decode_body, DecodedText, EncodingSource};
pub use error::RunError;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use login::{login, Credentials};
pub use orchestrator::Orchestrator;
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use pipeline::{run, run_and_close, RunConfig};
pub use stats::read_stats;
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, LogProgressSink, ProgressSink, RunEvent,
    RunSummary,
};
pub use writers::ArtifactWriter;
