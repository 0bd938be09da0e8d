//! Narrow browser-automation capability.
//!
//! The pipeline only needs to navigate, fill and click, read element text,
//! list anchors and read cookies. Anything able to do that can drive a run;
//! `ChromiumBrowser` is the production engine.

mod chromium;

pub use chromium::{BrowserSettings, ChromiumBrowser};

use async_trait::async_trait;

/// A name/value cookie held by the browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
}

impl BrowserCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Visible text and absolute `href` of an anchor on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("no element matches {selector}")]
    ElementNotFound { selector: String },
    #[error("browser {action} failed: {message}")]
    Command {
        action: &'static str,
        message: String,
    },
}

#[async_trait]
pub trait Browser: Send + Sync {
    /// Load `url` and wait for the page to settle.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Type `value` into the element matching `selector`.
    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError>;

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError>;

    /// Text of the first element matching `selector`, `None` when absent.
    async fn read_text(&self, selector: &str) -> Result<Option<String>, BrowserError>;

    /// Every anchor matching `selector`, in document order.
    async fn read_links(&self, selector: &str) -> Result<Vec<PageLink>, BrowserError>;

    async fn cookies(&self) -> Result<Vec<BrowserCookie>, BrowserError>;

    /// Release the browser. Called exactly once at the end of a run.
    async fn close(&mut self) -> Result<(), BrowserError>;
}
