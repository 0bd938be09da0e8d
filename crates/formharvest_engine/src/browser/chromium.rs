//! Chromium-backed browser using chromiumoxide.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::StreamExt;
use harvest_logging::{harvest_debug, harvest_warn};
use tokio::task::JoinHandle;
use url::Url;

use super::{Browser, BrowserCookie, BrowserError, PageLink};

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Chromium binary; `None` lets chromiumoxide search the usual locations.
    pub executable: Option<PathBuf>,
    pub headless: bool,
    pub window_size: (u32, u32),
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            window_size: (800, 600),
        }
    }
}

pub struct ChromiumBrowser {
    browser: CdpBrowser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumBrowser {
    /// Launch Chromium and open the single tab used for the whole run.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, BrowserError> {
        let (width, height) = settings.window_size;
        let mut builder = BrowserConfig::builder()
            .window_size(width, height)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if let Some(path) = &settings.executable {
            builder = builder.chrome_executable(path);
        }
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (mut browser, mut handler) = CdpBrowser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                let _ = browser.close().await;
                handler.abort();
                return Err(BrowserError::Launch(format!("failed to open tab: {err}")));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn current_url(&self) -> Option<Url> {
        self.page
            .url()
            .await
            .ok()
            .flatten()
            .and_then(|raw| Url::parse(&raw).ok())
    }
}

#[async_trait]
impl Browser for ChromiumBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let navigation = |e: chromiumoxide::error::CdpError| BrowserError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };
        self.page.goto(url).await.map_err(navigation)?;
        self.page.wait_for_navigation().await.map_err(navigation)?;
        Ok(())
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        element
            .click()
            .await
            .map_err(|e| command("focus", e))?
            .type_str(value)
            .await
            .map_err(|e| command("type", e))?;
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        element.click().await.map_err(|e| command("click", e))?;
        // Let a submit-triggered navigation finish before the next command.
        if let Err(err) = self.page.wait_for_navigation().await {
            harvest_debug!("no navigation settled after clicking {selector}: {err}");
        }
        Ok(())
    }

    async fn read_text(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let element = match self.page.find_element(selector).await {
            Ok(element) => element,
            Err(err) => {
                harvest_debug!("{selector} not found: {err}");
                return Ok(None);
            }
        };
        element
            .inner_text()
            .await
            .map_err(|e| command("read text", e))
    }

    async fn read_links(&self, selector: &str) -> Result<Vec<PageLink>, BrowserError> {
        let base = self.current_url().await;
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| command("query", e))?;

        let mut links = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element
                .inner_text()
                .await
                .map_err(|e| command("read text", e))?
                .unwrap_or_default()
                .trim()
                .to_string();
            let href = element
                .attribute("href")
                .await
                .map_err(|e| command("read href", e))?;
            match href.and_then(|raw| resolve_href(&raw, base.as_ref())) {
                Some(href) => links.push(PageLink { text, href }),
                None => harvest_warn!("Skipping '{text}': element has no usable href"),
            }
        }
        Ok(links)
    }

    async fn cookies(&self) -> Result<Vec<BrowserCookie>, BrowserError> {
        let cookies = self
            .page
            .get_cookies()
            .await
            .map_err(|e| command("read cookies", e))?;
        Ok(cookies
            .into_iter()
            .map(|cookie| BrowserCookie::new(cookie.name, cookie.value))
            .collect())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        let closed = self.browser.close().await.map(|_| ());
        if let Some(problem) = exit_problem(self.browser.wait().await) {
            harvest_debug!("{problem}");
        }
        self.handler.abort();
        closed.map_err(|e| command("close", e))
    }
}

fn command(action: &'static str, err: chromiumoxide::error::CdpError) -> BrowserError {
    BrowserError::Command {
        action,
        message: err.to_string(),
    }
}

/// Debug note for a Chromium process that did not exit cleanly.
fn exit_problem(waited: std::io::Result<Option<std::process::ExitStatus>>) -> Option<String> {
    match waited {
        Err(err) => Some(format!("waiting for chromium to exit failed: {err}")),
        Ok(Some(status)) if !status.success() => Some(format!("chromium exited with {status}")),
        Ok(_) => None,
    }
}

fn resolve_href(raw: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    base.and_then(|base| base.join(trimmed).ok()).map(Into::into)
}
