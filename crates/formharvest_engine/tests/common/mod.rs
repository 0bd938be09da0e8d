#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use formharvest_core::{ArtifactSelection, SiteConfig};
use formharvest_engine::{
    Browser, BrowserCookie, BrowserError, ConsoleEncoding, Credentials, FetchSettings, PageLink,
    ProgressSink, RunConfig, RunEvent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Fill(String, String),
    Click(String),
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub current_url: Option<String>,
    pub actions: Vec<Action>,
    /// Element texts keyed by (page url, selector).
    pub texts: HashMap<(String, String), String>,
    /// Anchor lists keyed by (page url, selector).
    pub links: HashMap<(String, String), Vec<PageLink>>,
    pub failing_selectors: HashSet<String>,
    pub cookies: Vec<BrowserCookie>,
    /// Cookies a page sets when it is loaded.
    pub page_cookies: HashMap<String, Vec<BrowserCookie>>,
    pub close_calls: usize,
}

/// Scripted stand-in for a real browser; clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeBrowser {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, url: &str, selector: &str, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .texts
            .insert((url.to_string(), selector.to_string()), text.to_string());
        self
    }

    pub fn with_links(self, url: &str, selector: &str, links: Vec<PageLink>) -> Self {
        self.state
            .lock()
            .unwrap()
            .links
            .insert((url.to_string(), selector.to_string()), links);
        self
    }

    pub fn with_failing_selector(self, selector: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_selectors
            .insert(selector.to_string());
        self
    }

    pub fn with_cookie(self, name: &str, value: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .cookies
            .push(BrowserCookie::new(name, value));
        self
    }

    pub fn with_cookie_set_by(self, url: &str, name: &str, value: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .page_cookies
            .entry(url.to_string())
            .or_default()
            .push(BrowserCookie::new(name, value));
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                Action::Navigate(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        state.current_url = Some(url.to_string());
        state.actions.push(Action::Navigate(url.to_string()));
        if let Some(set) = state.page_cookies.get(url).cloned() {
            state.cookies.extend(set);
        }
        Ok(())
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.state
            .lock()
            .unwrap()
            .actions
            .push(Action::Fill(selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError> {
        self.state
            .lock()
            .unwrap()
            .actions
            .push(Action::Click(selector.to_string()));
        Ok(())
    }

    async fn read_text(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let state = self.state.lock().unwrap();
        if state.failing_selectors.contains(selector) {
            return Err(BrowserError::Command {
                action: "read text",
                message: "scripted failure".to_string(),
            });
        }
        let url = state.current_url.clone().unwrap_or_default();
        Ok(state.texts.get(&(url, selector.to_string())).cloned())
    }

    async fn read_links(&self, selector: &str) -> Result<Vec<PageLink>, BrowserError> {
        let state = self.state.lock().unwrap();
        let url = state.current_url.clone().unwrap_or_default();
        Ok(state
            .links
            .get(&(url, selector.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn cookies(&self) -> Result<Vec<BrowserCookie>, BrowserError> {
        Ok(self.state.lock().unwrap().cookies.clone())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.state.lock().unwrap().close_calls += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    RunEvent::Skipping { .. }
                        | RunEvent::Fetching { .. }
                        | RunEvent::FilterApplied { .. }
                )
            })
            .map(|event| event.to_string())
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Site pointing every endpoint at a mock server.
pub fn site_for(base: &str) -> SiteConfig {
    SiteConfig {
        login_url: format!("{base}/user/index.html"),
        form_list_url: format!("{base}/user/form/list.html"),
        ..SiteConfig::default()
    }
}

pub fn form_url(base: &str, id: u32) -> String {
    format!("{base}/user/form/preview.html?id={id}")
}

pub fn results_url(base: &str, id: u32) -> String {
    format!("{base}/user/form/results.html?id={id}")
}

pub fn run_config(base: &str, output_dir: &Path) -> RunConfig {
    RunConfig {
        output_dir: output_dir.to_path_buf(),
        filter: None,
        selection: ArtifactSelection::all(),
        credentials: Credentials::new("ola", "hemmelig"),
        console: ConsoleEncoding::utf8(),
        site: site_for(base),
        fetch: FetchSettings {
            redirect_limit: 3,
            ..FetchSettings::default()
        },
    }
}

pub fn init_logging() {
    harvest_logging::initialize_for_tests();
}
