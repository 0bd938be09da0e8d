use serde::{Deserialize, Serialize};

/// Everything that ties the pipeline to one survey platform.
///
/// Defaults target nettskjema.uio.no; any field can be overridden from a
/// RON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub login_url: String,
    pub form_list_url: String,
    pub login: LoginSelectors,
    /// Selector for the anchors naming each form on the list page.
    pub form_link_selector: String,
    pub stats: StatsSelectors,
    /// Path segment of a catalog URL that names the page action.
    pub action_marker: String,
    pub results: UrlRewrite,
    pub export: UrlRewrite,
    pub report: UrlRewrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSelectors {
    pub username: String,
    pub password: String,
    pub submit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSelectors {
    pub answered: String,
    pub started: String,
    pub invited: String,
}

/// Replacement for the action marker plus a query suffix appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlRewrite {
    pub action: String,
    pub query_suffix: String,
}

impl UrlRewrite {
    pub fn new(action: impl Into<String>, query_suffix: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            query_suffix: query_suffix.into(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            login_url: "https://nettskjema.uio.no/user/index.html".to_string(),
            form_list_url: "https://nettskjema.uio.no/user/form/list.html".to_string(),
            login: LoginSelectors::default(),
            form_link_selector: ".forms .formName".to_string(),
            stats: StatsSelectors::default(),
            action_marker: "preview".to_string(),
            results: UrlRewrite::new("results", ""),
            export: UrlRewrite::new("download", "&encoding=utf-8"),
            report: UrlRewrite::new("report/web", "&include-open=1&remove-profile=1"),
        }
    }
}

impl Default for LoginSelectors {
    fn default() -> Self {
        Self {
            username: "#username".to_string(),
            password: "#password".to_string(),
            submit: "#login-box-form .submit".to_string(),
        }
    }
}

impl Default for StatsSelectors {
    fn default() -> Self {
        Self {
            answered: ".delivered-submissions .number".to_string(),
            started: ".saved-submissions .number".to_string(),
            invited: ".valid-invitations .number".to_string(),
        }
    }
}

impl SiteConfig {
    /// Page showing the response counters of a form.
    pub fn results_url(&self, form_url: &str) -> String {
        self.rewrite(form_url, &self.results)
    }

    /// Tabular export endpoint.
    pub fn export_url(&self, form_url: &str) -> String {
        self.rewrite(form_url, &self.export)
    }

    /// Rendered report endpoint.
    pub fn report_url(&self, form_url: &str) -> String {
        self.rewrite(form_url, &self.report)
    }

    fn rewrite(&self, form_url: &str, rewrite: &UrlRewrite) -> String {
        let mut url = if self.action_marker.is_empty() {
            form_url.to_string()
        } else {
            form_url.replace(&self.action_marker, &rewrite.action)
        };
        url.push_str(&rewrite.query_suffix);
        url
    }
}
