use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static FORM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=([0-9]{1,10})").expect("form id pattern"));

/// A form as listed on the platform: display name plus its canonical URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub name: String,
    pub url: String,
}

impl FormEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Stable numeric identifier of the form, or `""` when the URL carries none.
    pub fn form_id(&self) -> String {
        extract_form_id(&self.url)
    }
}

/// Extract the digits of the first `id=<digits>` occurrence in `url`.
pub fn extract_form_id(url: &str) -> String {
    FORM_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
