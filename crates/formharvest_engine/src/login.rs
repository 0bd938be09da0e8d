use std::fmt;

use formharvest_core::SiteConfig;
use harvest_logging::harvest_info;

use crate::{Browser, BrowserError};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Submit the platform's login form.
///
/// Success is not verified here; a rejected login shows up later as an
/// empty catalog or failing artifact requests.
pub async fn login(
    browser: &mut dyn Browser,
    site: &SiteConfig,
    credentials: &Credentials,
) -> Result<(), BrowserError> {
    harvest_info!("Logging in as {}", credentials.username);
    browser.navigate(&site.login_url).await?;
    browser
        .fill(&site.login.username, &credentials.username)
        .await?;
    browser
        .fill(&site.login.password, &credentials.password)
        .await?;
    browser.click(&site.login.submit).await
}
