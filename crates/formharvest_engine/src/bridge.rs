use harvest_logging::{harvest_debug, harvest_info};
use reqwest::cookie::Jar;
use url::Url;

use crate::{Browser, RunError};

/// Copy the browser session's cookies into the HTTP client's store.
///
/// Only name and value are carried over; each cookie is scoped to the host
/// of `scope_url` with path `/`. Returns the number of cookies installed.
pub async fn bridge_session(
    browser: &dyn Browser,
    jar: &Jar,
    scope_url: &str,
) -> Result<usize, RunError> {
    let scope = Url::parse(scope_url).map_err(|err| RunError::InvalidSiteUrl {
        url: scope_url.to_string(),
        message: err.to_string(),
    })?;
    let cookies = browser.cookies().await?;
    for cookie in &cookies {
        harvest_debug!("bridging cookie {}", cookie.name);
        jar.add_cookie_str(&format!("{}={}; Path=/", cookie.name, cookie.value), &scope);
    }
    harvest_info!(
        "Bridged {} cookies for {}",
        cookies.len(),
        scope.host_str().unwrap_or_default()
    );
    Ok(cookies.len())
}
