use formharvest_core::{Stats, StatsSelectors};
use harvest_logging::harvest_debug;

use crate::Browser;

/// Read the counters on the currently loaded results page.
///
/// Every counter is read independently and falls back to 0; this never fails.
pub async fn read_stats(browser: &dyn Browser, selectors: &StatsSelectors) -> Stats {
    let answered = read_counter(browser, &selectors.answered).await;
    let started = read_counter(browser, &selectors.started).await;
    let invited = read_counter(browser, &selectors.invited).await;
    Stats::from_counters(answered.as_deref(), started.as_deref(), invited.as_deref())
}

async fn read_counter(browser: &dyn Browser, selector: &str) -> Option<String> {
    match browser.read_text(selector).await {
        Ok(text) => text,
        Err(err) => {
            harvest_debug!("counter {selector} unreadable: {err}");
            None
        }
    }
}
