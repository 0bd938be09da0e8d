use std::env;

use anyhow::{anyhow, Result};
use formharvest_engine::{ConsoleEncoding, ProgressSink, RunEvent};
use harvest_logging::{harvest_debug, harvest_info};

/// Locale variables in the order POSIX consults them for the character set.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Encoding progress lines must fit: `--encoding` if given, else the locale's codeset.
pub fn resolve_encoding(explicit: Option<&str>) -> Result<ConsoleEncoding> {
    match explicit {
        Some(label) => ConsoleEncoding::for_label(label)
            .ok_or_else(|| anyhow!("unknown encoding label '{label}'")),
        None => Ok(encoding_from_locale(|name| env::var(name).ok())),
    }
}

/// Codeset of the first non-empty locale variable, UTF-8 when none names a known one.
fn encoding_from_locale(lookup: impl Fn(&str) -> Option<String>) -> ConsoleEncoding {
    let locale = LOCALE_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty());
    let detected = locale.as_deref().and_then(codeset).and_then(ConsoleEncoding::for_label);
    harvest_debug!("locale {:?} -> {:?}", locale, detected);
    detected.unwrap_or_default()
}

/// `nb_NO.ISO-8859-1@euro` -> `ISO-8859-1`.
fn codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split('@').next().unwrap_or(rest);
    (!codeset.is_empty()).then_some(codeset)
}

/// Prints the user-facing progress lines on stdout and logs every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn emit(&self, event: RunEvent) {
        harvest_info!("{event}");
        match event {
            RunEvent::FilterApplied { .. } | RunEvent::Skipping { .. } | RunEvent::Fetching { .. } => {
                println!("{event}")
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn locale(vars: &[(&str, &str)]) -> ConsoleEncoding {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        encoding_from_locale(|name| vars.get(name).cloned())
    }

    #[test]
    fn codeset_is_taken_from_the_locale_name() {
        assert_eq!(codeset("nb_NO.UTF-8"), Some("UTF-8"));
        assert_eq!(codeset("de_DE.ISO-8859-15@euro"), Some("ISO-8859-15"));
        assert_eq!(codeset("C"), None);
        assert_eq!(codeset("en_US."), None);
    }

    #[test]
    fn lc_all_wins_over_lang() {
        let encoding = locale(&[("LC_ALL", "nb_NO.ISO-8859-1"), ("LANG", "nb_NO.UTF-8")]);
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn empty_variables_are_skipped() {
        let encoding = locale(&[("LC_ALL", ""), ("LC_CTYPE", "en_US.utf8")]);
        assert_eq!(encoding.name(), "UTF-8");
    }

    #[test]
    fn unknown_or_missing_locale_means_utf8() {
        assert_eq!(locale(&[]).name(), "UTF-8");
        assert_eq!(locale(&[("LANG", "C")]).name(), "UTF-8");
        assert_eq!(locale(&[("LANG", "xx_XX.NOPE")]).name(), "UTF-8");
    }

    #[test]
    fn explicit_label_overrides_locale() {
        assert_eq!(resolve_encoding(Some("cp1252")).unwrap().name(), "windows-1252");
        assert!(resolve_encoding(Some("klingon")).is_err());
    }
}
