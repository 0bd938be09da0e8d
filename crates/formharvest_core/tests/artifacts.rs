use formharvest_core::{
    parse_counter, render_report, sanitize_form_name, ArtifactKind, ArtifactSelection, SiteConfig,
    Stats,
};
use pretty_assertions::assert_eq;

#[test]
fn selection_without_flags_means_all_kinds() {
    let selection = ArtifactSelection::from_flags(false, false, false);
    assert_eq!(selection, ArtifactSelection::all());
    assert_eq!(
        selection.kinds().collect::<Vec<_>>(),
        vec![ArtifactKind::Tsv, ArtifactKind::Html, ArtifactKind::Stats]
    );
}

#[test]
fn selection_iterates_in_fixed_order() {
    let selection = ArtifactSelection::only(&[ArtifactKind::Stats, ArtifactKind::Tsv]);
    assert_eq!(
        selection.kinds().collect::<Vec<_>>(),
        vec![ArtifactKind::Tsv, ArtifactKind::Stats]
    );
    assert!(!selection.contains(ArtifactKind::Html));
}

#[test]
fn kinds_map_to_directories_and_extensions() {
    assert_eq!(ArtifactKind::Tsv.file_name("Survey_A"), "Survey_A.tsv");
    assert_eq!(ArtifactKind::Html.file_name("Survey_A"), "Survey_A.html");
    assert_eq!(ArtifactKind::Stats.file_name("Survey_A"), "Survey_A.json");
    assert_eq!(ArtifactKind::Stats.dir_name(), "stats");
}

#[test]
fn site_urls_rewrite_the_action_segment() {
    let site = SiteConfig::default();
    let url = "https://nettskjema.uio.no/user/form/preview.html?id=42";

    assert_eq!(
        site.results_url(url),
        "https://nettskjema.uio.no/user/form/results.html?id=42"
    );
    assert_eq!(
        site.export_url(url),
        "https://nettskjema.uio.no/user/form/download.html?id=42&encoding=utf-8"
    );
    assert_eq!(
        site.report_url(url),
        "https://nettskjema.uio.no/user/form/report/web.html?id=42&include-open=1&remove-profile=1"
    );
}

#[test]
fn site_config_partial_override_keeps_defaults() {
    let site: SiteConfig = ron::from_str(r#"(login_url: "http://localhost/login")"#).unwrap();
    assert_eq!(site.login_url, "http://localhost/login");
    assert_eq!(site.form_list_url, SiteConfig::default().form_list_url);
    assert_eq!(site.stats, SiteConfig::default().stats);
}

#[test]
fn form_names_become_safe_file_stems() {
    assert_eq!(sanitize_form_name("Survey A"), "Survey_A");
    assert_eq!(sanitize_form_name("My: Title?/Bad"), "My_Title_Bad");
    assert_eq!(sanitize_form_name("  ..  "), "untitled");
    assert_eq!(sanitize_form_name("CON"), "CON_");
    assert_eq!(sanitize_form_name("Emneevaluering høst"), "Emneevaluering_høst");
}

#[test]
fn long_names_are_truncated_on_char_boundary() {
    let name = "ø".repeat(60);
    let stem = sanitize_form_name(&name);
    assert!(stem.len() <= 80);
    assert_eq!(stem.chars().count(), 40);
}

#[test]
fn counters_default_to_zero_independently() {
    let stats = Stats::from_counters(Some(" 12 "), None, Some("n/a"));
    assert_eq!(
        stats,
        Stats {
            answered: 12,
            started: 0,
            invited: 0
        }
    );
    assert_eq!(parse_counter(Some("-3")), 0);
    assert_eq!(parse_counter(Some("")), 0);
}

#[test]
fn report_prepends_counters_and_title() {
    let stats = Stats {
        answered: 3,
        started: 5,
        invited: 8,
    };
    let html = render_report("Survey <A>", &stats, "<table><tr><td>x</td></tr></table>");

    assert!(html.contains(r#"<meta charset="utf-8" />"#));
    assert!(html.contains("<p>Delivered replies: 3</p>"));
    assert!(html.contains("<p>Commenced replies: 5</p>"));
    assert!(html.contains("<p>Number of sent invitations: 8</p>"));
    assert!(html.contains("<h1>Survey &lt;A&gt;</h1>"));
    let header = html.find("<h1>").unwrap();
    let body = html.find("<table>").unwrap();
    assert!(header < body);
}
