use crate::Stats;

/// Wrap fetched report markup in a small document headed by the form's counters.
pub fn render_report(title: &str, stats: &Stats, content: &str) -> String {
    format!(
        r#"<html>
    <head>
        <meta charset="utf-8" />
    </head>
    <body>
        <p>Delivered replies: {answered}</p>
        <p>Commenced replies: {started}</p>
        <p>Number of sent invitations: {invited}</p>
        <hr />
        <h1>{title}</h1>
        {content}
    </body>
</html>
"#,
        answered = stats.answered,
        started = stats.started,
        invited = stats.invited,
        title = escape_text(title),
        content = content,
    )
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
