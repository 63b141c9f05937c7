use std::fmt::Write;

use counterview_core::{AppViewModel, LinkTarget};

/// Standalone HTML page for a settled result.
pub fn render_document(view: &AppViewModel) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Counterview</title>\n</head>\n<body>\n",
    );

    if let Some(summary) = &view.summary {
        let _ = writeln!(html, "<h2>Summary</h2>\n<p>{}</p>", escape(summary));
        html.push_str("<h2>Related articles</h2>\n<ol>\n");
        for link in &view.links {
            let target = match link.target {
                LinkTarget::NewContext => " target=\"_blank\" rel=\"noopener noreferrer\"",
            };
            let _ = writeln!(
                html,
                "<li><a href=\"{href}\"{target}>{text}</a></li>",
                href = escape(&link.href),
                text = escape(&link.href),
            );
        }
        html.push_str("</ol>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
