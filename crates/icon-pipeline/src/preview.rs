//! Static HTML page showing every generated icon class

use crate::stylesheet::Stylesheet;
use std::fmt::Write;

/// Render the preview page for `sheet`, linking `stylesheet_href`
#[must_use]
pub fn render(sheet: &Stylesheet, stylesheet_href: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n<title>Icon Preview</title>\n");
    let _ = writeln!(
        out,
        "<link rel=\"stylesheet\" href=\"{}\">",
        escape(stylesheet_href)
    );
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; }\n\
         .preview { display: inline-block; margin: 1em; text-align: center; }\n\
         .preview div { min-width: 16px; min-height: 16px; margin: 0 auto; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    for rule in sheet.rules() {
        let _ = writeln!(
            out,
            "<div class=\"preview\"><div class=\"{}\"></div><code>{}</code></div>",
            escape(rule.class_name()),
            escape(&rule.selector)
        );
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
