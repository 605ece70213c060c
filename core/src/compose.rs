// Preview document composition

use crate::models::{CodeState, ExternalResource};

/// Title of the composed preview document
pub const PREVIEW_TITLE: &str = "Preview";

/// Build the full preview document from the fragments and external resources
///
/// Layout, in order:
/// - head with charset/viewport metadata and a fixed title
/// - one `<link>` per style resource (registry order), then the inline CSS
/// - body with the HTML fragment
/// - one `<script src>` per script resource (registry order), then the inline JS
///
/// Fragment and URL text is interpolated as-is, no escaping.
pub fn compose(code: &CodeState, resources: &[ExternalResource]) -> String {
    let mut doc = String::with_capacity(code.html.len() + code.css.len() + code.js.len() + 512);

    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    push_meta(&mut doc, PREVIEW_TITLE);
    for resource in resources.iter().filter(|r| r.is_style()) {
        doc.push_str(&format!("  <link rel=\"stylesheet\" href=\"{}\">\n", resource.url));
    }
    doc.push_str("  <style>\n");
    doc.push_str(&code.css);
    doc.push_str("\n  </style>\n</head>\n<body>\n");
    doc.push_str(&code.html);
    doc.push('\n');
    for resource in resources.iter().filter(|r| r.is_script()) {
        doc.push_str(&format!("  <script src=\"{}\"></script>\n", resource.url));
    }
    doc.push_str("  <script>\n");
    doc.push_str(&code.js);
    doc.push_str("\n  </script>\n</body>\n</html>\n");

    doc
}

pub(crate) fn push_meta(doc: &mut String, title: &str) {
    doc.push_str("  <meta charset=\"UTF-8\">\n");
    doc.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str(&format!("  <title>{}</title>\n", title));
}
