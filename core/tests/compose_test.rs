// Preview composition and export bundle tests

use playground_core::*;
use std::io::{Cursor, Read};

fn sample_code() -> CodeState {
    CodeState::new(
        "<h1 id=\"title\">Hi</h1>",
        "h1 { color: tomato; }",
        "document.getElementById('title').textContent = 'Hello';",
    )
}

fn sample_resources() -> Vec<ExternalResource> {
    vec![
        ExternalResource::new("https://cdn.example.com/a.js", ResourceKind::Script),
        ExternalResource::new("https://cdn.example.com/reset.css", ResourceKind::Style),
        ExternalResource::new("https://cdn.example.com/b.js", ResourceKind::Script),
        ExternalResource::new("https://fonts.example.com/css2?family=Inter", ResourceKind::Style),
    ]
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in document", needle))
}

// ==================== compose Tests ====================

#[test]
fn test_compose_is_deterministic() {
    let code = sample_code();
    let resources = sample_resources();

    let first = compose(&code, &resources);
    let second = compose(&code.clone(), &resources.clone());
    assert_eq!(first, second);
}

#[test]
fn test_compose_keeps_registry_order_per_kind() {
    let doc = compose(&sample_code(), &sample_resources());

    let reset = position(&doc, "<link rel=\"stylesheet\" href=\"https://cdn.example.com/reset.css\">");
    let fonts = position(&doc, "<link rel=\"stylesheet\" href=\"https://fonts.example.com/css2?family=Inter\">");
    let style = position(&doc, "<style>");
    let body = position(&doc, "<body>");
    let a = position(&doc, "<script src=\"https://cdn.example.com/a.js\"></script>");
    let b = position(&doc, "<script src=\"https://cdn.example.com/b.js\"></script>");
    let inline = position(&doc, "<script>\n");

    assert!(reset < fonts);
    assert!(fonts < style);
    assert!(style < body);
    assert!(body < a);
    assert!(a < b);
    assert!(b < inline);
}

#[test]
fn test_compose_single_stylesheet_scenario() {
    // https://a.com/x.css を追加した状態
    let resources = vec![ExternalResource::new("https://a.com/x.css", ResourceKind::Style)];
    let doc = compose(&sample_code(), &resources);

    let link = "<link rel=\"stylesheet\" href=\"https://a.com/x.css\">";
    assert_eq!(doc.matches(link).count(), 1);
    assert!(position(&doc, link) < position(&doc, "<style>"));
}

#[test]
fn test_compose_contains_fragments_verbatim() {
    let code = sample_code();
    let doc = compose(&code, &[]);

    assert!(doc.contains(&code.html));
    assert!(doc.contains(&code.css));
    assert!(doc.contains(&code.js));
    assert!(doc.contains("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"));
    assert!(doc.trim_end().ends_with("</html>"));
}

// ==================== Export Tests ====================

#[test]
fn test_bundle_has_three_entries() {
    let code = sample_code();
    let bundle = build_bundle(&code, &sample_resources());

    let names: Vec<_> = bundle.entries.iter().map(|e| e.name).collect();
    assert_eq!(names, vec![INDEX_FILE, STYLES_FILE, SCRIPT_FILE]);
    assert_eq!(bundle.get(STYLES_FILE), Some(code.css.as_str()));
    assert_eq!(bundle.get(SCRIPT_FILE), Some(code.js.as_str()));
}

#[test]
fn test_bundle_index_references_files_instead_of_inlining() {
    let code = sample_code();
    let bundle = build_bundle(&code, &sample_resources());
    let index = bundle.get(INDEX_FILE).unwrap();

    assert!(index.contains(&code.html));
    assert!(!index.contains(&code.css));
    assert!(!index.contains(&code.js));
    assert!(!index.contains("<style>"));

    let reset = position(index, "href=\"https://cdn.example.com/reset.css\"");
    let fonts = position(index, "href=\"https://fonts.example.com/css2?family=Inter\"");
    let styles = position(index, "href=\"styles.css\"");
    let body = position(index, "<body>");
    let a = position(index, "src=\"https://cdn.example.com/a.js\"");
    let b = position(index, "src=\"https://cdn.example.com/b.js\"");
    let script = position(index, "src=\"script.js\"");

    assert!(reset < fonts && fonts < styles && styles < body);
    assert!(body < a && a < b && b < script);
}

#[test]
fn test_zip_archive_contains_bundle_files() {
    let code = sample_code();
    let bytes = build_archive(&code, &[], &ZipArchiver).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 3);

    let mut css = String::new();
    archive.by_name(STYLES_FILE).unwrap().read_to_string(&mut css).unwrap();
    assert_eq!(css, code.css);

    let mut index = String::new();
    archive.by_name(INDEX_FILE).unwrap().read_to_string(&mut index).unwrap();
    assert!(index.contains("<script src=\"script.js\"></script>"));
}

struct FailingArchiver;

impl Archiver for FailingArchiver {
    fn archive(&self, _entries: &[BundleEntry]) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}

#[test]
fn test_archive_failure_propagates() {
    let result = build_archive(&sample_code(), &[], &FailingArchiver);
    assert!(matches!(result, Err(ExportError::Io(_))));
}
