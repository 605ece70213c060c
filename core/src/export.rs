// Static project export

use crate::compose::push_meta;
use crate::models::{CodeState, ExternalResource};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const INDEX_FILE: &str = "index.html";
pub const STYLES_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";

/// Default download name for the exported archive
pub const ARCHIVE_FILE_NAME: &str = "playground.zip";

const EXPORT_TITLE: &str = "Code Playground Export";

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("アーカイブの作成に失敗しました: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("アーカイブへの書き込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),
}

/// A named text file inside the exported bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub name: &'static str,
    pub content: String,
}

/// The three files of an exported project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBundle {
    pub entries: Vec<BundleEntry>,
}

impl ProjectBundle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.content.as_str())
    }
}

/// Archive encoding capability
pub trait Archiver {
    fn archive(&self, entries: &[BundleEntry]) -> Result<Vec<u8>, ExportError>;
}

/// Deflate-compressed zip archive written in memory
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn archive(&self, entries: &[BundleEntry]) -> Result<Vec<u8>, ExportError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in entries {
            writer.start_file(entry.name, options)?;
            writer.write_all(entry.content.as_bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Choose and fill the exported files
///
/// `index.html` mirrors the preview layout but references `styles.css` and
/// `script.js` instead of inlining them. External stylesheets come before
/// `styles.css` and external scripts before `script.js`.
pub fn build_bundle(code: &CodeState, resources: &[ExternalResource]) -> ProjectBundle {
    let mut index = String::new();

    index.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    push_meta(&mut index, EXPORT_TITLE);
    for resource in resources.iter().filter(|r| r.is_style()) {
        index.push_str(&format!("  <link rel=\"stylesheet\" href=\"{}\">\n", resource.url));
    }
    index.push_str(&format!("  <link rel=\"stylesheet\" href=\"{}\">\n", STYLES_FILE));
    index.push_str("</head>\n<body>\n");
    index.push_str(&code.html);
    index.push('\n');
    for resource in resources.iter().filter(|r| r.is_script()) {
        index.push_str(&format!("  <script src=\"{}\"></script>\n", resource.url));
    }
    index.push_str(&format!("  <script src=\"{}\"></script>\n", SCRIPT_FILE));
    index.push_str("</body>\n</html>\n");

    ProjectBundle {
        entries: vec![
            BundleEntry {
                name: INDEX_FILE,
                content: index,
            },
            BundleEntry {
                name: STYLES_FILE,
                content: code.css.clone(),
            },
            BundleEntry {
                name: SCRIPT_FILE,
                content: code.js.clone(),
            },
        ],
    }
}

/// Build the bundle and encode it with `archiver`
pub fn build_archive<A>(
    code: &CodeState,
    resources: &[ExternalResource],
    archiver: &A,
) -> Result<Vec<u8>, ExportError>
where
    A: Archiver + ?Sized,
{
    let bundle = build_bundle(code, resources);
    let bytes = archiver.archive(&bundle.entries)?;
    tracing::info!(bytes = bytes.len(), resources = resources.len(), "project archive built");
    Ok(bytes)
}
