pub mod analyze;
pub mod extract;
pub mod generate;
pub mod sweep;

use std::path::{Path, PathBuf};
use tabsift_core::config::{self, ExtractOptions};
use tabsift_core::error::TabsiftError;
use tabsift_core::extraction::pdftotext::PdftotextExtractor;
use tabsift_core::extraction::{pages_to_text, PdfExtractor};
use tabsift_core::session::FileSessionStore;

/// Read document text, running PDFs through pdftotext.
///
/// With `layout_only`, PDF pages are taken as layout text even where their
/// words line up as a table.
pub fn read_input_text(input_file: &Path, layout_only: bool) -> Result<String, TabsiftError> {
    let is_pdf = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    tracing::debug!(path = %input_file.display(), is_pdf, layout_only, "reading input");

    if is_pdf {
        if !PdftotextExtractor::is_available() {
            return Err(TabsiftError::PdftotextNotFound);
        }
        let extractor = if layout_only {
            PdftotextExtractor::layout_only()
        } else {
            PdftotextExtractor::new()
        };
        let pdf_bytes = std::fs::read(input_file)?;
        let pages = extractor.extract_pages(&pdf_bytes)?;
        Ok(pages_to_text(&pages))
    } else {
        Ok(std::fs::read_to_string(input_file)?)
    }
}

pub fn load_options(config: Option<PathBuf>) -> Result<ExtractOptions, TabsiftError> {
    match config {
        Some(path) => config::load_options(&path),
        None => Ok(ExtractOptions::default()),
    }
}

pub fn open_store(store: Option<PathBuf>) -> Result<FileSessionStore, TabsiftError> {
    let dir = store.unwrap_or_else(|| std::env::temp_dir().join("tabsift-sessions"));
    FileSessionStore::open(dir)
}
