pub mod grid;
pub mod pdftotext;

use crate::error::TabsiftError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TabsiftError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Join all pages into the single newline-separated text the table
/// extractor consumes.
pub fn pages_to_text(pages: &[PageContent]) -> String {
    let mut text = String::new();
    for line in pages.iter().flat_map(|p| p.lines.iter()) {
        text.push_str(line);
        text.push('\n');
    }
    text
}
