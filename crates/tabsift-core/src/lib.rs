pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod project;
pub mod render;
pub mod session;

use config::ExtractOptions;
use error::TabsiftError;
use extraction::PdfExtractor;
use model::{AnalysisSummary, Extraction, GeneratedSheet, SheetStats};
use render::SheetRenderer;
use session::SessionStore;

pub use parsing::extract_table;

/// Extract a table from a PDF without storing anything.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    options: &ExtractOptions,
) -> Result<Extraction, TabsiftError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = extraction::pages_to_text(&pages);
    parsing::extract_table(&text, options)
}

/// First step of the two-step flow: extract a table from document text and
/// keep it in `store` until a sheet is generated from it.
///
/// Returns the new analysis id with the column names, a short preview and
/// the row count, so the caller can pick columns before generating.
pub fn analyze_text(
    text: &str,
    store: &dyn SessionStore,
    options: &ExtractOptions,
) -> Result<AnalysisSummary, TabsiftError> {
    config::validate_options(options)?;
    let ttl = options.session_ttl()?;
    let extraction = parsing::extract_table(text, options)?;
    let table = extraction.table;

    let analysis_id = session::new_analysis_id();
    store.put(&analysis_id, &table, ttl)?;
    tracing::info!(
        analysis_id = %analysis_id,
        strategy = %extraction.strategy,
        rows = table.rows.len(),
        "stored analysis"
    );

    Ok(AnalysisSummary {
        sample_rows: table.rows.iter().take(options.preview_rows).cloned().collect(),
        total_rows: table.rows.len(),
        columns: table.header,
        analysis_id,
        strategy: extraction.strategy,
    })
}

/// Same as [`analyze_text`], with the text pulled out of a PDF first.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    store: &dyn SessionStore,
    options: &ExtractOptions,
) -> Result<AnalysisSummary, TabsiftError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = extraction::pages_to_text(&pages);
    analyze_text(&text, store, options)
}

/// Second step: project a stored analysis onto `selected_columns`, render
/// it, and consume the session.
///
/// The session is only deleted once rendering has succeeded, so a failed
/// render can be retried with the same id.
pub fn generate(
    store: &dyn SessionStore,
    analysis_id: &str,
    selected_columns: &[String],
    renderer: &dyn SheetRenderer,
) -> Result<GeneratedSheet, TabsiftError> {
    if selected_columns.is_empty() {
        return Err(TabsiftError::NoColumnsSelected);
    }

    let table = store
        .get(analysis_id)?
        .ok_or_else(|| TabsiftError::UnknownSession(analysis_id.to_string()))?;

    let projected = project::project(&table, selected_columns)?;
    let bytes = renderer.render(&projected.header, &projected.rows)?;

    store.delete(analysis_id)?;
    tracing::info!(
        analysis_id = %analysis_id,
        columns = projected.header.len(),
        rows = projected.rows.len(),
        "generated sheet"
    );

    let filename = format!(
        "converted_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        renderer.extension()
    );

    Ok(GeneratedSheet {
        bytes,
        filename,
        stats: SheetStats {
            total_rows: projected.rows.len(),
            columns: projected.header.len(),
        },
    })
}
