use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TabsiftError {
    #[error("no text found in input")]
    EmptyInput,

    #[error("no table data found: {0}")]
    NoTableData(String),

    #[error("analysis '{0}' not found or expired. Please analyze the document again.")]
    UnknownSession(String),

    #[error("column '{0}' appears more than once in the header")]
    AmbiguousColumn(String),

    #[error("no columns selected")]
    NoColumnsSelected,

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load options from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    ConfigInvalid(String),

    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("failed to render workbook: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
