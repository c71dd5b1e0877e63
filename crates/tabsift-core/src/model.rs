use serde::{Deserialize, Serialize};
use std::fmt;

/// A reconciled table: a header row plus data rows, all cells as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { header, rows }
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Returns true if every data row has exactly as many cells as the header.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.header.len())
    }
}

/// Which tokenizer produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Cells separated by tab characters.
    Tsv,
    /// Cells separated by runs of two or more whitespace characters.
    SpaceRun,
    /// Delimiter-free contact-style lines (name, address, phone).
    SmartSplit,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Tsv => write!(f, "tab-separated"),
            Strategy::SpaceRun => write!(f, "space-aligned"),
            Strategy::SmartSplit => write!(f, "smart split"),
        }
    }
}

/// A table together with how it was extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub table: Table,
    pub strategy: Strategy,
    /// Lines handed to the tokenizer after normalization and strategy selection.
    pub lines_considered: usize,
    /// Tokenized rows dropped because they produced no cells or the wrong width.
    pub rows_discarded: usize,
}

/// What an analyze request echoes back before a sheet is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub analysis_id: String,
    pub columns: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
    pub total_rows: usize,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetStats {
    pub total_rows: usize,
    pub columns: usize,
}

/// A rendered sheet ready to hand back to the caller.
#[derive(Debug, Clone)]
pub struct GeneratedSheet {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub stats: SheetStats,
}
