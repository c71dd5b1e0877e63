pub mod normalize;
pub mod reconcile;
pub mod smart;
pub mod strategy;
pub mod tokenize;

use crate::config::ExtractOptions;
use crate::error::TabsiftError;
use crate::model::{Extraction, Strategy, Table};
use normalize::normalize_lines;
use reconcile::reconcile;
use smart::{infer_smart_header, split_smart_line};
use strategy::select_strategy;
use tokenize::{split_space_run, split_tsv};

/// Infer a table from the extracted text of a document.
///
/// Exactly one strategy runs per call; if it yields nothing the call fails
/// rather than trying the next one.
pub fn extract_table(text: &str, options: &ExtractOptions) -> Result<Extraction, TabsiftError> {
    if text.trim().is_empty() {
        return Err(TabsiftError::EmptyInput);
    }

    let lines = normalize_lines(text, options.min_line_chars);
    let selection = select_strategy(&lines);
    let lines_considered = selection.lines.len();

    tracing::debug!(
        strategy = %selection.strategy,
        lines = lines_considered,
        dropped_short = text.lines().count().saturating_sub(lines.len()),
        "selected tokenizer"
    );

    let (table, rows_discarded) = match selection.strategy {
        Strategy::Tsv => tokenize_and_reconcile(&selection.lines, split_tsv)?,
        Strategy::SpaceRun => tokenize_and_reconcile(&selection.lines, split_space_run)?,
        Strategy::SmartSplit => smart_table(&selection.lines, options.smart_min_line_chars)?,
    };

    tracing::debug!(
        columns = table.width(),
        rows = table.rows.len(),
        discarded = rows_discarded,
        "extracted table"
    );

    Ok(Extraction {
        table,
        strategy: selection.strategy,
        lines_considered,
        rows_discarded,
    })
}

fn tokenize_and_reconcile(
    lines: &[&str],
    split: fn(&str) -> Option<Vec<String>>,
) -> Result<(Table, usize), TabsiftError> {
    let rows: Vec<Vec<String>> = lines.iter().filter_map(|l| split(l)).collect();
    let empty_lines = lines.len() - rows.len();

    if rows.is_empty() {
        return Err(TabsiftError::NoTableData(
            "no delimited rows found in text".into(),
        ));
    }

    let (table, discarded) = reconcile(rows)?;
    Ok((table, discarded + empty_lines))
}

fn smart_table(lines: &[&str], min_chars: usize) -> Result<(Table, usize), TabsiftError> {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .filter_map(|l| split_smart_line(l, min_chars))
        .collect();

    let first = rows.first().ok_or_else(|| {
        TabsiftError::NoTableData("could not extract data from text".into())
    })?;
    let header = infer_smart_header(first);
    let discarded = lines.len() - rows.len();

    Ok((Table::new(header, rows), discarded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn opts() -> ExtractOptions {
        ExtractOptions::default()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tsv_scenario() {
        let text = "Name\tAge\tCity\nAlice\t30\tOslo\nBob\t25\tGoa\n";
        let ex = extract_table(text, &opts()).unwrap();
        assert_eq!(ex.strategy, Strategy::Tsv);
        assert_eq!(ex.table.header, row(&["Name", "Age", "City"]));
        assert_eq!(
            ex.table.rows,
            vec![row(&["Alice", "30", "Oslo"]), row(&["Bob", "25", "Goa"])]
        );
        assert_eq!(ex.rows_discarded, 0);
    }

    #[test]
    fn test_tsv_mixed_width_noise_discarded() {
        let text = "Item\tQty\tPrice\n\
                    Apples\t3\t1.20\n\
                    Pears\t5\t2.10\n\
                    Subtotal\t9.30\n\
                    Plums\t2\t0.80\n\
                    Grapes\t1\t3.00\n";
        let ex = extract_table(text, &opts()).unwrap();
        assert_eq!(ex.table.header, row(&["Item", "Qty", "Price"]));
        assert_eq!(ex.table.rows.len(), 4);
        assert!(ex.table.is_rectangular());
        assert_eq!(ex.rows_discarded, 1);
    }

    #[test]
    fn test_tsv_ignores_lines_without_tabs() {
        let text = "Inventory listing for March\nItem\tQty\nApples\t3\nPears\t5\n";
        let ex = extract_table(text, &opts()).unwrap();
        assert_eq!(ex.table.header, row(&["Item", "Qty"]));
        assert_eq!(ex.table.rows.len(), 2);
        assert_eq!(ex.lines_considered, 4);
        assert_eq!(ex.rows_discarded, 1);
    }

    #[test]
    fn test_space_aligned_layout() {
        let text = "Monthly summary\n\
                    Analys          Resultat    Enhet\n\
                    Arsenik (As)    68          mg/kg TS\n\
                    Bly (Pb)        120         mg/kg TS\n";
        let ex = extract_table(text, &opts()).unwrap();
        assert_eq!(ex.strategy, Strategy::SpaceRun);
        assert_eq!(ex.lines_considered, 3);
        assert_eq!(ex.table.header, row(&["Analys", "Resultat", "Enhet"]));
        assert_eq!(ex.table.rows[1], row(&["Bly (Pb)", "120", "mg/kg TS"]));
    }

    #[test]
    fn test_smart_split_contacts() {
        let text = "Contacts\n\
                    John Smith123 Main St+1-555-1234\n\
                    Mary Jones45 Oak Avenue+1-555-9876\n";
        let ex = extract_table(text, &opts()).unwrap();
        assert_eq!(ex.strategy, Strategy::SmartSplit);
        assert_eq!(ex.table.header, row(&["Name", "Address", "Phone"]));
        assert_eq!(ex.table.rows.len(), 2);
        assert_eq!(
            ex.table.rows[0],
            row(&["John Smith", "123 Main St", "+1-555-1234"])
        );
        assert_eq!(ex.rows_discarded, 1);
    }

    #[test]
    fn test_blank_text_is_empty_input() {
        assert!(matches!(
            extract_table("  \n \t\n", &opts()),
            Err(TabsiftError::EmptyInput)
        ));
        assert!(matches!(
            extract_table("", &opts()),
            Err(TabsiftError::EmptyInput)
        ));
    }

    #[test]
    fn test_only_short_lines_is_no_table_data() {
        assert!(matches!(
            extract_table("abc\nde\n12345\n", &opts()),
            Err(TabsiftError::NoTableData(_))
        ));
    }

    #[test]
    fn test_prose_is_no_table_data() {
        let text = "This document contains only a paragraph of prose text.";
        assert!(matches!(
            extract_table(text, &opts()),
            Err(TabsiftError::NoTableData(_))
        ));
    }

    #[test]
    fn test_short_lines_never_reach_rows() {
        let text = "Name\tAge\na\tb\nAlice\t30\n";
        let ex = extract_table(text, &opts()).unwrap();
        assert_eq!(ex.table.header, row(&["Name", "Age"]));
        assert_eq!(ex.table.rows, vec![row(&["Alice", "30"])]);
    }
}
