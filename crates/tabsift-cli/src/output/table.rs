use tabsift_core::model::{AnalysisSummary, Extraction};
use tabsift_core::render::column_widths;

pub fn print_table(header: &[String], rows: &[Vec<String>]) {
    let widths = column_widths(header, rows);

    print_row(header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("  "));
    for row in rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{:<width$}", fit(cell, width), width = width)
        })
        .collect();
    println!("{}", line.join("  ").trim_end());
}

/// Cut a cell to `width` chars, marking the cut with an ellipsis.
fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// One-line account of an extraction, printed after its table.
pub fn extraction_note(extraction: &Extraction) -> String {
    format!(
        "{} row(s) via {} split, {} row(s) discarded",
        extraction.table.rows.len(),
        extraction.strategy,
        extraction.rows_discarded
    )
}

pub fn print_summary(summary: &AnalysisSummary, ttl_minutes: i64) {
    println!("Analysis: {}", summary.analysis_id);
    println!(
        "  {} row(s), {} column(s), {} split\n",
        summary.total_rows,
        summary.columns.len(),
        summary.strategy
    );

    if summary.sample_rows.is_empty() {
        println!("  Columns: {}", summary.columns.join(", "));
    } else {
        print_table(&summary.columns, &summary.sample_rows);
        if summary.total_rows > summary.sample_rows.len() {
            println!(
                "... {} more row(s)",
                summary.total_rows - summary.sample_rows.len()
            );
        }
    }

    println!(
        "\nGenerate within {} minute(s): tabsift generate {} -c <COLUMN>...",
        ttl_minutes, summary.analysis_id
    );
}
