use std::path::PathBuf;
use tabsift_core::render::{SheetRenderer, TsvRenderer, XlsxRenderer};

pub fn run(
    analysis_id: &str,
    columns: Vec<String>,
    format: &str,
    store: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<(), tabsift_core::error::TabsiftError> {
    let store = super::open_store(store)?;
    let renderer: &dyn SheetRenderer = match format {
        "tsv" => &TsvRenderer,
        _ => &XlsxRenderer,
    };
    let sheet = tabsift_core::generate(&store, analysis_id, &columns, renderer)?;

    let path = out.unwrap_or_else(|| PathBuf::from(&sheet.filename));
    std::fs::write(&path, &sheet.bytes)?;
    eprintln!(
        "Wrote {} row(s) x {} column(s) to {}",
        sheet.stats.total_rows,
        sheet.stats.columns,
        path.display()
    );

    Ok(())
}
