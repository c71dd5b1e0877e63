use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    layout_only: bool,
) -> Result<(), tabsift_core::error::TabsiftError> {
    let options = super::load_options(config)?;
    let store = super::open_store(store)?;
    let text = super::read_input_text(&input_file, layout_only)?;

    let summary = tabsift_core::analyze_text(&text, &store, &options)?;

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => output::table::print_summary(&summary, options.session_ttl_minutes),
    }

    Ok(())
}
