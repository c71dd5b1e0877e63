use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    config: Option<PathBuf>,
    layout_only: bool,
) -> Result<(), tabsift_core::error::TabsiftError> {
    let options = super::load_options(config)?;
    let text = super::read_input_text(&input_file, layout_only)?;
    let extraction = tabsift_core::extract_table(&text, &options)?;

    match output_format {
        "json" => output::json::print(&extraction)?,
        _ => {
            output::table::print_table(&extraction.table.header, &extraction.table.rows);
            eprintln!("{}", output::table::extraction_note(&extraction));
        }
    }

    Ok(())
}
