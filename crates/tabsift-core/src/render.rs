use crate::error::TabsiftError;
use rust_xlsxwriter::{ColNum, Color, Format, FormatAlign, RowNum, Workbook, Worksheet, XlsxError};

/// Narrowest and widest column, in characters.
const MIN_COLUMN_WIDTH: usize = 12;
const MAX_COLUMN_WIDTH: usize = 50;

const SHEET_NAME: &str = "Data";
const HEADER_FILL: u32 = 0x4472C4;
const STRIPE_FILL: u32 = 0xF2F2F2;
const HEADER_ROW_HEIGHT: f64 = 25.0;

/// Backend that turns headers and rows into a downloadable sheet.
pub trait SheetRenderer: Send + Sync {
    fn render(&self, headers: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>, TabsiftError>;

    /// File extension for rendered output, without the dot.
    fn extension(&self) -> &str;
}

/// Renders tab-separated text, one line per row, header first.
///
/// Tabs and line breaks inside cells are replaced with spaces so every
/// output line has exactly one cell per column.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvRenderer;

impl SheetRenderer for TsvRenderer {
    fn render(&self, headers: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>, TabsiftError> {
        let mut out = String::new();
        for line in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
            let cells: Vec<String> = line.iter().map(|c| sanitize_cell(c)).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &str {
        "tsv"
    }
}

/// Renders a styled Excel workbook with a single "Data" sheet.
///
/// The header row is bold white on blue, centred, and taller than the rest.
/// Every other data row, starting with the first, is shaded light grey.
/// Column widths come from [`column_widths`].
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl SheetRenderer for XlsxRenderer {
    fn render(&self, headers: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>, TabsiftError> {
        let mut workbook = Workbook::new();
        write_sheet(workbook.add_worksheet(), headers, rows)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn extension(&self) -> &str {
        "xlsx"
    }
}

fn write_sheet(
    sheet: &mut Worksheet,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let stripe_format = Format::new().set_background_color(Color::RGB(STRIPE_FILL));

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_num(col)?, header, &header_format)?;
    }
    sheet.set_row_height(0, HEADER_ROW_HEIGHT)?;

    for (i, row) in rows.iter().enumerate() {
        let row_num = RowNum::try_from(i + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, value) in row.iter().enumerate() {
            if i % 2 == 0 {
                sheet.write_string_with_format(row_num, col_num(col)?, value, &stripe_format)?;
            } else {
                sheet.write_string(row_num, col_num(col)?, value)?;
            }
        }
    }

    for (col, width) in column_widths(headers, rows).into_iter().enumerate() {
        sheet.set_column_width(col_num(col)?, width as f64)?;
    }
    Ok(())
}

fn col_num(col: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

fn sanitize_cell(cell: &str) -> String {
    cell.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

/// Display width for each column: longest cell plus padding, clamped.
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let longest = rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tsv_render() {
        let bytes = TsvRenderer
            .render(
                &strings(&["Name", "City"]),
                &[strings(&["Alice", "Oslo"]), strings(&["Bob", "Goa"])],
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Name\tCity\nAlice\tOslo\nBob\tGoa\n"
        );
    }

    #[test]
    fn test_tsv_render_sanitizes_cells() {
        let bytes = TsvRenderer
            .render(&strings(&["Note"]), &[strings(&["two\tparts\r\nhere"])])
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Note\ntwo parts here\n");
    }

    #[test]
    fn test_xlsx_render_reads_back() {
        use calamine::{Data, Reader, Xlsx};

        let bytes = XlsxRenderer
            .render(
                &strings(&["Name", "City"]),
                &[strings(&["Alice", "Oslo"]), strings(&["Bob", ""])],
            )
            .unwrap();
        assert!(bytes.starts_with(b"PK"));

        let mut workbook: Xlsx<_> =
            calamine::open_workbook_from_rs(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Data".to_string()]);

        let sheet = workbook.worksheet_range("Data").unwrap();
        let cell = |row: u32, col: u32| sheet.get_value((row, col)).cloned();
        assert_eq!(cell(0, 0), Some(Data::String("Name".into())));
        assert_eq!(cell(0, 1), Some(Data::String("City".into())));
        assert_eq!(cell(1, 1), Some(Data::String("Oslo".into())));
        assert_eq!(cell(2, 0), Some(Data::String("Bob".into())));
    }

    #[test]
    fn test_xlsx_keeps_numeric_text_as_text() {
        use calamine::{Data, Reader, Xlsx};

        let bytes = XlsxRenderer
            .render(&strings(&["Zip"]), &[strings(&["00123"])])
            .unwrap();
        let mut workbook: Xlsx<_> =
            calamine::open_workbook_from_rs(std::io::Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range("Data").unwrap();
        assert_eq!(sheet.get_value((1, 0)), Some(&Data::String("00123".into())));
    }

    #[test]
    fn test_xlsx_extension() {
        assert_eq!(XlsxRenderer.extension(), "xlsx");
        assert_eq!(TsvRenderer.extension(), "tsv");
    }

    #[test]
    fn test_column_widths_clamped() {
        let long = "x".repeat(80);
        let widths = column_widths(
            &strings(&["Id", "Description", "Name"]),
            &[strings(&["1", &long, "Alexandria Ocasio"])],
        );
        assert_eq!(widths, vec![12, 50, 19]);
    }

    #[test]
    fn test_column_widths_tolerate_short_rows() {
        let widths = column_widths(&strings(&["A", "B"]), &[strings(&["only"])]);
        assert_eq!(widths, vec![12, 12]);
    }
}
