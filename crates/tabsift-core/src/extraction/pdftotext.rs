use crate::error::TabsiftError;
use crate::extraction::grid::{self, GridSettings, PageWords, Word};
use crate::extraction::{PageContent, PdfExtractor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Text comes from `pdftotext -layout`. Unless built with
/// [`PdftotextExtractor::layout_only`], word boxes from `pdftotext -bbox` are
/// also read: a page whose words line up in columns is replaced by its table
/// rows, one tab-joined line per row, which the TSV tokenizer then takes.
/// Other pages keep their layout text.
pub struct PdftotextExtractor {
    grid: Option<GridSettings>,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor {
            grid: Some(GridSettings::default()),
        }
    }

    /// Layout text only, no table detection.
    pub fn layout_only() -> Self {
        PdftotextExtractor { grid: None }
    }

    pub fn with_grid_settings(settings: GridSettings) -> Self {
        PdftotextExtractor {
            grid: Some(settings),
        }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TabsiftError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| TabsiftError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| TabsiftError::Extraction(e.to_string()))?;

        let text = run_pdftotext("-layout", tmpfile.path())?;
        let mut pages = split_pages(&text);

        if let Some(settings) = &self.grid {
            let xml = run_pdftotext("-bbox", tmpfile.path())?;
            let words = parse_bbox_words(&xml)?;
            apply_word_grid(&mut pages, &words, settings);
        }

        tracing::debug!(pages = pages.len(), backend = self.backend_name(), "extracted text");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        if self.grid.is_some() {
            "pdftotext+grid"
        } else {
            "pdftotext"
        }
    }
}

fn run_pdftotext(mode: &str, pdf_path: &Path) -> Result<String, TabsiftError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TabsiftError::PdftotextNotFound
            } else {
                TabsiftError::Extraction(format!("pdftotext {mode} failed: {e}"))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(TabsiftError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Replace the lines of every page with a detected table by its rows.
fn apply_word_grid(pages: &mut [PageContent], words: &[PageWords], settings: &GridSettings) {
    for page in pages.iter_mut() {
        let Some(page_words) = words.iter().find(|w| w.page_number == page.page_number) else {
            continue;
        };
        if let Some(rows) = grid::find_table_rows(&page_words.words, settings) {
            tracing::debug!(page = page.page_number, rows = rows.len(), "word grid table");
            page.lines = rows.iter().map(|cells| cells.join("\t")).collect();
        }
    }
}

/// Split pdftotext output into pages on form feeds.
///
/// pdftotext ends the last page with a form feed too, which leaves an empty
/// trailing chunk; empty pages after the first are dropped.
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}

/// Read the `<page>` and `<word>` elements of `pdftotext -bbox` output.
fn parse_bbox_words(xml: &str) -> Result<Vec<PageWords>, TabsiftError> {
    let mut reader = Reader::from_str(xml);
    let mut pages: Vec<PageWords> = Vec::new();
    let mut current: Option<(Word, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| TabsiftError::Extraction(format!("bbox XML: {e}")))?;
        match event {
            Event::Start(ref e) if e.local_name().as_ref() == b"page" => {
                pages.push(PageWords {
                    page_number: pages.len() + 1,
                    words: Vec::new(),
                });
            }
            Event::Start(ref e) if e.local_name().as_ref() == b"word" => {
                current = word_box(e).map(|w| (w, String::new()));
            }
            Event::Text(ref t) => {
                if let Some((_, text)) = current.as_mut() {
                    match t.unescape() {
                        Ok(s) => text.push_str(&s),
                        Err(_) => text.push_str(&String::from_utf8_lossy(t)),
                    }
                }
            }
            Event::End(ref e) if e.local_name().as_ref() == b"word" => {
                if let (Some((mut word, text)), Some(page)) = (current.take(), pages.last_mut()) {
                    word.text = text.trim().to_string();
                    if !word.text.is_empty() {
                        page.words.push(word);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn word_box(tag: &BytesStart) -> Option<Word> {
    Some(Word {
        x_min: attr_f32(tag, "xMin")?,
        y_min: attr_f32(tag, "yMin")?,
        x_max: attr_f32(tag, "xMax")?,
        y_max: attr_f32(tag, "yMax")?,
        text: String::new(),
    })
}

fn attr_f32(tag: &BytesStart, name: &str) -> Option<f32> {
    let attr = tag.try_get_attribute(name).ok()??;
    attr.unescape_value().ok()?.trim().parse().ok()
}
