//! Splitting of delimiter-free, contact-style lines.
//!
//! Lists exported from address books and directories often lose every
//! separator on the way through PDF text extraction, leaving lines like
//! `John Smith123 Main St+1-555-1234`. A phone number is the most reliable
//! anchor in such a line: everything before it is a name followed by an
//! address, and the address usually starts at the first digit.

use super::tokenize::non_empty_cells;
use regex::Regex;
use std::sync::LazyLock;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d{1,4}[-\s]?\d{3,4}[-\s]?\d{4,}").expect("valid phone regex")
});

/// Decimal digits only; vulgar fractions and Roman numerals do not count.
static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));

const CONTACT_HEADER: [&str; 3] = ["Name", "Address", "Phone"];

/// Split one line into cells, or None if it does not look like a record.
///
/// Lines shorter than `min_chars` characters are never records.
pub fn split_smart_line(line: &str, min_chars: usize) -> Option<Vec<String>> {
    if line.chars().count() < min_chars {
        return None;
    }

    if let Some(m) = PHONE.find(line) {
        let phone = m.as_str().trim().to_string();
        let before = line[..m.start()].trim();
        return Some(split_name_address(before, phone));
    }

    if line.contains('\t') || line.contains("   ") {
        let sep = if line.contains('\t') { "\t" } else { "   " };
        if let Some(cells) = non_empty_cells(line.split(sep)) {
            if cells.len() >= 2 {
                return Some(cells);
            }
        }
    }

    if line.matches(',').count() >= 2 {
        if let Some(cells) = non_empty_cells(line.split(',')) {
            if cells.len() >= 3 {
                return Some(cells);
            }
        }
    }

    None
}

fn split_name_address(before: &str, phone: String) -> Vec<String> {
    let first_digit = DIGIT.find(before).map(|m| m.start());

    if let Some(idx) = first_digit.filter(|&i| i > 0) {
        let name = before[..idx].trim().to_string();
        let address = before[idx..].trim().to_string();
        return vec![name, address, phone];
    }

    if let Some((name, address)) = before.split_once("  ") {
        return vec![name.trim().to_string(), address.trim().to_string(), phone];
    }

    vec![before.to_string(), String::new(), phone]
}

/// Header for rows produced by the smart splitter.
///
/// A three-cell first row ending in something with digits is taken to be a
/// contact record; anything else gets numbered column names.
pub fn infer_smart_header(first_row: &[String]) -> Vec<String> {
    let looks_like_contact = first_row.len() == 3
        && first_row
            .get(2)
            .is_some_and(|phone| DIGIT.is_match(phone));

    if looks_like_contact {
        CONTACT_HEADER.iter().map(|s| s.to_string()).collect()
    } else {
        (1..=first_row.len())
            .map(|i| format!("Column {i}"))
            .collect()
    }
}
