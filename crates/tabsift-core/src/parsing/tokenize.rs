use super::strategy::WHITESPACE_RUN;

/// Split a tab-delimited line into trimmed, non-empty cells.
///
/// Returns None when the line has no tab or no non-empty cells.
pub fn split_tsv(line: &str) -> Option<Vec<String>> {
    if !line.contains('\t') {
        return None;
    }
    non_empty_cells(line.split('\t'))
}

/// Split a line on runs of two or more whitespace characters.
pub fn split_space_run(line: &str) -> Option<Vec<String>> {
    non_empty_cells(WHITESPACE_RUN.split(line))
}

pub(crate) fn non_empty_cells<'a, I>(parts: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let cells: Vec<String> = parts
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if cells.is_empty() {
        None
    } else {
        Some(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tsv_drops_empty_cells() {
        let cells = split_tsv("Alice\t\t 30 \tOslo\t").unwrap();
        assert_eq!(cells, vec!["Alice", "30", "Oslo"]);
    }

    #[test]
    fn test_split_tsv_requires_a_tab() {
        assert!(split_tsv("Alice 30 Oslo").is_none());
    }

    #[test]
    fn test_split_tsv_all_empty() {
        assert!(split_tsv("\t \t\t").is_none());
    }

    #[test]
    fn test_split_space_run() {
        let cells = split_space_run("Arsenik (As)     68     mg/kg TS").unwrap();
        assert_eq!(cells, vec!["Arsenik (As)", "68", "mg/kg TS"]);
    }

    #[test]
    fn test_split_space_run_keeps_single_spaces() {
        let cells = split_space_run("New York  10001").unwrap();
        assert_eq!(cells, vec!["New York", "10001"]);
    }
}
