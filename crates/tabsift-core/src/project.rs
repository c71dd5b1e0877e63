use crate::error::TabsiftError;
use crate::model::Table;

/// Reduce and reorder a table's columns to `selected`.
///
/// Names missing from the header are skipped. A selected name that occurs
/// more than once in the header cannot be resolved and is an error.
pub fn project(table: &Table, selected: &[String]) -> Result<Table, TabsiftError> {
    let mut header = Vec::new();
    let mut indices = Vec::new();

    for name in selected {
        let mut positions = table
            .header
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == name)
            .map(|(i, _)| i);

        let Some(idx) = positions.next() else {
            tracing::debug!(column = %name, "skipping unknown column");
            continue;
        };
        if positions.next().is_some() {
            return Err(TabsiftError::AmbiguousColumn(name.clone()));
        }

        header.push(name.clone());
        indices.push(idx);
    }

    let rows = table
        .rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Table::new(header, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn people() -> Table {
        Table::new(
            strings(&["Name", "Age", "City"]),
            vec![strings(&["Alice", "30", "Oslo"]), strings(&["Bob", "25", "Goa"])],
        )
    }

    #[test]
    fn test_full_selection_is_identity() {
        let table = people();
        let projected = project(&table, &table.header).unwrap();
        assert_eq!(projected, table);
    }

    #[test]
    fn test_reorder_and_subset() {
        let projected = project(&people(), &strings(&["City", "Name"])).unwrap();
        assert_eq!(projected.header, strings(&["City", "Name"]));
        assert_eq!(
            projected.rows,
            vec![strings(&["Oslo", "Alice"]), strings(&["Goa", "Bob"])]
        );
    }

    #[test]
    fn test_unknown_columns_dropped() {
        let table = Table::new(strings(&["A", "B"]), vec![strings(&["1", "2"])]);
        let projected = project(&table, &strings(&["A", "Z"])).unwrap();
        assert_eq!(projected.header, strings(&["A"]));
        assert_eq!(projected.rows, vec![strings(&["1"])]);
    }

    #[test]
    fn test_nothing_matches() {
        let projected = project(&people(), &strings(&["Phone"])).unwrap();
        assert!(projected.header.is_empty());
        assert_eq!(projected.rows, vec![Vec::<String>::new(), Vec::new()]);
    }

    #[test]
    fn test_short_rows_padded_with_empty_cells() {
        let table = Table::new(
            strings(&["Name", "Address", "Phone"]),
            vec![strings(&["Oslo", "Norway"])],
        );
        let projected = project(&table, &strings(&["Phone", "Name"])).unwrap();
        assert_eq!(projected.rows, vec![strings(&["", "Oslo"])]);
    }

    #[test]
    fn test_selected_duplicate_header_is_ambiguous() {
        let table = Table::new(
            strings(&["Amount", "Note", "Amount"]),
            vec![strings(&["1", "x", "2"])],
        );
        assert!(matches!(
            project(&table, &strings(&["Amount"])),
            Err(TabsiftError::AmbiguousColumn(name)) if name == "Amount"
        ));
        let projected = project(&table, &strings(&["Note"])).unwrap();
        assert_eq!(projected.rows, vec![strings(&["x"])]);
    }

    #[test]
    fn test_repeated_selection_repeats_column() {
        let projected = project(&people(), &strings(&["Age", "Age"])).unwrap();
        assert_eq!(projected.header, strings(&["Age", "Age"]));
        assert_eq!(projected.rows[0], strings(&["30", "30"]));
    }
}
