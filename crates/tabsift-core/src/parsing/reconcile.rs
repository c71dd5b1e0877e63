use crate::error::TabsiftError;
use crate::model::Table;

/// Keep only rows of the most common width and promote the first to header.
///
/// Ties between widths go to the width that was seen first. The returned
/// table is rectangular; the number of dropped rows is returned alongside.
pub fn reconcile(rows: Vec<Vec<String>>) -> Result<(Table, usize), TabsiftError> {
    let width = dominant_width(&rows)
        .ok_or_else(|| TabsiftError::NoTableData("no rows to reconcile".into()))?;

    let total = rows.len();
    let mut kept = rows.into_iter().filter(|r| r.len() == width);
    let header = kept
        .next()
        .ok_or_else(|| TabsiftError::NoTableData("no row of the dominant width".into()))?;
    let data: Vec<Vec<String>> = kept.collect();
    let discarded = total - data.len() - 1;

    Ok((Table::new(header, data), discarded))
}

/// Most frequent row width, first-seen wins ties.
pub fn dominant_width(rows: &[Vec<String>]) -> Option<usize> {
    // (width, count) in order of first appearance
    let mut tally: Vec<(usize, usize)> = Vec::new();
    for row in rows {
        match tally.iter_mut().find(|(w, _)| *w == row.len()) {
            Some((_, count)) => *count += 1,
            None => tally.push((row.len(), 1)),
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (width, count) in tally {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((width, count));
        }
    }
    best.map(|(width, _)| width)
}
