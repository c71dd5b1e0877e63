//! Table detection from word positions.
//!
//! Layout text pads columns with spaces, so a wide gap inside a cell and a
//! column boundary look the same. Word boxes keep the difference: words in
//! one visual row are grouped into cells at large horizontal gaps, and a
//! cell belongs to a table column when its left or right edge lines up with
//! cells in enough other rows. Rows made only of aligned cells are returned
//! as table rows.

/// A word and its box, in PDF points from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
    pub text: String,
}

impl Word {
    fn y_center(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }
}

/// Words found on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWords {
    pub page_number: usize,
    pub words: Vec<Word>,
}

/// Thresholds for grouping words into rows, cells and columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Words separated by at most this horizontal gap share a cell.
    pub cell_gap: f32,
    /// Edges within this distance count as aligned.
    pub x_tolerance: f32,
    /// Words whose vertical centres are this close share a row.
    pub y_tolerance: f32,
    /// Rows needed to back a column edge, and to call the page a table.
    pub min_rows: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            cell_gap: 6.0,
            x_tolerance: 3.0,
            y_tolerance: 3.0,
            min_rows: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Cell {
    x_min: f32,
    x_max: f32,
    text: String,
}

/// Find the table rows on a page, top to bottom, as lists of cell texts.
///
/// Returns None when fewer than `min_rows` rows have two or more aligned
/// cells; the caller should then fall back to layout text.
pub fn find_table_rows(words: &[Word], settings: &GridSettings) -> Option<Vec<Vec<String>>> {
    let candidates: Vec<Vec<Cell>> = group_rows(words, settings.y_tolerance)
        .iter()
        .map(|row| split_cells(row, settings.cell_gap))
        .filter(|cells| cells.len() >= 2)
        .collect();

    if candidates.len() < settings.min_rows {
        return None;
    }

    let lefts = anchors(
        candidates.iter().flatten().map(|c| c.x_min),
        settings.x_tolerance,
        settings.min_rows,
    );
    let rights = anchors(
        candidates.iter().flatten().map(|c| c.x_max),
        settings.x_tolerance,
        settings.min_rows,
    );

    let near = |value: f32, edges: &[f32]| {
        edges
            .iter()
            .any(|edge| (value - edge).abs() <= settings.x_tolerance)
    };

    let rows: Vec<Vec<String>> = candidates
        .into_iter()
        .filter(|cells| {
            cells
                .iter()
                .all(|c| near(c.x_min, &lefts) || near(c.x_max, &rights))
        })
        .map(|cells| cells.into_iter().map(|c| c.text).collect())
        .collect();

    tracing::trace!(rows = rows.len(), columns = lefts.len(), "word grid");
    (rows.len() >= settings.min_rows).then_some(rows)
}

/// Group words into visual rows, each sorted left to right.
fn group_rows(words: &[Word], y_tolerance: f32) -> Vec<Vec<&Word>> {
    let mut sorted: Vec<&Word> = words.iter().filter(|w| !w.text.is_empty()).collect();
    sorted.sort_by(|a, b| {
        a.y_center()
            .total_cmp(&b.y_center())
            .then(a.x_min.total_cmp(&b.x_min))
    });

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        match rows.last_mut() {
            Some(row) if (word.y_center() - row[0].y_center()).abs() <= y_tolerance => {
                row.push(word)
            }
            _ => rows.push(vec![word]),
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));
    }
    rows
}

/// Merge the words of one row into cells at gaps wider than `cell_gap`.
fn split_cells(row: &[&Word], cell_gap: f32) -> Vec<Cell> {
    let mut cells: Vec<Cell> = Vec::new();
    for word in row {
        match cells.last_mut() {
            Some(cell) if word.x_min - cell.x_max <= cell_gap => {
                cell.text.push(' ');
                cell.text.push_str(&word.text);
                cell.x_max = cell.x_max.max(word.x_max);
            }
            _ => cells.push(Cell {
                x_min: word.x_min,
                x_max: word.x_max,
                text: word.text.clone(),
            }),
        }
    }
    cells
}

/// Cluster edge positions and keep the clusters seen at least `min_support`
/// times, as their mean positions.
fn anchors(values: impl Iterator<Item = f32>, tolerance: f32, min_support: usize) -> Vec<f32> {
    let mut values: Vec<f32> = values.collect();
    values.sort_by(f32::total_cmp);

    let mut clusters: Vec<Vec<f32>> = Vec::new();
    for value in values {
        match clusters.last_mut() {
            Some(cluster) if cluster.last().is_some_and(|last| value - last <= tolerance) => {
                cluster.push(value)
            }
            _ => clusters.push(vec![value]),
        }
    }

    clusters
        .into_iter()
        .filter(|c| c.len() >= min_support)
        .map(|c| c.iter().sum::<f32>() / c.len() as f32)
        .collect()
}
