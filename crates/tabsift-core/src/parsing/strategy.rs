use crate::model::Strategy;
use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters.
pub(crate) static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace-run regex"));

/// The strategy chosen for a batch and the lines it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub strategy: Strategy,
    pub lines: Vec<&'a str>,
}

/// Pick a tokenizer for a batch of normalized lines.
///
/// Priority order:
/// 1. any tab anywhere selects TSV for the whole batch
/// 2. at least two lines with a whitespace run select space-run, applied to
///    those lines only
/// 3. everything else falls through to the smart splitter
///
/// Never fails; an empty batch selects the smart splitter, which then finds
/// no rows.
pub fn select_strategy<'a>(lines: &[&'a str]) -> Selection<'a> {
    if lines.iter().any(|l| l.contains('\t')) {
        return Selection {
            strategy: Strategy::Tsv,
            lines: lines.to_vec(),
        };
    }

    let structured: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| WHITESPACE_RUN.is_match(l))
        .collect();
    if structured.len() >= 2 {
        return Selection {
            strategy: Strategy::SpaceRun,
            lines: structured,
        };
    }

    Selection {
        strategy: Strategy::SmartSplit,
        lines: lines.to_vec(),
    }
}
