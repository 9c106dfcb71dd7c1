use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use regex::Regex;

use super::classify::{ColumnKind, classify};
use super::model::{CellValue, Row, RttTable};

// ---------------------------------------------------------------------------
// Per-column constraints
// ---------------------------------------------------------------------------

/// One constraint per filtered column, tagged by the column's classification.
/// Constraints for the filtered columns live in the session state and are
/// AND-composed when the table is reduced.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    /// Row passes when its value is in the selected set.
    Categorical { selected: BTreeSet<CellValue> },
    /// Inclusive range over the column's numeric values. `bounds` is the
    /// column's [min, max] and never changes while the constraint lives.
    Numeric { range: (f64, f64), bounds: (f64, f64) },
    /// Inclusive date range. Only constrains when both endpoints are set;
    /// a single endpoint means "no constraint yet".
    Temporal {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        bounds: (NaiveDate, NaiveDate),
    },
    /// Substring or regex over the cell's display string. Empty pattern
    /// means no constraint.
    Text { pattern: String },
}

/// Per-column constraint state: maps column_name → constraint. Columns not
/// present are unconstrained.
pub type FilterState = BTreeMap<String, ColumnConstraint>;

/// Slider step for a numeric column: a hundredth of the span, clamped so a
/// degenerate min == max column never yields a zero step.
pub fn numeric_step(bounds: (f64, f64)) -> f64 {
    ((bounds.1 - bounds.0) / 100.0).max(f64::EPSILON)
}

/// Build the initial, all-pass constraint for a column from its current
/// values and classification.
pub fn init_constraint(table: &RttTable, column: &str) -> ColumnConstraint {
    match classify(table, column) {
        ColumnKind::Categorical => ColumnConstraint::Categorical {
            selected: table
                .unique_values
                .get(column)
                .cloned()
                .unwrap_or_default(),
        },
        ColumnKind::Numeric => {
            let bounds = numeric_bounds(table, column);
            ColumnConstraint::Numeric {
                range: bounds,
                bounds,
            }
        }
        ColumnKind::Temporal => {
            let bounds = temporal_bounds(table, column);
            ColumnConstraint::Temporal {
                start: Some(bounds.0),
                end: Some(bounds.1),
                bounds,
            }
        }
        ColumnKind::Text => ColumnConstraint::Text {
            pattern: String::new(),
        },
    }
}

fn numeric_bounds(table: &RttTable, column: &str) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in &table.rows {
        if let Some(v) = row.get(column).and_then(CellValue::as_f64) {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn temporal_bounds(table: &RttTable, column: &str) -> (NaiveDate, NaiveDate) {
    let mut dates = table
        .rows
        .iter()
        .filter_map(|row| row.get(column).and_then(CellValue::as_date));
    let first = dates.next().unwrap_or(NaiveDate::MIN);
    dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)))
}

// ---------------------------------------------------------------------------
// Applying the filters
// ---------------------------------------------------------------------------

/// Text patterns compile once per apply, not once per row. An invalid regex
/// degrades to a literal substring match.
enum TextMatch {
    Pattern(Regex),
    Literal(String),
}

impl TextMatch {
    fn compile(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => TextMatch::Pattern(re),
            Err(_) => TextMatch::Literal(pattern.to_string()),
        }
    }

    fn is_match(&self, hay: &str) -> bool {
        match self {
            TextMatch::Pattern(re) => re.is_match(hay),
            TextMatch::Literal(lit) => hay.contains(lit.as_str()),
        }
    }
}

/// Reduce the table to the rows satisfying every active constraint.
///
/// The result is a fresh table over the same column list; applying the same
/// state again returns the same rows.
pub fn apply(table: &RttTable, filters: &FilterState) -> RttTable {
    let text_matchers: BTreeMap<&str, TextMatch> = filters
        .iter()
        .filter_map(|(col, constraint)| match constraint {
            ColumnConstraint::Text { pattern } if !pattern.is_empty() => {
                Some((col.as_str(), TextMatch::compile(pattern)))
            }
            _ => None,
        })
        .collect();

    let rows: Vec<Row> = table
        .rows
        .iter()
        .filter(|row| {
            filters.iter().all(|(col, constraint)| {
                cell_passes(row.get(col.as_str()), constraint, text_matchers.get(col.as_str()))
            })
        })
        .cloned()
        .collect();

    table.with_rows(rows)
}

fn cell_passes(
    cell: Option<&CellValue>,
    constraint: &ColumnConstraint,
    text: Option<&TextMatch>,
) -> bool {
    match constraint {
        ColumnConstraint::Categorical { selected } => {
            let value = cell.unwrap_or(&CellValue::Null);
            selected.contains(value)
        }
        ColumnConstraint::Numeric { range, .. } => cell
            .and_then(CellValue::as_f64)
            .is_some_and(|v| range.0 <= v && v <= range.1),
        ColumnConstraint::Temporal {
            start: Some(start),
            end: Some(end),
            ..
        } => cell
            .and_then(CellValue::as_date)
            .is_some_and(|d| *start <= d && d <= *end),
        // One or zero endpoints: no constraint yet.
        ColumnConstraint::Temporal { .. } => true,
        ColumnConstraint::Text { .. } => match text {
            Some(matcher) => {
                let hay = cell.map(ToString::to_string).unwrap_or_default();
                matcher.is_match(&hay)
            }
            None => true,
        },
    }
}
