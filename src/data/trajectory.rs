use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};

use super::model::{RttTable, COL_TF_NAME};

// ---------------------------------------------------------------------------
// Monthly trajectory targets
// ---------------------------------------------------------------------------

/// The trajectory always spans twelve months.
pub const TRAJECTORY_MONTHS: u32 = 12;

/// First month of the target year: April 2025 (the range runs to March 2026).
const ANCHOR_YEAR: i32 = 2025;
const ANCHOR_MONTH: u32 = 4;

/// One target: a month label and a non-negative pathway count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryEntry {
    pub month: String,
    pub pathways: u32,
}

/// The full set of monthly targets, one entry per month in calendar order.
/// Independent of the uploaded data; always exactly twelve entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    pub entries: Vec<TrajectoryEntry>,
}

impl Default for Trajectory {
    fn default() -> Self {
        let entries = month_labels()
            .into_iter()
            .map(|month| TrajectoryEntry { month, pathways: 0 })
            .collect();
        Trajectory { entries }
    }
}

impl Trajectory {
    /// Serialize to CSV: header `Month,Pathways`, twelve data rows.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["Month", "Pathways"])
            .context("writing trajectory header")?;
        for entry in &self.entries {
            writer
                .write_record([entry.month.clone(), entry.pathways.to_string()])
                .with_context(|| format!("writing trajectory row for {}", entry.month))?;
        }
        let bytes = writer
            .into_inner()
            .context("flushing trajectory CSV")?;
        String::from_utf8(bytes).context("trajectory CSV is not UTF-8")
    }
}

/// The twelve month labels, "April 2025" through "March 2026".
pub fn month_labels() -> Vec<String> {
    let anchor = NaiveDate::from_ymd_opt(ANCHOR_YEAR, ANCHOR_MONTH, 1)
        .expect("anchor month is a valid date");
    (0..TRAJECTORY_MONTHS)
        .map(|offset| (anchor + Months::new(offset)).format("%B %Y").to_string())
        .collect()
}

/// Options for the unit selector: "Total" first, then the distinct `TF Name`
/// values. The selection scopes nothing yet; it only populates the list.
pub fn unit_options(table: &RttTable) -> Vec<String> {
    let mut options = vec!["Total".to_string()];
    if let Some(units) = table.unique_values.get(COL_TF_NAME) {
        options.extend(units.iter().map(ToString::to_string));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    #[test]
    fn twelve_months_april_to_march() {
        let labels = month_labels();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels.first().map(String::as_str), Some("April 2025"));
        assert_eq!(labels.get(8).map(String::as_str), Some("December 2025"));
        assert_eq!(labels.last().map(String::as_str), Some("March 2026"));
    }

    #[test]
    fn default_trajectory_is_all_zero() {
        let trajectory = Trajectory::default();
        assert_eq!(trajectory.entries.len(), 12);
        assert!(trajectory.entries.iter().all(|e| e.pathways == 0));
    }

    #[test]
    fn csv_export_has_header_and_twelve_rows() {
        let mut trajectory = Trajectory::default();
        trajectory.entries[0].pathways = 120;
        let csv = trajectory.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "Month,Pathways");
        assert_eq!(lines[1], "April 2025,120");
        assert_eq!(lines[12], "March 2026,0");
    }

    #[test]
    fn unit_options_lead_with_total() {
        let rows = vec![
            Row::from([(COL_TF_NAME.to_string(), CellValue::Text("Trust B".into()))]),
            Row::from([(COL_TF_NAME.to_string(), CellValue::Text("Trust A".into()))]),
        ];
        let table = RttTable::from_rows(vec![COL_TF_NAME.to_string()], rows);
        assert_eq!(
            unit_options(&table),
            vec!["Total".to_string(), "Trust A".to_string(), "Trust B".to_string()]
        );
    }

    #[test]
    fn unit_options_without_column_is_just_total() {
        let table = RttTable::from_rows(vec!["Other".to_string()], Vec::new());
        assert_eq!(unit_options(&table), vec!["Total".to_string()]);
    }
}
