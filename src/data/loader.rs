use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use super::model::{CellValue, REQUIRED_COLUMNS, Row, RttTable, COL_TYPE};

/// The one fixed rename applied at load time. Older exports label
/// non-admitted stops plain "Clock Stops".
const LEGACY_CLOCK_STOPS: &str = "Clock Stops";
const NON_ADMITTED_CLOCK_STOPS: &str = "Non-Admitted Clock Stops";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an RTT dataset from a file. Dispatch by extension; only `.csv` is
/// accepted.
pub fn load_file(path: &Path) -> Result<RttTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. `Type`, `Month`, `Pathways` and
/// `TF Name` must be present; every other column is kept and becomes
/// filterable. Cell dtypes are guessed per value.
pub fn load_csv<R: Read>(input: R) -> Result<RttTable> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut row = Row::new();
        for (col_idx, value) in record.iter().enumerate() {
            let col_name = &headers[col_idx];
            let mut cell = guess_cell_type(value);
            if col_name == COL_TYPE {
                cell = rename_legacy_type(cell);
            }
            row.insert(col_name.clone(), cell);
        }
        rows.push(row);
    }

    Ok(RttTable::from_rows(headers, rows))
}

/// Unconditional `Type` rename: "Clock Stops" → "Non-Admitted Clock Stops".
fn rename_legacy_type(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Text(s) if s == LEGACY_CLOCK_STOPS => {
            CellValue::Text(NON_ADMITTED_CLOCK_STOPS.to_string())
        }
        other => other,
    }
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    CellValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Type,Month,Pathways,TF Name,Reviewed
Clock Starts,April 2025,5,Trust A,true
Clock Stops,April 2025,3,Trust B,false
Clock Starts,2025-05-01,2.5,Trust A,
";

    #[test]
    fn loads_rows_and_guesses_dtypes() {
        let table = load_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.columns,
            vec!["Type", "Month", "Pathways", "TF Name", "Reviewed"]
        );
        assert_eq!(table.rows[0]["Pathways"], CellValue::Integer(5));
        assert_eq!(table.rows[2]["Pathways"], CellValue::Float(2.5));
        assert_eq!(table.rows[0]["Reviewed"], CellValue::Bool(true));
        assert_eq!(table.rows[2]["Reviewed"], CellValue::Null);
        assert_eq!(
            table.rows[2]["Month"],
            CellValue::Date(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
        );
    }

    #[test]
    fn renames_clock_stops_on_load() {
        let table = load_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            table.rows[1]["Type"],
            CellValue::Text("Non-Admitted Clock Stops".into())
        );
        // The rename only touches the Type column and only the exact label.
        assert_eq!(table.rows[0]["Type"], CellValue::Text("Clock Starts".into()));
    }

    #[test]
    fn rejects_missing_required_column() {
        let csv = "Type,Month,Pathways\nClock Starts,April 2025,5\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("TF Name"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("parquet"));
    }
}
