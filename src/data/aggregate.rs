use super::model::{CellValue, Row, RttTable, COL_MONTH, COL_PATHWAYS, COL_TF_NAME, COL_TYPE};

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// The pathway-stage metrics a dataset reports, one per `Type` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    NonAdmittedClockStops,
    AdmittedClockStops,
    IncompletePathways,
    IncompleteAdmittedPathways,
    ClockStarts,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::NonAdmittedClockStops,
        Metric::AdmittedClockStops,
        Metric::IncompletePathways,
        Metric::IncompleteAdmittedPathways,
        Metric::ClockStarts,
    ];

    /// The `Type` label rows carry for this metric.
    pub fn label(self) -> &'static str {
        match self {
            Metric::NonAdmittedClockStops => "Non-Admitted Clock Stops",
            Metric::AdmittedClockStops => "Admitted Clock Stops",
            Metric::IncompletePathways => "Incomplete Pathways",
            Metric::IncompleteAdmittedPathways => "Incomplete Admitted Pathways",
            Metric::ClockStarts => "Clock Starts",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

/// One stacked-bar series: summed pathways per month for one `TF Name`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSeries {
    pub unit: String,
    /// One value per month of the spec, zero where the unit has no rows.
    pub values: Vec<f64>,
}

/// Renderer-independent description of the chart for the current selection.
/// Month order is the table's incoming row order, not chronological.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Line {
        title: String,
        points: Vec<(String, f64)>,
    },
    StackedBars {
        title: String,
        months: Vec<String>,
        series: Vec<UnitSeries>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line { title, .. } => title,
            ChartSpec::StackedBars { title, .. } => title,
        }
    }
}

/// Build the chart for a metric over the (already filtered) table.
///
/// Rows whose `Type` does not equal the metric label contribute nothing; an
/// unrecognized or misspelled label therefore yields an empty chart, not an
/// error.
pub fn chart_spec(table: &RttTable, metric: Metric, split_by_unit: bool) -> ChartSpec {
    if split_by_unit {
        let (months, series) = unit_breakdown(table, metric);
        ChartSpec::StackedBars {
            title: format!("{} Split by TF Name", metric.label()),
            months,
            series,
        }
    } else {
        ChartSpec::Line {
            title: format!("Total {} Over Time", metric.label()),
            points: monthly_totals(table, metric),
        }
    }
}

fn metric_rows<'a>(table: &'a RttTable, metric: Metric) -> impl Iterator<Item = &'a Row> {
    table.rows.iter().filter(move |row| {
        matches!(row.get(COL_TYPE), Some(CellValue::Text(label)) if label.as_str() == metric.label())
    })
}

fn month_label(row: &Row) -> String {
    row.get(COL_MONTH)
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn pathways(row: &Row) -> f64 {
    row.get(COL_PATHWAYS)
        .and_then(CellValue::as_f64)
        .unwrap_or(0.0)
}

/// Sum pathways per month, months in first-appearance order.
pub fn monthly_totals(table: &RttTable, metric: Metric) -> Vec<(String, f64)> {
    let mut points: Vec<(String, f64)> = Vec::new();
    for row in metric_rows(table, metric) {
        let month = month_label(row);
        match points.iter_mut().find(|(m, _)| *m == month) {
            Some((_, total)) => *total += pathways(row),
            None => points.push((month, pathways(row))),
        }
    }
    points
}

/// Sum pathways per (month, TF Name). Months and units both keep
/// first-appearance order; every series is zero-filled to the month axis.
pub fn unit_breakdown(table: &RttTable, metric: Metric) -> (Vec<String>, Vec<UnitSeries>) {
    let mut months: Vec<String> = Vec::new();
    let mut series: Vec<UnitSeries> = Vec::new();

    for row in metric_rows(table, metric) {
        let month = month_label(row);
        let unit = row
            .get(COL_TF_NAME)
            .map(ToString::to_string)
            .unwrap_or_default();

        let month_idx = match months.iter().position(|m| *m == month) {
            Some(idx) => idx,
            None => {
                months.push(month);
                for s in &mut series {
                    s.values.push(0.0);
                }
                months.len() - 1
            }
        };
        let series_idx = match series.iter().position(|s| s.unit == unit) {
            Some(idx) => idx,
            None => {
                series.push(UnitSeries {
                    unit,
                    values: vec![0.0; months.len()],
                });
                series.len() - 1
            }
        };
        series[series_idx].values[month_idx] += pathways(row);
    }

    (months, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn rtt_row(metric: &str, month: &str, pathways: i64, unit: &str) -> Row {
        Row::from([
            (COL_TYPE.to_string(), CellValue::Text(metric.to_string())),
            (COL_MONTH.to_string(), CellValue::Text(month.to_string())),
            (COL_PATHWAYS.to_string(), CellValue::Integer(pathways)),
            (COL_TF_NAME.to_string(), CellValue::Text(unit.to_string())),
        ])
    }

    fn rtt_table(rows: Vec<Row>) -> RttTable {
        RttTable::from_rows(
            vec![
                COL_TYPE.into(),
                COL_MONTH.into(),
                COL_PATHWAYS.into(),
                COL_TF_NAME.into(),
            ],
            rows,
        )
    }

    #[test]
    fn totals_sum_per_month_in_row_order() {
        let table = rtt_table(vec![
            rtt_row("Clock Starts", "Jan", 5, "Trust A"),
            rtt_row("Clock Starts", "Jan", 3, "Trust B"),
            rtt_row("Clock Starts", "Feb", 2, "Trust A"),
        ]);
        let points = monthly_totals(&table, Metric::ClockStarts);
        assert_eq!(points, vec![("Jan".to_string(), 8.0), ("Feb".to_string(), 2.0)]);
    }

    #[test]
    fn month_order_follows_rows_not_calendar() {
        let table = rtt_table(vec![
            rtt_row("Clock Starts", "March 2025", 1, "Trust A"),
            rtt_row("Clock Starts", "January 2025", 2, "Trust A"),
            rtt_row("Clock Starts", "March 2025", 4, "Trust A"),
        ]);
        let points = monthly_totals(&table, Metric::ClockStarts);
        assert_eq!(
            points,
            vec![
                ("March 2025".to_string(), 5.0),
                ("January 2025".to_string(), 2.0),
            ]
        );
    }

    #[test]
    fn other_metrics_do_not_leak_into_the_series() {
        let table = rtt_table(vec![
            rtt_row("Clock Starts", "Jan", 5, "Trust A"),
            rtt_row("Incomplete Pathways", "Jan", 100, "Trust A"),
        ]);
        let points = monthly_totals(&table, Metric::ClockStarts);
        assert_eq!(points, vec![("Jan".to_string(), 5.0)]);
    }

    #[test]
    fn unknown_type_label_yields_empty_chart() {
        let table = rtt_table(vec![rtt_row("clock starts", "Jan", 5, "Trust A")]);
        // Case differs from the canonical label: silently empty.
        let spec = chart_spec(&table, Metric::ClockStarts, false);
        assert_eq!(
            spec,
            ChartSpec::Line {
                title: "Total Clock Starts Over Time".to_string(),
                points: Vec::new(),
            }
        );
    }

    #[test]
    fn breakdown_zero_fills_the_month_axis() {
        let table = rtt_table(vec![
            rtt_row("Clock Starts", "Jan", 5, "Trust A"),
            rtt_row("Clock Starts", "Feb", 3, "Trust B"),
            rtt_row("Clock Starts", "Feb", 2, "Trust A"),
        ]);
        let (months, series) = unit_breakdown(&table, Metric::ClockStarts);
        assert_eq!(months, vec!["Jan".to_string(), "Feb".to_string()]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].unit, "Trust A");
        assert_eq!(series[0].values, vec![5.0, 2.0]);
        assert_eq!(series[1].unit, "Trust B");
        assert_eq!(series[1].values, vec![0.0, 3.0]);
    }

    #[test]
    fn split_flag_selects_the_chart_shape() {
        let table = rtt_table(vec![rtt_row("Clock Starts", "Jan", 5, "Trust A")]);
        assert!(matches!(
            chart_spec(&table, Metric::ClockStarts, false),
            ChartSpec::Line { .. }
        ));
        assert!(matches!(
            chart_spec(&table, Metric::ClockStarts, true),
            ChartSpec::StackedBars { .. }
        ));
    }
}
