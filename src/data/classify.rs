use super::model::{CellValue, RttTable};

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// Columns with fewer distinct values than this are treated as categorical
/// regardless of their underlying dtype.
pub const CATEGORICAL_MAX_DISTINCT: usize = 100;

/// How a column is filtered. Recomputed whenever the filter UI is built,
/// never stored on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Numeric,
    Temporal,
    Text,
}

/// Classify a column by inspecting its distinct values.
///
/// Low-cardinality columns are categorical no matter what they hold. Beyond
/// that, a column is numeric when every non-null value is a number, temporal
/// when every non-null value is a date (native or text that parses under the
/// standard formats), and free text otherwise.
pub fn classify(table: &RttTable, column: &str) -> ColumnKind {
    if table.distinct_count(column) < CATEGORICAL_MAX_DISTINCT {
        return ColumnKind::Categorical;
    }

    let Some(values) = table.unique_values.get(column) else {
        return ColumnKind::Categorical;
    };
    let non_null = || values.iter().filter(|v| !matches!(v, CellValue::Null));

    if non_null().all(|v| v.as_f64().is_some()) {
        return ColumnKind::Numeric;
    }
    if non_null().all(|v| v.as_date().is_some()) {
        return ColumnKind::Temporal;
    }
    ColumnKind::Text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn single_column(name: &str, values: Vec<CellValue>) -> RttTable {
        let rows = values
            .into_iter()
            .map(|v| Row::from([(name.to_string(), v)]))
            .collect();
        RttTable::from_rows(vec![name.to_string()], rows)
    }

    #[test]
    fn low_cardinality_is_categorical_for_every_dtype() {
        let numeric = single_column("n", (0..99).map(CellValue::Integer).collect());
        assert_eq!(classify(&numeric, "n"), ColumnKind::Categorical);

        let dates = single_column(
            "d",
            (1..=28)
                .map(|day| {
                    CellValue::Date(chrono::NaiveDate::from_ymd_opt(2025, 4, day).unwrap())
                })
                .collect(),
        );
        assert_eq!(classify(&dates, "d"), ColumnKind::Categorical);

        let text = single_column(
            "t",
            (0..50).map(|i| CellValue::Text(format!("v{i}"))).collect(),
        );
        assert_eq!(classify(&text, "t"), ColumnKind::Categorical);
    }

    #[test]
    fn high_cardinality_numbers_are_numeric() {
        let table = single_column("n", (0..150).map(CellValue::Integer).collect());
        assert_eq!(classify(&table, "n"), ColumnKind::Numeric);
    }

    #[test]
    fn high_cardinality_date_text_is_temporal() {
        let values = (0..150)
            .map(|i| {
                let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                    + chrono::Days::new(i);
                CellValue::Text(date.format("%Y-%m-%d").to_string())
            })
            .collect();
        let table = single_column("d", values);
        assert_eq!(classify(&table, "d"), ColumnKind::Temporal);
    }

    #[test]
    fn nulls_do_not_block_classification() {
        let mut values: Vec<CellValue> = (0..150).map(CellValue::Integer).collect();
        values.push(CellValue::Null);
        let table = single_column("n", values);
        assert_eq!(classify(&table, "n"), ColumnKind::Numeric);
    }

    #[test]
    fn mixed_values_fall_back_to_text() {
        let mut values: Vec<CellValue> =
            (0..150).map(|i| CellValue::Text(format!("free text {i}"))).collect();
        values.push(CellValue::Integer(7));
        let table = single_column("t", values);
        assert_eq!(classify(&table, "t"), ColumnKind::Text);
    }
}
