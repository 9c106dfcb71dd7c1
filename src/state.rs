use crate::data::aggregate::Metric;
use crate::data::filter::{self, FilterState};
use crate::data::model::RttTable;
use crate::data::trajectory::Trajectory;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full per-session state, independent of rendering. Every frame is a
/// function of this object and the immutable loaded table; no widget state
/// lives anywhere else.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub table: Option<RttTable>,

    /// Whether the filter section is enabled ("Add filters").
    pub show_filters: bool,

    /// Constraints for the columns chosen for filtering.
    pub filters: FilterState,

    /// Metric charted in the central panel.
    pub metric: Metric,

    /// Whether the chart splits into one stacked series per `TF Name`.
    pub split_by_unit: bool,

    /// Unit picked in the trajectory panel ("Total" or a `TF Name`).
    /// Collected only; it does not scope the trajectory values.
    pub trajectory_unit: String,

    /// Monthly targets being edited.
    pub trajectory: Trajectory,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            show_filters: false,
            filters: FilterState::default(),
            metric: Metric::NonAdmittedClockStops,
            split_by_unit: false,
            trajectory_unit: "Total".to_string(),
            trajectory: Trajectory::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the per-dataset controls.
    pub fn set_table(&mut self, table: RttTable) {
        self.show_filters = false;
        self.filters = FilterState::default();
        self.trajectory_unit = "Total".to_string();
        self.table = Some(table);
        self.status_message = None;
    }

    /// Toggle a column in or out of the filtered set. Adding a column builds
    /// its all-pass constraint from the column's current values; removing it
    /// discards the constraint.
    pub fn toggle_filter_column(&mut self, column: &str) {
        if self.filters.remove(column).is_some() {
            return;
        }
        if let Some(table) = &self.table {
            self.filters
                .insert(column.to_string(), filter::init_constraint(table, column));
        }
    }

    /// The table the chart sees: the loaded table reduced by the active
    /// constraints, or unreduced while the filter section is off.
    pub fn filtered_table(&self) -> Option<RttTable> {
        let table = self.table.as_ref()?;
        if self.show_filters {
            Some(filter::apply(table, &self.filters))
        } else {
            Some(table.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    fn small_table() -> RttTable {
        let rows = vec![
            Row::from([("Type".to_string(), CellValue::Text("Clock Starts".into()))]),
            Row::from([("Type".to_string(), CellValue::Text("Incomplete Pathways".into()))]),
        ];
        RttTable::from_rows(vec!["Type".to_string()], rows)
    }

    #[test]
    fn toggling_a_column_adds_then_removes_its_constraint() {
        let mut state = AppState::default();
        state.set_table(small_table());

        state.toggle_filter_column("Type");
        assert!(state.filters.contains_key("Type"));

        state.toggle_filter_column("Type");
        assert!(!state.filters.contains_key("Type"));
    }

    #[test]
    fn filters_only_apply_when_the_section_is_on() {
        let mut state = AppState::default();
        state.set_table(small_table());
        state.toggle_filter_column("Type");
        if let Some(crate::data::filter::ColumnConstraint::Categorical { selected }) =
            state.filters.get_mut("Type")
        {
            selected.clear();
        }

        // Section off: the empty selection is ignored.
        assert_eq!(state.filtered_table().unwrap().len(), 2);

        state.show_filters = true;
        assert_eq!(state.filtered_table().unwrap().len(), 0);
    }

    #[test]
    fn loading_a_dataset_resets_the_controls() {
        let mut state = AppState::default();
        state.show_filters = true;
        state.set_table(small_table());
        state.toggle_filter_column("Type");

        state.set_table(small_table());
        assert!(state.filters.is_empty());
        assert!(!state.show_filters);
        assert_eq!(state.trajectory_unit, "Total");
    }
}
