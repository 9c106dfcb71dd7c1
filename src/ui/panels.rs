use anyhow::Context;
use eframe::egui::{self, Color32, ComboBox, DragValue, Grid, RichText, ScrollArea, Slider, TextEdit, Ui};
use egui_extras::DatePickerButton;

use crate::data::aggregate::{self, Metric};
use crate::data::filter::{numeric_step, ColumnConstraint};
use crate::data::model::RttTable;
use crate::data::trajectory;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: the "Add filters" toggle, the column
/// picker, and one constraint widget per chosen column.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the table so we can mutate state inside the loops.
    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.checkbox(&mut state.show_filters, "Add filters");
    if !state.show_filters {
        return;
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Filter on");
            for col in &table.columns {
                let mut active = state.filters.contains_key(col);
                if ui.checkbox(&mut active, col).changed() {
                    state.toggle_filter_column(col);
                }
            }
            ui.separator();

            let filtered_columns: Vec<String> = state.filters.keys().cloned().collect();
            for col in filtered_columns {
                constraint_widget(ui, state, &table, &col);
            }
        });
}

/// One widget per constraint tag: checkbox list, slider pair, date-picker
/// pair, or text field.
fn constraint_widget(ui: &mut Ui, state: &mut AppState, table: &RttTable, column: &str) {
    let Some(constraint) = state.filters.get_mut(column) else {
        return;
    };

    match constraint {
        ColumnConstraint::Categorical { selected } => {
            let Some(all_values) = table.unique_values.get(column) else {
                return;
            };

            let n_selected = selected.len();
            let n_total = all_values.len();
            let header_text = format!("{column}  ({n_selected}/{n_total})");

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt(column)
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            *selected = all_values.clone();
                        }
                        if ui.small_button("None").clicked() {
                            selected.clear();
                        }
                    });

                    for val in all_values {
                        let mut checked = selected.contains(val);
                        if ui.checkbox(&mut checked, val.to_string()).changed() {
                            if checked {
                                selected.insert(val.clone());
                            } else {
                                selected.remove(val);
                            }
                        }
                    }
                });
        }
        ColumnConstraint::Numeric { range, bounds } => {
            ui.strong(format!("Values for {column}"));
            let step = numeric_step(*bounds);
            ui.add(
                Slider::new(&mut range.0, bounds.0..=bounds.1)
                    .step_by(step)
                    .text("min"),
            );
            ui.add(
                Slider::new(&mut range.1, bounds.0..=bounds.1)
                    .step_by(step)
                    .text("max"),
            );
            ui.add_space(4.0);
        }
        ColumnConstraint::Temporal { start, end, bounds } => {
            ui.strong(format!("Values for {column}"));
            let mut from = start.unwrap_or(bounds.0);
            let mut to = end.unwrap_or(bounds.1);
            let from_id = format!("{column}_start");
            let to_id = format!("{column}_end");
            ui.horizontal(|ui: &mut Ui| {
                if ui
                    .add(DatePickerButton::new(&mut from).id_salt(&from_id))
                    .changed()
                {
                    *start = Some(from);
                }
                if ui
                    .add(DatePickerButton::new(&mut to).id_salt(&to_id))
                    .changed()
                {
                    *end = Some(to);
                }
            });
            ui.add_space(4.0);
        }
        ColumnConstraint::Text { pattern } => {
            ui.strong(format!("Substring or regex in {column}"));
            ui.add(TextEdit::singleline(pattern).hint_text("substring or regex"));
            ui.add_space(4.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel – metric chart
// ---------------------------------------------------------------------------

/// Render the metric selector, the split toggle, and the chart over the
/// filtered table.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(filtered) = state.filtered_table() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an RTT dataset to begin  (File → Open…)");
        });
        return;
    };
    let total_rows = state.table.as_ref().map_or(0, RttTable::len);

    ui.heading("Data Visualization");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Metric");
        ComboBox::from_id_salt("metric")
            .selected_text(state.metric.label())
            .show_ui(ui, |ui: &mut Ui| {
                for metric in Metric::ALL {
                    ui.selectable_value(&mut state.metric, metric, metric.label());
                }
            });
        ui.checkbox(&mut state.split_by_unit, "Split by TF Name");
    });
    ui.label(format!("{} of {total_rows} rows after filters", filtered.len()));
    ui.separator();

    let spec = aggregate::chart_spec(&filtered, state.metric, state.split_by_unit);
    ui.strong(spec.title());
    plot::metric_chart(ui, &spec);
}

// ---------------------------------------------------------------------------
// Right side panel – trajectories
// ---------------------------------------------------------------------------

/// Render the trajectory editor: unit selector, one stepper per month, a
/// preview, and the export button.
pub fn trajectory_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Set Trajectories for Next Year");
    ui.separator();

    let unit_options = match &state.table {
        Some(table) => trajectory::unit_options(table),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.label("Select TF Name (or Total for all)");
    ComboBox::from_id_salt("trajectory_unit")
        .selected_text(state.trajectory_unit.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &unit_options {
                ui.selectable_value(&mut state.trajectory_unit, option.clone(), option);
            }
        });
    ui.add_space(4.0);
    ui.label("Set pathways for each month from April 2025 to March 2026");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for entry in &mut state.trajectory.entries {
                ui.horizontal(|ui: &mut Ui| {
                    ui.add(DragValue::new(&mut entry.pathways).speed(1.0));
                    ui.label(&entry.month);
                });
            }

            ui.separator();
            egui::CollapsingHeader::new("Trajectory Data")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    Grid::new("trajectory_preview").striped(true).show(ui, |ui: &mut Ui| {
                        ui.strong("Month");
                        ui.strong("Pathways");
                        ui.end_row();
                        for entry in &state.trajectory.entries {
                            ui.label(&entry.month);
                            ui.label(entry.pathways.to_string());
                            ui.end_row();
                        }
                    });
                });

            ui.separator();
            if ui.button("Download Trajectory Data…").clicked() {
                export_trajectory(state);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.table {
            Some(table) => {
                ui.label(format!("{} rows loaded", table.len()));
            }
            None => {
                ui.label("Upload an RTT dataset (CSV format) to proceed.");
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open RTT dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.len(),
                    table.columns
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_trajectory(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save trajectory")
        .set_file_name("trajectory.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let written = state
            .trajectory
            .to_csv()
            .and_then(|csv| std::fs::write(&path, csv).context("writing trajectory file"));
        match written {
            Ok(()) => {
                log::info!("Exported trajectory to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export trajectory: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
