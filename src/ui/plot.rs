use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::SeriesColors;
use crate::data::aggregate::{ChartSpec, UnitSeries};

// ---------------------------------------------------------------------------
// Metric chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart described by the spec: a single line of monthly totals,
/// or one stacked bar series per `TF Name`. Month labels land on the x axis
/// in the spec's order.
pub fn metric_chart(ui: &mut Ui, spec: &ChartSpec) {
    match spec {
        ChartSpec::Line { points, .. } => line_chart(ui, points),
        ChartSpec::StackedBars { months, series, .. } => stacked_bar_chart(ui, months, series),
    }
}

fn line_chart(ui: &mut Ui, points: &[(String, f64)]) {
    let labels: Vec<String> = points.iter().map(|(month, _)| month.clone()).collect();
    let plot_points: PlotPoints = points
        .iter()
        .enumerate()
        .map(|(i, (_, total))| [i as f64, *total])
        .collect();

    Plot::new("metric_line")
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Pathways")
        .x_axis_formatter(move |mark, _range| month_tick_label(&labels, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(plot_points)
                    .name("Pathways")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
        });
}

fn stacked_bar_chart(ui: &mut Ui, months: &[String], series: &[UnitSeries]) {
    let colors = SeriesColors::new(series.iter().map(|s| s.unit.as_str()));
    let labels: Vec<String> = months.to_vec();

    Plot::new("metric_bars")
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Pathways")
        .x_axis_formatter(move |mark, _range| month_tick_label(&labels, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let mut charts: Vec<BarChart> = Vec::new();
            for s in series {
                let bars: Vec<Bar> = s
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, value)| Bar::new(i as f64, *value).width(0.6))
                    .collect();
                let below: Vec<&BarChart> = charts.iter().collect();
                let chart = BarChart::new(bars)
                    .name(&s.unit)
                    .color(colors.color_for(&s.unit))
                    .stack_on(&below);
                charts.push(chart);
            }
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label whole-month grid marks with the month name; everything else stays
/// blank so zoomed-in fractional marks don't repeat labels.
fn month_tick_label(labels: &[String], value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 0.05 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_only_land_on_whole_months() {
        let labels = vec!["April 2025".to_string(), "May 2025".to_string()];
        assert_eq!(month_tick_label(&labels, 0.0), "April 2025");
        assert_eq!(month_tick_label(&labels, 1.01), "May 2025");
        assert_eq!(month_tick_label(&labels, 0.5), "");
        assert_eq!(month_tick_label(&labels, -1.0), "");
        assert_eq!(month_tick_label(&labels, 7.0), "");
    }
}
