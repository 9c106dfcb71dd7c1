use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RttDashApp {
    pub state: AppState,
}

impl eframe::App for RttDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::filter_panel(ui, &mut self.state);
            });

        // ---- Right side panel: trajectories ----
        egui::SidePanel::right("trajectory_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::trajectory_panel(ui, &mut self.state);
            });

        // ---- Central panel: metric chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::chart_panel(ui, &mut self.state);
        });
    }
}
