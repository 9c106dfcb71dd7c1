/// UI layer: egui panels and the chart renderer. Widgets read and write the
/// session state; the data layer never touches egui.
pub mod panels;
pub mod plot;
