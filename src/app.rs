use eframe::egui;

use crate::reactive::OutputId;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + payload range ----
        egui::SidePanel::left("controls")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    egui::RichText::new("SpaceX Launch Records Dashboard")
                        .size(28.0)
                        .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.separator();

            let state = &self.state;
            let height = (ui.available_height() / 2.0 - 24.0).max(120.0);
            plot::chart(
                ui,
                "success-pie-chart",
                state.chart(OutputId::SuccessPieChart),
                &state.color_map,
                height,
            );
            ui.separator();
            plot::chart(
                ui,
                "success-payload-scatter-chart",
                state.chart(OutputId::SuccessPayloadScatterChart),
                &state.color_map,
                height,
            );
        });
    }
}
