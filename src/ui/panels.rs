use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelection};
use crate::reactive::InputEvent;
use crate::state::{AppState, default_range};

// ---------------------------------------------------------------------------
// Left side panel – input controls
// ---------------------------------------------------------------------------

/// Render the site dropdown, the payload range control and the booster
/// legend. Changes are fed through [`AppState::apply`].
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    let mut chosen: Option<SiteSelection> = None;
    let current = state.inputs.site.clone();

    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in state.dataset.site_options() {
                if ui
                    .selectable_label(option.value == current, &option.label)
                    .clicked()
                {
                    chosen = Some(option.value);
                }
            }
        });

    if let Some(site) = chosen {
        state.apply(InputEvent::SiteChanged(site));
    }

    ui.add_space(12.0);
    payload_controls(ui, state);

    ui.add_space(12.0);
    ui.strong("Booster Version Category");
    for (label, color) in state.color_map.legend_entries() {
        ui.label(RichText::new(format!("● {label}")).color(color));
    }
}

/// Two handles on the same track; each is bounded by the other so the
/// range can never invert.
fn payload_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg):");

    let scale = state.slider;
    let mut low = state.inputs.payload.low();
    let mut high = state.inputs.payload.high();

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, scale.min..=high)
                .step_by(scale.step)
                .suffix(" Kg")
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, low..=scale.max)
                .step_by(scale.step)
                .suffix(" Kg")
                .text("to"),
        )
        .changed();

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (_, mark) in &state.slider_marks {
            ui.small(mark.as_str());
        }
    });

    let mut next = None;
    if low_changed || high_changed {
        match PayloadRange::new(low, high) {
            Ok(range) => next = Some(range),
            Err(e) => log::warn!("ignoring payload range: {e}"),
        }
    }
    if ui.small_button("Reset range").clicked() {
        next = Some(default_range(&state.dataset));
    }

    if let Some(range) = next {
        state.apply(InputEvent::RangeChanged(range));
    }
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

        ui.label(format!(
            "{} launches from {} sites",
            state.dataset.len(),
            state.dataset.sites().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} with sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
