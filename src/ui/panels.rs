use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – map filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Rate window ----
    ui.strong("Filter by Suicide Rate Range");
    let range = state.rate_range.min..=state.rate_range.max;
    let mut min_rate = state.filter.min_rate;
    let mut max_rate = state.filter.max_rate;
    let min_changed = ui
        .add(egui::Slider::new(&mut min_rate, range.clone()).text("min"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(&mut max_rate, range).text("max"))
        .changed();
    if min_changed || max_changed {
        state.set_rate_window(min_rate, max_rate);
    }
    ui.separator();

    // ---- Search ----
    ui.strong("Search for a Country or Region");
    let mut term = state.filter.search_term.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut term).hint_text("e.g. land"))
        .changed()
    {
        state.set_search_term(term);
    }
    ui.separator();

    if ui.button("Reset filters").clicked() {
        state.reset_filter();
    }
}

// ---------------------------------------------------------------------------
// Country selector (shared by both chart sections)
// ---------------------------------------------------------------------------

/// Combo box over the distinct country names.
pub fn country_selector(
    ui: &mut Ui,
    id: &str,
    countries: &[String],
    selected: &mut Option<String>,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a Country:");
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.as_deref().unwrap_or(""))
            .show_ui(ui, |ui: &mut Ui| {
                for country in countries {
                    let is_selected = selected.as_deref() == Some(country.as_str());
                    if ui.selectable_label(is_selected, country).clicked() {
                        *selected = Some(country.clone());
                    }
                }
            });
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
            let can_reload = state.source_path.is_some();
            if ui.add_enabled(can_reload, egui::Button::new("Reload")).clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} countries loaded, {} on the map",
                ds.countries().len(),
                state.markers.len()
            ));
        }

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
        .set_title("Open country data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
