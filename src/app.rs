use eframe::egui::{self, ScrollArea, Ui};

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{charts, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CountryAtlasApp {
    pub state: AppState,
}

impl CountryAtlasApp {
    /// Build the app and open the configured dataset, if any.
    pub fn new(settings: &Settings) -> Self {
        let mut state = AppState::from_settings(settings);
        if let Some(path) = &settings.data {
            state.open(path);
        }
        Self { state }
    }
}

impl eframe::App for CountryAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: map filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map and the two per-country charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    if let Some(path) = self.state.banner.clone() {
                        map::banner(ui, &path);
                    }
                    map::marker_map(ui, &self.state);
                    ui.separator();
                    charts::gender_section(ui, &mut self.state);
                    ui.separator();
                    charts::land_use_section(ui, &mut self.state);
                });
        });
    }
}
