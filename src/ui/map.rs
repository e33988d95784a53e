use eframe::egui::{self, Color32, Sense, Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::classify::{legend_entries, ALL_TIERS};
use crate::color::{named_color, resolve_or_gray};
use crate::data::filter::MarkerView;
use crate::state::AppState;

/// Marker fill opacity.
const FILL_OPACITY: f32 = 0.7;

// ---------------------------------------------------------------------------
// Marker map (lon/lat scatter)
// ---------------------------------------------------------------------------

pub fn marker_map(ui: &mut Ui, state: &AppState) {
    ui.heading("Suicide Rates by Location Map");

    if state.dataset.is_none() {
        ui.label("Open a file to view countries  (File → Open…)");
        return;
    }

    tier_legend(ui);

    let hover_markers = state.markers.clone();

    Plot::new("marker_map")
        .height(400.0)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            if name.is_empty() {
                return format!("lon {:.2}, lat {:.2}", value.x, value.y);
            }
            popup_at(&hover_markers, value.x, value.y).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            // One series per tier: the tier fixes both colour and radius.
            for tier in ALL_TIERS {
                let style = tier.style();
                let color = resolve_or_gray(named_color(style.color));

                let points: PlotPoints = state
                    .markers
                    .iter()
                    .filter(|m| m.tier == tier)
                    .map(|m| [m.lon, m.lat])
                    .collect();

                let series = Points::new(points)
                    .name(tier.legend_label())
                    .color(color.gamma_multiply(FILL_OPACITY))
                    .radius(style.radius)
                    .shape(MarkerShape::Circle)
                    .filled(true);

                plot_ui.points(series);
            }
        });
}

/// Popup text of the marker under the hovered plot point, one line per field.
fn popup_at(markers: &[MarkerView], lon: f64, lat: f64) -> Option<String> {
    markers
        .iter()
        .min_by(|a, b| {
            let da = (a.lon - lon).powi(2) + (a.lat - lat).powi(2);
            let db = (b.lon - lon).powi(2) + (b.lat - lat).powi(2);
            da.total_cmp(&db)
        })
        .map(|m| m.popup_text().replace("<br>", "\n"))
}

fn tier_legend(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Legend");
        for (label, color_name) in legend_entries() {
            swatch(ui, resolve_or_gray(named_color(color_name)));
            ui.label(label);
        }
    });
}

/// Small filled square in front of a legend label.
pub fn swatch(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
}

/// Header picture; egui_extras loaders resolve the `file://` URI.
pub fn banner(ui: &mut Ui, path: &std::path::Path) {
    ui.add(
        egui::Image::new(format!("file://{}", path.display()))
            .max_width(ui.available_width())
            .max_height(180.0)
            .maintain_aspect_ratio(true),
    );
}
