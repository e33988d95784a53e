use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{generate_palette, hex_color, resolve_or_gray};
use crate::data::composition::{
    GenderComposition, LandUseComposition, GENDER_LABELS, LAND_USE_COLORS, LAND_USE_LABELS,
};
use crate::state::AppState;
use crate::ui::map::swatch;
use crate::ui::panels::country_selector;

/// Pie starts at 140° and runs counter-clockwise.
const PIE_START_DEG: f32 = 140.0;
const PIE_SIZE: f32 = 320.0;

// ---------------------------------------------------------------------------
// Gender composition (bar chart)
// ---------------------------------------------------------------------------

pub fn gender_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Gender Composition by Country");

    let Some(ds) = &state.dataset else {
        return;
    };
    let countries = ds.countries().to_vec();
    country_selector(ui, "gender_country", &countries, &mut state.gender_country);

    match state.gender_view() {
        None => {}
        Some(Err(no_data)) => {
            ui.colored_label(Color32::from_rgb(230, 160, 0), no_data.to_string());
        }
        Some(Ok(gender)) => {
            let country = state.gender_country.clone().unwrap_or_default();
            gender_chart(ui, &country, gender);
        }
    }
}

fn gender_chart(ui: &mut Ui, country: &str, gender: GenderComposition) {
    ui.strong(format!("Gender Composition in {country}"));

    let colors = generate_palette(GENDER_LABELS.len());

    Plot::new("gender_chart")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label("Gender Composition")
        .y_axis_label("Population")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, ((label, value), color)) in GENDER_LABELS
                .iter()
                .zip(gender.values())
                .zip(colors)
                .enumerate()
            {
                let bar = Bar::new(i as f64, value as f64).width(0.6).name(*label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(*label).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Land use composition (pie chart)
// ---------------------------------------------------------------------------

pub fn land_use_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Land Use Comparison by Country");

    let Some(ds) = &state.dataset else {
        return;
    };
    let countries = ds.countries().to_vec();
    country_selector(ui, "land_use_country", &countries, &mut state.land_use_country);

    match state.land_use_view() {
        None => {}
        Some(Err(no_data)) => {
            ui.colored_label(Color32::from_rgb(230, 160, 0), no_data.to_string());
        }
        Some(Ok(land_use)) => {
            let country = state.land_use_country.clone().unwrap_or_default();
            land_use_chart(ui, &country, land_use);
        }
    }
}

fn land_use_chart(ui: &mut Ui, country: &str, land_use: LandUseComposition) {
    let colors: Vec<Color32> = LAND_USE_COLORS
        .iter()
        .map(|hex| resolve_or_gray(hex_color(hex)))
        .collect();

    ui.vertical(|ui: &mut Ui| {
        for (label, color) in LAND_USE_LABELS.iter().zip(&colors) {
            ui.horizontal(|ui: &mut Ui| {
                swatch(ui, *color);
                ui.label(RichText::new(*label).color(*color));
            });
        }
    });

    ui.strong(format!("Land Use Composition in {country}"));

    let Some(slices) = pie_slices(&land_use.values(), PIE_START_DEG) else {
        ui.label("Nothing to draw: land use values sum to zero.");
        return;
    };

    let (response, painter) = ui.allocate_painter(Vec2::splat(PIE_SIZE), Sense::hover());
    let center = response.rect.center();
    let radius = PIE_SIZE * 0.45;

    for (slice, color) in slices.iter().zip(&colors) {
        let steps = ((slice.sweep.to_degrees() / 4.0).ceil() as usize).max(1);
        for step in 0..steps {
            let a0 = slice.start + slice.sweep * step as f32 / steps as f32;
            let a1 = slice.start + slice.sweep * (step + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, on_circle(center, radius, a0), on_circle(center, radius, a1)],
                *color,
                Stroke::NONE,
            ));
        }
    }

    for slice in &slices {
        if slice.sweep <= 0.0 {
            continue;
        }
        painter.text(
            on_circle(center, radius * 0.6, slice.start + slice.sweep / 2.0),
            Align2::CENTER_CENTER,
            format!("{:.1}%", slice.share * 100.0),
            FontId::proportional(13.0),
            Color32::BLACK,
        );
    }
}

/// Screen position at `angle` (radians, counter-clockwise from east).
fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(angle.cos(), -angle.sin()) * radius
}

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    /// Start angle in radians.
    pub start: f32,
    /// Angular extent in radians.
    pub sweep: f32,
    /// Fraction of the drawn total, in `[0, 1]`.
    pub share: f64,
}

/// Lay out slices for drawing. Shares are computed here only; the inputs stay raw.
/// Negative values draw as empty slices. `None` when nothing positive remains.
pub fn pie_slices(values: &[f64], start_deg: f32) -> Option<Vec<PieSlice>> {
    let clean: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect();
    let total: f64 = clean.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut start = start_deg.to_radians();
    Some(
        clean
            .iter()
            .map(|v| {
                let share = v / total;
                let sweep = share as f32 * TAU;
                let slice = PieSlice { start, sweep, share };
                start += sweep;
                slice
            })
            .collect(),
    )
}
