mod app;
mod classify;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::anyhow;
use app::CountryAtlasApp;
use clap::{Parser, ValueEnum};
use eframe::egui;

use crate::config::Settings;
use crate::data::model::DuplicatePolicy;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Country table to open at startup (.csv, .json or .parquet)
    #[arg(value_name = "FILE")]
    data: Option<PathBuf>,

    /// Settings file (defaults to ./country-atlas.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How to treat a country name that appears on several rows
    #[arg(long, value_enum)]
    duplicates: Option<DuplicatesArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DuplicatesArg {
    /// Look up the first row carrying the name
    First,
    /// Refuse to load the file
    Reject,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::First => DuplicatePolicy::First,
            DuplicatesArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        settings.data = Some(data);
    }
    if let Some(policy) = cli.duplicates {
        settings.duplicate_countries = policy.into();
    }
    if let Some(banner) = &settings.banner {
        if !banner.exists() {
            log::warn!("Banner image {} not found", banner.display());
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Country Atlas – Suicide Rates, Population and Land Use",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the banner png/jpg.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(CountryAtlasApp::new(&settings)))
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}
