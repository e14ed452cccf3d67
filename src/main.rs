mod app;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use lifecycle_atlas::layout::LayoutConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Lifecycle JSON document to load instead of the bundled one.
    #[arg(long)]
    data: Option<PathBuf>,
    /// JSON file overriding layout cell sizes and gaps.
    #[arg(long)]
    layout_config: Option<PathBuf>,
    /// Start with every expandable node open.
    #[arg(long)]
    expand_all: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let layout_config = match &args.layout_config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };

    let load_options = app::LoadOptions {
        data_path: args.data,
        expand_all: args.expand_all,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lifecycle Atlas",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::AtlasApp::new(cc, load_options, layout_config)))
        }),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
