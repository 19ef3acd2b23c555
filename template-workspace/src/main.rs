// Desktop entry point for the template workspace
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use clap::Parser;
use std::path::PathBuf;

use template_workspace::config::{WorkspaceConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "template-workspace", version, about = "Manage HTML templates and generate documents")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the template API base URL
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = WorkspaceConfig::load(&cli.config)?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    log::debug!("Loaded configuration: {:?}", config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Template Workspace"),
        ..Default::default()
    };

    eframe::run_native(
        "Template Workspace",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            let app = app::TemplateApp::new(cc, &config)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run application: {}", e))
}
