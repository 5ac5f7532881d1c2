use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{http_controller, load_settings, CoercionPolicy};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ChannelView, UiEvent};
use crate::ui::PredictionFormApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop form for the expected-CTC prediction service")]
struct StartupArgs {
    /// Settings file (defaults to ./client.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, value_parser = parse_policy)]
    policy: Option<CoercionPolicy>,
}

fn parse_policy(raw: &str) -> Result<CoercionPolicy, String> {
    raw.parse()
}

/// `RUST_LOG` when it holds valid directives, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();
    let args = StartupArgs::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(policy) = args.policy {
        settings.coercion_policy = policy;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let view = Arc::new(ChannelView::new(ui_tx.clone()));
    let controller = Arc::new(
        http_controller(&settings, view).context("failed to set up prediction endpoint")?,
    );
    tracing::info!(
        server_url = %settings.server_url,
        policy = %controller.policy(),
        "desktop form starting"
    );
    backend_bridge::runtime::launch(cmd_rx, ui_tx, controller.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Expected CTC Prediction")
            .with_inner_size([720.0, 880.0])
            .with_min_inner_size([560.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Expected CTC Prediction",
        options,
        Box::new(move |_cc| Ok(Box::new(PredictionFormApp::new(controller, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_prefers_rust_log_directives() {
        assert_eq!(log_filter(Some("debug".to_string())).to_string(), "debug");
        assert_eq!(
            log_filter(Some("client_core=trace".to_string())).to_string(),
            "client_core=trace"
        );
        assert_eq!(log_filter(None).to_string(), "info");
    }
}
