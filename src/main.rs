mod app;
mod catalog;
mod config;
mod controller;
mod conversation;
mod dnd;
mod error;
mod event;
mod gateway;
mod render;
mod selection;
mod services;
mod theme;

use app::RoutineAdvisorApp;
use catalog::loader::{CatalogLoader, CatalogSource};
use config::{AppConfig, CONFIG_FILE_NAME};
use controller::AdvisorController;
use eframe::egui;
use gateway::{AssistantGateway, HttpCompletionBackend};
use services::Services;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let workspace = std::env::current_dir()?;
    let config = AppConfig::load(&workspace.join(CONFIG_FILE_NAME))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();
    info!(
        catalog = %config.catalog_source,
        endpoint = %config.endpoint_url,
        model = %config.model,
        "starting routine advisor"
    );

    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("routine-advisor-runtime")
        .build()?;

    let backend = Arc::new(HttpCompletionBackend::new(config.endpoint_url.clone()));
    let services = Services::new(
        CatalogLoader::new(CatalogSource::parse(&config.catalog_source)),
        AssistantGateway::new(backend, config.model.clone()),
        tx,
        runtime.handle().clone(),
    );
    let controller = AdvisorController::new(config.brand.clone(), config.system_prompt());

    let app = RoutineAdvisorApp::new(rx, services, controller);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0])
            .with_title("Routine Advisor"),
        ..Default::default()
    };

    eframe::run_native(
        "Routine Advisor",
        native_options,
        Box::new(move |_creation_context| Ok(Box::new(app))),
    )?;

    Ok(())
}
