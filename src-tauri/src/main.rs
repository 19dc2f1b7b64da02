// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod events;
mod state;

use std::sync::Arc;

use log::info;
use tauri::Manager;
use tokio::sync::RwLock;

use state::{default_config_dir, ensure_settings_initialized, AppState};

fn main() {
    init_logging();

    info!("Starting Opsdesk Desktop v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            let app_handle = app.handle().clone();

            let config_dir = default_config_dir().ok_or("could not determine config directory")?;
            info!("Using config directory: {:?}", config_dir);

            if let Err(e) = ensure_settings_initialized(&config_dir) {
                log::warn!("Failed to initialize config directory: {}", e);
            }

            let state = AppState::initialize(&config_dir).map_err(|e| {
                log::error!("Failed to initialize app state: {}", e);
                e
            })?;

            app.manage(Arc::new(RwLock::new(state)));

            // Start the broadcast bridge before anything can toast.
            let handle_clone = app_handle.clone();
            tauri::async_runtime::spawn(async move {
                events::start_event_bridge(handle_clone).await;
            });

            // Warm the stage catalogs in the background; pages tolerate
            // absent data until this lands.
            let state_for_prefetch = app.state::<Arc<RwLock<AppState>>>().inner().clone();
            tauri::async_runtime::spawn(async move {
                let stages = state_for_prefetch.read().await.stages.clone();
                stages.prefetch_all().await;
                info!("Stage catalogs prefetched");
            });

            info!("Opsdesk Desktop initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // App commands
            commands::health_check,
            commands::get_settings,
            // Session commands
            commands::login,
            commands::logout,
            commands::current_user,
            // Field commands
            commands::list_field_definitions,
            commands::create_field_definition,
            commands::update_field_definition,
            commands::delete_field_definition,
            commands::get_record_fields,
            commands::upsert_record_field,
            commands::get_field_form,
            // Stage commands
            commands::get_departments,
            commands::get_stages,
            commands::get_pipeline,
            commands::describe_stage,
            commands::request_stage_transition,
            commands::get_deal_timeline,
            // Notification commands
            commands::register_push_token,
            commands::ensure_notification_permission,
            commands::publish_push_message,
            commands::open_notification_url,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // fmt().init() also installs the log-to-tracing bridge, so the library's
    // `log` macros land in the same subscriber.
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
