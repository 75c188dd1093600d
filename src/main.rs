//! CRM Console - Main Entry Point
//!
//! Serves the Dioxus application together with the module settings API.
//! Uses dioxus::serve() pattern for dx serve compatibility.

use crm_console::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    // IMPORTANT: Use dioxus::server::axum, NOT axum directly
    use dioxus::server::axum::{
        routing::{get, post},
        Extension,
    };

    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("\n=== PANIC CAUGHT ===");
        eprintln!("Panic info: {}", panic_info);
        eprintln!("Backtrace:\n{}", backtrace);
        eprintln!("=== END PANIC ===\n");
    }));

    // Initialize tracing BEFORE dioxus::serve
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting CRM Console...");

    use crm_console::config::ServerConfig;
    use crm_console::handlers::{
        get_module_settings_handler, reset_module_settings_handler, update_module_settings_handler,
        ModuleSettingsState,
    };

    dioxus::serve(|| {
        async move {
            // `dx serve` owns argv, so only the environment is read here
            let config = ServerConfig::from_env();

            let state = match config.build_repository().await {
                Ok(repo) => ModuleSettingsState::new(repo),
                Err(e) => {
                    tracing::warn!(
                        "Failed to open module settings storage: {:#}. Settings will not survive a restart.",
                        e
                    );
                    ModuleSettingsState::in_memory()
                }
            };

            let router = dioxus::server::router(App)
                .route(
                    "/api/module-settings",
                    get(get_module_settings_handler).put(update_module_settings_handler),
                )
                .route("/api/module-settings/reset", post(reset_module_settings_handler))
                .layer(Extension(state));

            Ok(router)
        }
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    web_sys::console::log_1(&"[WASM] CRM Console initialized".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
