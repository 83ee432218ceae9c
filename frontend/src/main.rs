use chicham::AppConfig;
use chicham_frontend::{App, load_config, web::console};
use leptos::prelude::*;
use tracing::Level;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = load_config();
    console::init(config.as_ref().map_or(Level::INFO, |c| c.log_level));
    let config = config.unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid build configuration, falling back to defaults");
        AppConfig::default()
    });
    tracing::info!(api = %config.api_base_url, "starting chicham");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
