pub mod app;
pub mod layout;
pub mod prices;
pub mod routes;
pub mod shared;
pub mod system;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::shared::api_utils::load_client_config;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    // Runtime config comes from the backend before anything renders.
    wasm_bindgen_futures::spawn_local(async {
        let config = load_client_config().await;
        log::info!("Pricing API at {}", config.api_url);
        leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
