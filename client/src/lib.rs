//! # client
//!
//! Leptos + WASM frontend for the FoodShare food-donation marketplace.
//!
//! This crate contains the route table, pages, components, the injected
//! session context, and the REST client. Session persistence and access
//! rules come from the `session` crate; this crate wires them into the
//! browser (`localStorage`, `Date.now()`, `fetch`).

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    console_log::init_with_level(log::Level::Debug).ok();
    log::info!("foodshare client starting");
    leptos::mount::mount_to_body(app::App);
}
