//! # account-settings
//!
//! Leptos + WASM account settings page for a storefront dashboard.
//!
//! The signed-in user comes from `localStorage`; their customer profile is
//! fetched from the REST API, edited in a local form (including an avatar
//! encoded as a data URL), and saved back with a PATCH. Notification
//! preferences are kept in `localStorage` only.
//!
//! State transitions live in plain structs under [`state`] so they can be
//! tested without a browser; components under [`components`] and [`pages`]
//! wire them to signals and browser tasks behind the `hydrate` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic and log hooks, then hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let level = app::load_config().log_level;
    // A second init only fails because a logger is already installed.
    console_log::init_with_level(level).ok();
    leptos::mount::hydrate_body(app::App);
}
