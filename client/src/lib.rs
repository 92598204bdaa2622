//! # client
//!
//! Leptos + WASM frontend for the FinAssist financial assistant.
//!
//! This crate contains the session gate that decides who is signed in, the
//! route guard built on it, the identity and market-data clients, and the
//! route-level pages. The `finassist` host renders it with SSR and the
//! browser hydrates it through [`hydrate`].

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach the app to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
