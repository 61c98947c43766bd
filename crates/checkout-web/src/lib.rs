//! terminal-checkout Web Frontend
//!
//! Leptos-based WASM frontend: a terminal-style intake widget that collects
//! an email and a plan code, then drives the checkout sequence against the
//! backend and the hosted payment widget.

mod api;
mod app;
mod components;
mod orchestration;
mod pages;
mod razorpay;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
