/// Job Tracker - Chrome Extension for tracking job applications
/// Built with Rust + WASM + Yew

mod chrome;
mod config;
mod detector;
mod error;
mod followup;
mod job_data;
mod page;
mod render;
mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

pub use config::TrackerConfig;
pub use error::TrackerError;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the confirmation check for JavaScript access
#[wasm_bindgen]
pub fn is_confirmation_page(url: &str, page_text: &str) -> bool {
    detector::is_confirmation(url, page_text)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start watching the current page from the content script
#[wasm_bindgen]
pub fn start_detector() -> Result<(), JsValue> {
    page::start_detector(TrackerConfig::default())
}
