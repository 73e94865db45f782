//! Timesheet Frontend
//!
//! Browser-side glue for the time/expense tracker: edit-modal prefill and
//! the hours chart.
//!
//! Layers:
//! - models / fields / config: plain data, testable natively
//! - prefill / sequence / api: the controller and its transport
//! - dom / chart / components: `web_sys`, Chart.js, Bootstrap and Leptos

pub mod api;
mod app;
pub mod chart;
pub mod components;
pub mod config;
mod dom;
pub mod error;
pub mod fields;
mod logging;
pub mod models;
pub mod prefill;
pub mod sequence;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

pub use config::AppConfig;
pub use error::PrefillError;
pub use models::{Project, ProjectArgs, Record, RecordArgs, UnitType};

/// Page entry point: install everything once the DOM is parsed
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("no document, timesheet frontend not started");
        return;
    };

    let ready_document = document.clone();
    dom::when_dom_ready(&document, move || {
        let config = AppConfig::from_document(&ready_document);
        logging::init(config.level_filter());
        app::register(app::Page::install(&ready_document, &config));
    });
}

/// Argument-based record prefill for pages that render their own edit buttons
#[wasm_bindgen(js_name = openEditModal)]
pub fn open_edit_modal(id: u32, project_id: u32, amount: f64, note: String, date: Option<String>) {
    let date = date.as_deref().and_then(|raw| match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            log::warn!("openEditModal: ignoring date {:?}: {}", raw, e);
            None
        }
    });
    let args = RecordArgs { id, project_id, amount, note, date };
    app::with_page(|page| page.open_record(&args));
}

/// Argument-based project prefill
#[wasm_bindgen(js_name = openProjectModal)]
pub fn open_project_modal(id: u32, name: String, unit_type: String, description: Option<String>) {
    let args = ProjectArgs { id, name, unit_type: UnitType::from(unit_type), description };
    app::with_page(|page| page.open_project(&args));
}
