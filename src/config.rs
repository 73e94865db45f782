//! Page Configuration
//!
//! Element ids, endpoints and chart style. Pages can override any of it with
//! `<script type="application/json" id="timesheet-config">{...}</script>`;
//! keys left out keep their defaults.

use serde::{Deserialize, Serialize};

use crate::fields::{self, BindingSpec};

/// Id of the optional inline config block
pub const CONFIG_ELEMENT_ID: &str = "timesheet-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub record_form: FormConfig,
    pub project_form: FormConfig,
    pub chart: ChartStyle,
    /// How long the inline failure notice stays up
    pub notice_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            record_form: FormConfig {
                modal_id: "editModal".to_string(),
                form_id: "editForm".to_string(),
                endpoint: "/entry/{id}/json".to_string(),
                submit_action: Some("/edit_record/{id}".to_string()),
                notice_host_id: "editModalNotice".to_string(),
                bindings: fields::record_bindings(),
            },
            project_form: FormConfig {
                modal_id: "editProjectModal".to_string(),
                form_id: "editProjectForm".to_string(),
                endpoint: "/project/{id}/json".to_string(),
                submit_action: None,
                notice_host_id: "editProjectModalNotice".to_string(),
                bindings: fields::project_bindings(),
            },
            chart: ChartStyle::default(),
            notice_timeout_ms: 4000,
        }
    }
}

/// One modal + form pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub modal_id: String,
    pub form_id: String,
    /// JSON endpoint, `{id}` is replaced with the record id
    pub endpoint: String,
    /// Form `action` to set on prefill; left alone when `None`
    #[serde(default)]
    pub submit_action: Option<String>,
    #[serde(default)]
    pub notice_host_id: String,
    pub bindings: Vec<BindingSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub element_id: String,
    pub dataset_label: String,
    pub background_color: String,
    pub border_radius: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            element_id: "hoursChart".to_string(),
            dataset_label: "Hodiny".to_string(),
            background_color: "rgba(0,191,166,0.7)".to_string(),
            border_radius: 6,
        }
    }
}

impl AppConfig {
    /// Parse the inline config block. Malformed JSON falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed page config: {}", e);
                Self::default()
            }
        }
    }

    /// Read `#timesheet-config` from the current document, if present
    pub fn from_document(document: &web_sys::Document) -> Self {
        match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Self::default(),
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Replace every `{id}` in `template`
pub fn expand_template(template: &str, id: u32) -> String {
    template.replace("{id}", &id.to_string())
}
