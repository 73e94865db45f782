//! Hours Chart
//!
//! Reads the series the server embedded on the chart canvas and hands a bar
//! chart configuration to Chart.js. Rendered once at page load.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement};

use crate::config::ChartStyle;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<ChartJs, JsValue>;
}

pub const LABELS_ATTR: &str = "data-labels";
pub const VALUES_ATTR: &str = "data-values";

/// Category labels and their values, as embedded in the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    /// Each attribute falls back to an empty sequence on its own when it is
    /// missing or not the JSON array we expect
    pub fn from_attributes(labels: Option<&str>, values: Option<&str>) -> Self {
        Self {
            labels: parse_array(LABELS_ATTR, labels),
            values: parse_array(VALUES_ATTR, values),
        }
    }

    pub fn from_element(element: &Element) -> Self {
        Self::from_attributes(
            element.get_attribute(LABELS_ATTR).as_deref(),
            element.get_attribute(VALUES_ATTR).as_deref(),
        )
    }
}

fn parse_array<T: serde::de::DeserializeOwned>(attr: &str, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::warn!("ignoring malformed {}: {}", attr, e);
        Vec::new()
    })
}

// ========================
// Chart.js configuration
// ========================

#[derive(Debug, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_radius: u32,
}

#[derive(Debug, Serialize)]
pub struct ChartOptions {
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

impl ChartConfig {
    /// Single dataset, legend hidden, y axis from zero
    pub fn bar(series: Series, style: &ChartStyle) -> Self {
        Self {
            kind: "bar",
            data: ChartData {
                labels: series.labels,
                datasets: vec![Dataset {
                    label: style.dataset_label.clone(),
                    data: series.values,
                    background_color: style.background_color.clone(),
                    border_radius: style.border_radius,
                }],
            },
            options: ChartOptions {
                plugins: Plugins { legend: Legend { display: false } },
                scales: Scales { y: Axis { begin_at_zero: true } },
            },
        }
    }
}

/// Draw the chart if the page has a chart canvas. Returns whether one was drawn.
pub fn render(document: &Document, style: &ChartStyle) -> bool {
    let Some(element) = document.get_element_by_id(&style.element_id) else {
        return false;
    };
    let series = Series::from_element(&element);

    let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
        log::warn!("#{} is not a <canvas>, skipping chart", style.element_id);
        return false;
    };
    let context = match canvas.get_context("2d") {
        Ok(Some(context)) => context,
        _ => {
            log::warn!("no 2d context on #{}", style.element_id);
            return false;
        }
    };

    let config = ChartConfig::bar(series, style);
    let js_config = match config.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("chart config not serializable: {}", e);
            return false;
        }
    };

    match ChartJs::new(&context, &js_config) {
        Ok(_) => {
            log::debug!("rendered #{} with {} bars", style.element_id, config.data.labels.len());
            true
        }
        Err(e) => {
            log::warn!("Chart.js failed on #{}: {:?}", style.element_id, e);
            false
        }
    }
}
