//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.

use f1_seasons::utils::PerformanceBar;
use log::warn;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderPerformanceChart)]
    fn render_performance_chart_js(canvas_id: &str, bars: JsValue);

    #[wasm_bindgen(js_name = destroyPerformanceChart)]
    pub fn destroy_performance_chart(canvas_id: &str);
}

/// Draw one horizontal bar pair (time in minutes, laps) per driver.
pub fn render_performance_chart(canvas_id: &str, bars: &[PerformanceBar]) {
    match serde_wasm_bindgen::to_value(bars) {
        Ok(value) => render_performance_chart_js(canvas_id, value),
        Err(e) => warn!("Could not pass chart data to JS: {}", e),
    }
}
