// Console logging and clock helpers shared by the view and the sync transports
use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::JsValue;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(on: bool) {
    VERBOSE.store(on, Ordering::Relaxed);
}

/// Debug log; silent unless the page was opened with `debug=1`.
pub fn clog(msg: &str) {
    if VERBOSE.load(Ordering::Relaxed) {
        web_sys::console::log_1(&JsValue::from_str(msg));
    }
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
