//! Browser console logger for the `log` facade.
//!
//! Lines look like `[INFO api] loaded 3 projects`: level plus the module path
//! with the crate prefix stripped.

use log::{Level, LevelFilter, Log, Metadata, Record};

const CRATE_PREFIX: &str = "manageme_ui::";

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    // set_logger fails once a logger is installed; the level still applies
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let line = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    let target = target.strip_prefix(CRATE_PREFIX).unwrap_or(target);
    format!("[{} {}] {}", level, target, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_strips_crate_prefix() {
        let line = format_line(Level::Warn, "manageme_ui::api", "request failed");
        assert_eq!(line, "[WARN api] request failed");
    }

    #[test]
    fn test_format_keeps_foreign_targets() {
        let line = format_line(Level::Info, "leptos_router", "navigated");
        assert_eq!(line, "[INFO leptos_router] navigated");
    }
}
