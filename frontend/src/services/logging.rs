use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Console logger that tags each line with the emitting component.
///
/// Writes to the browser console on wasm and to stderr elsewhere, so the
/// reducer can be exercised by native test runs.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(Level::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(Level::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(Level::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(Level::Error, component, message);
    }

    /// Log a serializable snapshot as JSON at debug level
    pub fn debug_snapshot<T: Serialize>(component: &str, message: &str, snapshot: &T) {
        match serde_json::to_string(snapshot) {
            Ok(json) => Self::debug_with_component(component, &format!("{} {}", message, json)),
            Err(e) => Self::error_with_component(
                component,
                &format!("{} (snapshot failed: {})", message, e),
            ),
        }
    }

    fn format(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }

    #[cfg(target_arch = "wasm32")]
    fn log(level: Level, component: &str, message: &str) {
        let line = Self::format(component, message);
        match level {
            Level::Debug => gloo::console::debug!(line),
            Level::Info => gloo::console::info!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Error => gloo::console::error!(line),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn log(level: Level, component: &str, message: &str) {
        eprintln!("[{:?}] {}", level, Self::format(component, message));
    }
}
