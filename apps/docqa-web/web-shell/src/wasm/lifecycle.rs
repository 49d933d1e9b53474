use super::*;

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Reads `window.__DOCQA_CONFIG__`. Returns the config in effect, where it
/// came from and, when overrides were present but rejected, why.
pub(super) fn read_config() -> (FormConfig, String, Option<String>) {
    let Some(window) = web_sys::window() else {
        return (FormConfig::default(), "default".to_string(), None);
    };
    let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_OVERRIDES_GLOBAL))
    else {
        return (FormConfig::default(), "default".to_string(), None);
    };
    if value.is_undefined() || value.is_null() {
        return (FormConfig::default(), "default".to_string(), None);
    }

    let raw = match js_sys::JSON::stringify(&value) {
        Ok(raw) => String::from(raw),
        Err(_) => {
            return (
                FormConfig::default(),
                "default".to_string(),
                Some(format!("{CONFIG_OVERRIDES_GLOBAL} is not serializable")),
            );
        }
    };
    match FormConfig::from_overrides_json(&raw) {
        Ok(config) => (config, CONFIG_OVERRIDES_GLOBAL.to_string(), None),
        Err(error) => (
            FormConfig::default(),
            "default".to_string(),
            Some(error.to_string()),
        ),
    }
}

/// Routes `tracing` output to the browser console, one call per event.
pub(super) fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: tracing::Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

struct ConsoleWriter {
    level: tracing::Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let message = JsValue::from_str(line);
        match self.level {
            tracing::Level::ERROR => web_sys::console::error_1(&message),
            tracing::Level::WARN => web_sys::console::warn_1(&message),
            tracing::Level::INFO => web_sys::console::log_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

pub(super) fn set_boot_phase(phase: &str, detail: &str) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.phase = phase.to_string();
        state.detail = detail.to_string();
        if phase != "error" {
            state.last_error = None;
        }
    });
    tracing::debug!(phase, detail, "form shell phase");
}

pub(super) fn set_boot_error(message: &str) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.phase = "error".to_string();
        state.detail = "startup failed".to_string();
        state.last_error = Some(message.to_string());
    });
    tracing::error!(error = message, "form shell failed to start");
}

pub(super) fn epoch_millis_now() -> u64 {
    let now = js_sys::Date::now();
    if !now.is_finite() || now.is_sign_negative() {
        return 0;
    }
    now.floor().min(u64::MAX as f64) as u64
}
