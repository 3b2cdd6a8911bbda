//! Structured event log.
//!
//! Controllers and the app emit `tracing` events under `wordpanel::*` targets.
//! With `--logs` they are written as JSON lines to one file in the temp dir;
//! without it no subscriber is installed and the events cost nothing. Typed
//! translations and deck titles are only recorded with `--log-content`.

use crate::config::AppConfig;
use std::env;
use std::fs::{self, OpenOptions};
use std::panic::PanicHookInfo;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

/// A log bigger than this at startup is discarded rather than appended to.
const LOG_CAP_BYTES: u64 = 4 * 1024 * 1024;

static CONTENT_ENABLED: AtomicBool = AtomicBool::new(false);
static SUBSCRIBER_INSTALLED: OnceLock<bool> = OnceLock::new();

/// `WORDPANEL_LOG_FILE`, or `wordpanel.jsonl` in the temp dir.
pub fn log_file_path() -> PathBuf {
    env::var_os("WORDPANEL_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("wordpanel.jsonl"))
}

pub fn content_logging_enabled() -> bool {
    CONTENT_ENABLED.load(Ordering::Relaxed)
}

/// Install the JSON writer when logging is enabled. Returns whether events
/// are being recorded.
pub fn init_logging(config: &AppConfig) -> bool {
    let enabled = config.logging_enabled();
    CONTENT_ENABLED.store(enabled && config.log_content, Ordering::Relaxed);
    if !enabled {
        return false;
    }
    *SUBSCRIBER_INSTALLED.get_or_init(|| {
        let path = log_file_path();
        let oversized = fs::metadata(&path).is_ok_and(|meta| meta.len() > LOG_CAP_BYTES);
        let file = match OpenOptions::new()
            .create(true)
            .append(!oversized)
            .write(true)
            .truncate(oversized)
            .open(&path)
        {
            Ok(file) => file,
            Err(_) => return false,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).is_ok()
    })
}

/// Record a panic's location. The payload may echo user text, so it is kept
/// only when content logging is on.
pub fn record_panic(info: &PanicHookInfo<'_>) {
    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown".to_string());
    if content_logging_enabled() {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|text| (*text).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        tracing::error!(target: "wordpanel::panic", %location, %payload, "panic");
    } else {
        tracing::error!(target: "wordpanel::panic", %location, "panic");
    }
}

/// Run `f` with a JSON subscriber scoped to this thread and return what it wrote.
#[cfg(test)]
pub(crate) fn capture_events(f: impl FnOnce()) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut bytes) = self.0.lock() {
                bytes.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || Sink(Arc::clone(&sink)))
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.lock().map(|b| b.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn disabled_logging_installs_nothing() {
        let config = AppConfig::parse_from(["test-app", "--log-content"]);
        assert!(!init_logging(&config));
        assert!(!content_logging_enabled());
    }

    #[test]
    fn captured_events_carry_structured_fields() {
        let output = capture_events(|| {
            tracing::info!(target: "wordpanel::store", word_id = 4, outcome = "updated", "word saved");
        });
        assert!(output.contains(r#""word_id":4"#));
        assert!(output.contains(r#""outcome":"updated""#));
        assert!(output.contains("wordpanel::store"));
    }
}
