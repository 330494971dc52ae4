//! Live printing of streamed chunks

use colored::{Color, Colorize};
use ensemble_application::StreamObserver;
use ensemble_domain::ModelResult;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::BrightRed,
];

#[derive(Default)]
struct PrinterState {
    /// Model whose chunk was printed last
    current: Option<String>,
    colors: HashMap<String, Color>,
}

impl PrinterState {
    fn color_for(&mut self, model_id: &str) -> Color {
        let next = PALETTE[self.colors.len() % PALETTE.len()];
        *self.colors.entry(model_id.to_string()).or_insert(next)
    }

    /// Text to print for `chunk`, with a `[model]` prefix whenever the
    /// speaking model changes.
    fn render(&mut self, model_id: &str, chunk: &str) -> String {
        let mut out = String::new();
        if self.current.as_deref() != Some(model_id) {
            if self.current.is_some() {
                out.push('\n');
            }
            let color = self.color_for(model_id);
            out.push_str(&format!("{} ", format!("[{}]", model_id).as_str().color(color).bold()));
            self.current = Some(model_id.to_string());
        }
        out.push_str(chunk);
        out
    }
}

/// Prints interleaved chunks from several models to stderr, prefixing a
/// line whenever the speaking model changes.
#[derive(Default)]
pub struct StreamPrinter {
    state: Mutex<PrinterState>,
}

impl StreamPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(text: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();
    }
}

impl StreamObserver for StreamPrinter {
    fn on_chunk(&self, model_id: &str, chunk: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        Self::emit(&state.render(model_id, chunk));
    }

    fn on_model_complete(&self, result: &ModelResult) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let status = if result.success {
            format!("{} {} finished in {}ms", "v".green(), result.model_id, result.latency_ms)
        } else {
            format!(
                "{} {} failed: {}",
                "x".red(),
                result.model_id,
                result.error_message.as_deref().unwrap_or("unknown error")
            )
        };
        Self::emit(&format!("\n{}\n", status));
        state.current = None;
    }
}
