use std::io;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::LoggingError;

pub const DEFAULT_LOG_FILTER: &str = "tictactoe=info";

static LOGGER: OnceCell<()> = OnceCell::new();

/// Installs the global `tracing` subscriber. Later calls are no-ops.
///
/// `filter` uses `EnvFilter` directive syntax, e.g. `tictactoe=debug`.
pub fn init_logging(filter: &str) -> Result<(), LoggingError> {
    LOGGER
        .get_or_try_init(|| {
            tracing_subscriber::fmt()
                .with_env_filter(parse_filter(filter)?)
                .without_time()
                .with_ansi(false)
                .with_writer(ConsoleMakeWriter)
                .try_init()
                .map_err(|err| LoggingError::Install(err.to_string()))
        })
        .map(|_| ())
}

fn parse_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|err| LoggingError::InvalidFilter {
        directive: filter.to_string(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, Copy, Default)]
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Buffers one formatted event and emits it as a single console line on drop.
#[derive(Debug, Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buf);
        console::emit(line.trim_end());
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console, js_name = log)]
        fn log(line: &str);
    }

    pub(super) fn emit(line: &str) {
        log(line);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod console {
    use std::io::Write;

    pub(super) fn emit(line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}
