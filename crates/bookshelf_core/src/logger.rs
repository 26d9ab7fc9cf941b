//! Named application logger with a swappable output writer.
//!
//! # Responsibility
//! - Hand out one shared `Logger` per name for the whole process.
//! - Prefix messages with `LOG >>> ` and forward them to the active writer.
//!
//! # Invariants
//! - `Logger::named` with a known name returns the existing logger; the
//!   writer passed to `named_with_writer` is ignored in that case.
//! - Writer swaps are visible through every handle of the same logger.
//! - Writers never panic; write failures are reported through `log`.
//!
//! This logger is the user-facing journal. Diagnostic logging goes through
//! the `log` facade configured by `crate::logging`.

use crate::singleton::SingletonRegistry;
use log::warn;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

const LOG_PREFIX: &str = "LOG >>> ";

static LOGGERS: Lazy<SingletonRegistry<String, Logger>> = Lazy::new(SingletonRegistry::new);

/// Output sink for logger lines.
pub trait OutputWriter: Send + Sync {
    fn write(&self, text: &str);
}

/// Writes each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleWriter;

impl OutputWriter for ConsoleWriter {
    fn write(&self, text: &str) {
        println!("{text}");
    }
}

/// Appends each line to a file, creating it on first write.
#[derive(Debug, Clone)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, text: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{text}"));
        if let Err(err) = result {
            warn!(
                "event=logger_write module=logger status=error path={} error={err}",
                self.path.display()
            );
        }
    }
}

pub struct Logger {
    name: String,
    writer: Mutex<Arc<dyn OutputWriter>>,
}

impl Logger {
    /// Returns the process-wide logger for `name`, writing to the console
    /// when it has to be created.
    pub fn named(name: &str) -> Arc<Logger> {
        Self::named_with_writer(name, Arc::new(ConsoleWriter))
    }

    /// Returns the process-wide logger for `name`, using `writer` only when
    /// the logger does not exist yet.
    pub fn named_with_writer(name: &str, writer: Arc<dyn OutputWriter>) -> Arc<Logger> {
        LOGGERS.get_or_create(name.to_string(), |key| Logger {
            name: key.clone(),
            writer: Mutex::new(writer),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn writer(&self) -> Arc<dyn OutputWriter> {
        Arc::clone(&self.writer.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn set_writer(&self, writer: Arc<dyn OutputWriter>) {
        *self.writer.lock().unwrap_or_else(PoisonError::into_inner) = writer;
    }

    pub fn log(&self, text: &str) {
        self.writer().write(&format!("{LOG_PREFIX}{text}"));
    }
}

impl Debug for Logger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}
