// src/utils/log.rs

//! Console reporting for CLI runs.
//!
//! Report lines go to stdout with a timestamp and level tag; warnings and
//! errors go to stderr. Diagnostic logging through the `log` facade is
//! separate and configured by the binary.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

use crate::models::LoggingConfig;

static LEVEL: OnceLock<Level> = OnceLock::new();
static PROGRESS: AtomicBool = AtomicBool::new(true);

const RULE_WIDTH: usize = 60;

/// Report verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Parse a level name; unknown names fall back to `Info`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Level::Debug,
            "warn" | "warning" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }
}

/// Set the report level once per process. Later calls are ignored.
pub fn init(config: &LoggingConfig, quiet: bool) {
    let level = if quiet {
        Level::Warn
    } else {
        Level::parse(&config.level)
    };
    let _ = LEVEL.set(level);
    PROGRESS.store(config.show_progress && !quiet, Ordering::Relaxed);
}

fn enabled(level: Level) -> bool {
    level >= LEVEL.get().copied().unwrap_or(Level::Info)
}

fn format_line(level: Level, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{timestamp}] [{}] {message}", level.tag())
}

fn emit(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    let line = format_line(level, message);
    if level >= Level::Warn {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn debug(message: &str) {
    emit(Level::Debug, message);
}

pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

/// Completion message, shown unless output is quiet.
pub fn success(message: &str) {
    emit(Level::Info, &format!("✓ {message}"));
}

/// Progress line for long runs; silenced by `show_progress = false`.
pub fn progress(done: usize, total: usize, message: &str) {
    if PROGRESS.load(Ordering::Relaxed) {
        emit(Level::Info, &format!("[{done}/{total}] {message}"));
    }
}

pub fn separator() {
    emit(Level::Info, &"─".repeat(RULE_WIDTH));
}

pub fn header(title: &str) {
    let border = "═".repeat(RULE_WIDTH);
    emit(Level::Info, &border);
    emit(Level::Info, &format!("  {title}"));
    emit(Level::Info, &border);
}

/// Indented detail line under the previous entry.
pub fn sub_item(message: &str) {
    emit(Level::Info, &format!("    {message}"));
}

/// Titled block of `key: value` lines.
pub fn summary(title: &str, items: &[(&str, String)]) {
    if !enabled(Level::Info) {
        return;
    }
    println!();
    emit(Level::Info, &format!("[SUMMARY] {title}"));
    for (key, value) in items {
        emit(Level::Info, &format!("    {key}: {value}"));
    }
}
