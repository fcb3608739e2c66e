//! Logger module
//!
//! Provides logging utilities for the dispatcher console including:
//! - Startup logging
//! - Invocation logging with multiple formats
//! - Render, error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::InvocationLogEntry;
pub use writer::Level;

use crate::config::Config;
use crate::error::DispatchError;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<Level>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(
        level,
        config.logging.log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write a message, falling back to stdout/stderr before `init()`
fn write(level: Level, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        None => match level {
            Level::Error | Level::Warn => eprintln!("{message}"),
            Level::Info | Level::Debug => println!("{message}"),
        },
    }
}

pub fn log_startup(remote_base: &str, config: &Config) {
    write(Level::Info, "======================================");
    write(Level::Info, "Form dispatcher console started");
    write(Level::Info, &format!("Remote collaborator: {remote_base}"));
    write(
        Level::Info,
        &format!(
            "GET  {}?{}=<{}>  -> #{} (text)",
            config.endpoints.hello_path,
            config.endpoints.hello_param,
            config.page.get_input,
            config.page.get_output
        ),
    );
    write(
        Level::Info,
        &format!(
            "POST {} <{}>  -> #{} (markup)",
            config.endpoints.echo_path, config.page.post_input, config.page.post_output
        ),
    );
    write(Level::Info, &format!("Log level: {}", config.logging.level));
    write(
        Level::Info,
        &format!("Failure policy: {:?}", config.http.failure_policy),
    );
    if let Some(timeout) = config.http.timeout() {
        write(
            Level::Info,
            &format!("Request timeout: {}s", timeout.as_secs()),
        );
    }
    if let Some(ref path) = config.logging.log_file {
        write(Level::Info, &format!("Log file: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write(Level::Info, &format!("Error log: {path}"));
    }
    write(Level::Info, "Type 'help' for commands");
    write(Level::Info, "======================================\n");
}

/// Plain console output (command results, help text)
pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_invocation_sent(entry: &InvocationLogEntry, endpoint: &str, field_value: &str) {
    write(
        Level::Debug,
        &format!(
            "[Dispatch] #{} {} {} -> {endpoint} (field value {field_value:?}, {} bytes)",
            entry.id, entry.method, entry.target, entry.request_bytes
        ),
    );
}

/// Log formatted invocation log entry
pub fn log_invocation(entry: &InvocationLogEntry, format: &str) {
    write(Level::Info, &entry.format(format));
}

pub fn log_dispatch_failure(id: u64, dispatcher: &str, err: &DispatchError) {
    write(
        Level::Warn,
        &format!("[WARN] Invocation #{id} ({dispatcher}) failed: {err}"),
    );
}

pub fn log_render(element_id: &str, text: &str) {
    write(Level::Info, &format!("[Render] #{element_id} = {text:?}"));
}

pub fn log_error(message: &str) {
    write(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(Level::Warn, &format!("[WARN] {message}"));
}
