//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → EnvFilter ─┬→ fmt layer → stderr
//!                      └→ tracing-opentelemetry → FileSpanExporter → OTLP JSON lines
//! ```
//!
//! - Spans are written to `~/.local/share/candidate-admin/candidate-admin-otlp.json`
//!   unless `trace_file` is configured.
//! - The file rotates past `trace_max_file_bytes` (10 MiB) keeping
//!   `trace_max_backups` (3) rotated copies.
//! - Level: `RUST_LOG`, then `trace_level`, then `info`.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with file export
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotationPolicy;
pub use init::init_tracing;
