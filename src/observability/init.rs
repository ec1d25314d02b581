//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros to two sinks: a compact stderr formatter and an
//! OpenTelemetry layer whose spans are exported to a rotating OTLP file.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "candidate-admin";
const DEFAULT_TRACE_FILE: &str = "candidate-admin-otlp.json";

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, else `config.trace_level`, else
/// `info`. Spans go to `config.trace_file`, defaulting to
/// `<data dir>/candidate-admin-otlp.json`. If that file's directory cannot be
/// created only the stderr layer is installed.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Never fails the caller.
///
/// # Example
///
/// ```no_run
/// use candidate_admin::observability::init_tracing;
/// use candidate_admin::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let otel_layer = trace_file(config).map(|path| {
        let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
        let policy = RotationPolicy {
            max_file_bytes: config.trace_max_file_bytes,
            max_backups: config.trace_max_backups,
        };
        let provider = tracer::create_tracer_provider(path, policy, resource, SERVICE_NAME);
        OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(otel_layer)
        .try_init();
}

/// Resolves the trace file and makes sure its directory exists.
fn trace_file(config: &Config) -> Option<PathBuf> {
    let path = config
        .trace_file
        .clone()
        .unwrap_or_else(|| crate::infrastructure::paths::get_data_dir().join(DEFAULT_TRACE_FILE));

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).ok()?;
    }
    Some(path)
}
