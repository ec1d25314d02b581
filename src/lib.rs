//! candidate-admin: client-side state and API access for reviewing candidate applications.
//!
//! The crate provides:
//! - Typed records for applications and their address hierarchy
//! - A REST client for the candidate-applications API
//! - Async operation wrappers that reduce every failure to a user-facing message
//! - A store mirroring the server's collection, changed only through named events
//! - View models and plain-text renderers for a list and a detail view

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Store + reducer
//! │  - Event handling                                   │
//! │  - Notifications                                    │
//! │  - Address cascade                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View Layer    │   │ Operations    │   │ Client        │
//! │ (view/)       │   │ (operations/) │   │ (client/)     │
//! │ - View models │   │ - Wrappers    │   │ - HTTP        │
//! │ - Rendering   │   │ - Lifecycle   │   │ - Envelope    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Application model (domain/application)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/candidate-admin/config.toml
//! api_base_url = "https://admin.example.org/api"
//! request_timeout_secs = 15
//! api_token = "..."
//! trace_level = "debug"
//! ```
//!
//! `CANDIDATE_ADMIN_API_URL` and `CANDIDATE_ADMIN_API_TOKEN` override the file.
//!
//! # Example
//!
//! ```no_run
//! use candidate_admin::app::TracingNotifier;
//! use candidate_admin::operations::OperationRequest;
//! use candidate_admin::{initialize, Config};
//! use std::sync::Arc;
//!
//! # async fn run() -> candidate_admin::Result<()> {
//! let (store, operations) = initialize(&Config::default(), Arc::new(TracingNotifier))?;
//! store.perform(&operations, OperationRequest::list()).await;
//! println!("{} applications", store.snapshot().applications.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod operations;
pub mod view;

pub use app::{handle_event, Action, AppState, Event, Modal, Notification, Notifier, Store, StoreSnapshot};
pub use client::{HttpResourceClient, ResourceClient};
pub use domain::{AdminError, Application, ApplicationPatch, ApplicationStatus, NewApplication, Result, StatusChange};
pub use operations::{OperationRequest, OperationResponse, Operations};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TRACE_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_TRACE_MAX_BACKUPS: usize = 3;

pub const ENV_API_URL: &str = "CANDIDATE_ADMIN_API_URL";
pub const ENV_API_TOKEN: &str = "CANDIDATE_ADMIN_API_TOKEN";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the REST API, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,

    /// Per-request timeout. Default: 30 seconds.
    pub request_timeout_secs: u64,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// OTLP trace file. Default: `<data dir>/candidate-admin-otlp.json`
    pub trace_file: Option<PathBuf>,

    pub trace_max_file_bytes: u64,
    pub trace_max_backups: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_token: None,
            trace_level: None,
            trace_file: None,
            trace_max_file_bytes: DEFAULT_TRACE_MAX_FILE_BYTES,
            trace_max_backups: DEFAULT_TRACE_MAX_BACKUPS,
        }
    }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    api_token: Option<String>,
    trace_level: Option<String>,
    trace_file: Option<String>,
    trace_max_file_bytes: Option<u64>,
    trace_max_backups: Option<usize>,
}

impl Config {
    /// Parses configuration from a string map with fallback defaults.
    ///
    /// Blank values are ignored. Numbers that fail to parse keep their default.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use candidate_admin::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base_url".to_string(), "https://admin.example.org/api".to_string());
    /// map.insert("request_timeout_secs".to_string(), "abc".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_base_url, "https://admin.example.org/api");
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            api_base_url: get("api_base_url").unwrap_or(defaults.api_base_url),
            request_timeout_secs: get("request_timeout_secs")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            api_token: get("api_token"),
            trace_level: get("trace_level"),
            trace_file: get("trace_file").map(|p| PathBuf::from(infrastructure::expand_tilde(&p))),
            trace_max_file_bytes: get("trace_max_file_bytes")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trace_max_file_bytes),
            trace_max_backups: get("trace_max_backups")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trace_max_backups),
        }
    }

    /// Loads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Io`] if the file cannot be read, or
    /// [`AdminError::Config`] if it is not valid TOML or has unknown keys.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)
            .map_err(|e| AdminError::Config(format!("failed to parse {}: {e}", path.display())))?;

        let defaults = Self::default();
        Ok(Self {
            api_base_url: file.api_base_url.unwrap_or(defaults.api_base_url),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(defaults.request_timeout_secs),
            api_token: file.api_token,
            trace_level: file.trace_level,
            trace_file: file.trace_file.map(|p| PathBuf::from(infrastructure::expand_tilde(&p))),
            trace_max_file_bytes: file.trace_max_file_bytes.unwrap_or(defaults.trace_max_file_bytes),
            trace_max_backups: file.trace_max_backups.unwrap_or(defaults.trace_max_backups),
        })
    }

    /// Applies `CANDIDATE_ADMIN_API_URL` and `CANDIDATE_ADMIN_API_TOKEN` when set.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        self
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builds the HTTP client, the operation wrappers over it, and an empty store.
///
/// # Errors
///
/// Returns [`AdminError::Config`] if `api_base_url` is not an http(s) URL, or
/// [`AdminError::Client`] if the HTTP client cannot be built.
pub fn initialize(config: &Config, notifier: Arc<dyn Notifier>) -> Result<(Store, Operations<HttpResourceClient>)> {
    tracing::debug!(api_base_url = %config.api_base_url, "initializing candidate-admin");

    let client = HttpResourceClient::new(&config.api_base_url, config.request_timeout(), config.api_token.clone())?;
    let operations = Operations::new(Arc::new(client));

    Ok((Store::new(notifier), operations))
}
