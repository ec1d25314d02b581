//! Command-line front end.
//!
//! Each subcommand is one pass through the store:
//!
//! ```text
//! args → Config → initialize → Store::perform(request) → snapshot → view → stdout
//!                                       │
//!                                       └→ notifications → stderr
//! ```
//!
//! A failed operation prints its error notification and exits with status 1.

#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use candidate_admin::app::{AddressCascade, LookupRequest, Modal, Notification, NotificationLevel, Notifier};
use candidate_admin::client::ResourceClient;
use candidate_admin::domain::Place;
use candidate_admin::infrastructure::{expand_tilde, read_json_file};
use candidate_admin::operations::OperationKind;
use candidate_admin::view::{render_detail, render_table, DetailViewModel, TableViewModel};
use candidate_admin::{
    initialize, observability, ApplicationPatch, ApplicationStatus, Config, Event, NewApplication, OperationRequest,
    OperationResponse, Operations, StatusChange, Store,
};

#[derive(Parser)]
#[command(name = "candidate-admin")]
#[command(about = "Review and manage candidate applications")]
struct Cli {
    /// Config file (default: ~/.config/candidate-admin/config.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Override the tracing level
    #[arg(long, value_name = "LEVEL", global = true)]
    trace_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List applications
    List {
        /// Fuzzy filter over applicant name and id
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one application
    Show { id: String },
    /// Submit a new application from a JSON file
    Create {
        #[arg(long, value_name = "PAYLOAD.json")]
        file: PathBuf,
    },
    /// Apply a partial update from a JSON file
    Update {
        id: String,
        #[arg(long, value_name = "PATCH.json")]
        file: PathBuf,
    },
    /// Delete an application
    Delete { id: String },
    /// Record a review decision
    Status {
        id: String,
        #[arg(value_name = "pending|approved|rejected")]
        status: ApplicationStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List states
    States,
    /// List the districts of a state
    Districts { state_id: String },
    /// List the legislative assemblies of a district
    Assemblies { district_id: String },
}

/// Prints notifications to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => eprintln!("ok: {}", notification.message),
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    observability::init_tracing(&config);

    let (store, operations) = initialize(&config, Arc::new(ConsoleNotifier))?;

    let succeeded = match cli.command {
        Command::List { search } => {
            let response = store.perform(&operations, OperationRequest::list()).await;
            let vm = TableViewModel::compute(&store.snapshot(), search.as_deref().unwrap_or_default());
            print!("{}", render_table(&vm));
            response.is_success()
        }
        Command::Show { id } => {
            store.dispatch(&Event::SetModal { modal: Modal::View, open: true });
            let response = store.perform(&operations, OperationRequest::get_by_id(id)).await;
            if let Some(app) = store.snapshot().selected_application {
                print!("{}", render_detail(&DetailViewModel::from_application(&app)));
            }
            response.is_success()
        }
        Command::Create { file } => {
            let payload: NewApplication = read_json(&file)?;
            store.dispatch(&Event::SetModal { modal: Modal::Create, open: true });
            let response = store.perform(&operations, OperationRequest::create(payload)).await;
            print_record(&response)
        }
        Command::Update { id, file } => {
            let patch: ApplicationPatch = read_json(&file)?;
            store.dispatch(&Event::SetModal { modal: Modal::Update, open: true });
            let response = store.perform(&operations, OperationRequest::update(id, patch)).await;
            print_record(&response)
        }
        Command::Delete { id } => store
            .perform(&operations, OperationRequest::delete(id))
            .await
            .is_success(),
        Command::Status { id, status, notes } => {
            store.dispatch(&Event::SetModal { modal: Modal::Status, open: true });
            let change = StatusChange::new(status, notes);
            let response = store.perform(&operations, OperationRequest::update_status(id, change)).await;
            print_record(&response)
        }
        Command::States => print_places(fetch_places(&store, &operations, &AddressCascade::initial_lookup()).await),
        Command::Districts { state_id } => {
            let mut cascade = AddressCascade::new();
            let request = cascade.select_state(state_id);
            let places = fetch_places(&store, &operations, &request).await.map(|places| {
                cascade.apply_lookup(&request, places);
                cascade.districts().to_vec()
            });
            print_places(places)
        }
        Command::Assemblies { district_id } => {
            let (mut cascade, request) = AddressCascade::from_district(district_id);
            let places = fetch_places(&store, &operations, &request).await.map(|places| {
                cascade.apply_lookup(&request, places);
                cascade.assemblies().to_vec()
            });
            print_places(places)
        }
    };

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Resolves configuration: file, then environment, then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            let default_path = PathBuf::from(expand_tilde(
                "~/.config/candidate-admin/config.toml",
            ));
            if default_path.exists() {
                Config::from_file(&default_path).with_context(|| format!("loading {}", default_path.display()))?
            } else {
                Config::default()
            }
        }
    };

    let mut config = config.apply_env();
    if let Some(url) = &cli.api_url {
        config.api_base_url.clone_from(url);
    }
    if let Some(level) = &cli.trace_level {
        config.trace_level = Some(level.clone());
    }
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    read_json_file(path).with_context(|| format!("reading {}", path.display()))
}

fn print_record(response: &OperationResponse) -> bool {
    match response {
        OperationResponse::Created { application }
        | OperationResponse::Updated { application }
        | OperationResponse::StatusUpdated { application } => {
            print!("{}", render_detail(&DetailViewModel::from_application(application)));
            true
        }
        other => other.is_success(),
    }
}

/// Runs one address lookup. Failures go through the store so the notifier reports them.
async fn fetch_places<C: ResourceClient + ?Sized>(
    store: &Store,
    operations: &Operations<C>,
    request: &LookupRequest,
) -> Option<Vec<Place>> {
    match operations.places(request.level, request.parent_id.as_deref()).await {
        Ok(envelope) => Some(envelope.into_data()),
        Err(e) => {
            store.dispatch(&Event::Completed(OperationResponse::Failed {
                operation: OperationKind::AddressLookup,
                message: e.message,
            }));
            None
        }
    }
}

fn print_places(places: Option<Vec<Place>>) -> bool {
    let Some(places) = places else {
        return false;
    };
    for place in &places {
        println!("{:<26} {}", place.id, place.label());
    }
    true
}
