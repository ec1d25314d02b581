//! View model types representing renderable state.
//!
//! View models are immutable, display-ready projections of a
//! [`StoreSnapshot`]. They contain no business logic; the renderer only
//! formats what they hold.
//!
//! # Example
//!
//! ```
//! use candidate_admin::app::StoreSnapshot;
//! use candidate_admin::view::TableViewModel;
//! use candidate_admin::Application;
//!
//! let snapshot = StoreSnapshot {
//!     applications: vec![Application::new("a1", "Asha Menon"), Application::new("b2", "Ravi Kumar")],
//!     ..StoreSnapshot::default()
//! };
//!
//! let vm = TableViewModel::compute(&snapshot, "asha");
//! assert_eq!(vm.rows.len(), 1);
//! assert_eq!(vm.header.count, 1);
//! ```

use crate::app::StoreSnapshot;
use crate::domain::{Application, ApplicationStatus, Gender, Place};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const NAME_COLUMN_WIDTH: usize = 28;

/// Table of applications as shown by the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    pub header: HeaderInfo,
    pub rows: Vec<TableRow>,

    /// Set when there are no rows to show.
    pub empty_state: Option<EmptyState>,

    /// Loading indicator or error message shown above the table.
    pub banner: Option<Banner>,
}

/// One row of the applications table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub assembly: String,
    pub status: ApplicationStatus,
    pub team_size: usize,

    /// Whether this row is the store's selected application.
    pub is_selected: bool,

    /// Character ranges of `name` matched by the search query, exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Rows shown after filtering.
    pub count: usize,
    /// Records in the store.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Loading,
    Error(String),
}

impl TableViewModel {
    /// Builds the table from a snapshot, keeping rows whose name or id matches
    /// every whitespace-separated token of `query`.
    #[must_use]
    pub fn compute(snapshot: &StoreSnapshot, query: &str) -> Self {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let matcher = if tokens.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let _span = tracing::debug_span!(
            "compute_table",
            total = snapshot.applications.len(),
            tokens = tokens.len()
        )
        .entered();

        let selected_id = snapshot.selected_application.as_ref().map(|app| app.id.as_str());

        let rows: Vec<TableRow> = snapshot
            .applications
            .iter()
            .filter(|app| {
                matcher.as_ref().map_or(true, |m| {
                    let name = app.name.to_lowercase();
                    let id = app.id.to_lowercase();
                    tokens
                        .iter()
                        .all(|token| m.fuzzy_match(&name, token).is_some() || m.fuzzy_match(&id, token).is_some())
                })
            })
            .map(|app| {
                let name = truncate(&app.name, NAME_COLUMN_WIDTH);
                let ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| highlight_ranges(m, &name, &tokens));
                TableRow {
                    id: app.id.clone(),
                    name,
                    mobile: app.mobile.clone().unwrap_or_default(),
                    assembly: app
                        .legislative_assembly
                        .as_ref()
                        .map(|place| place.label().to_string())
                        .unwrap_or_default(),
                    status: app.status,
                    team_size: app.team_members.len(),
                    is_selected: selected_id == Some(app.id.as_str()),
                    highlight_ranges: ranges,
                }
            })
            .collect();

        tracing::debug!(rows = rows.len(), "table computed");

        let empty_state = rows.is_empty().then(|| {
            if snapshot.applications.is_empty() {
                EmptyState {
                    message: "No applications found".to_string(),
                    subtitle: "New submissions will appear here once received".to_string(),
                }
            } else {
                EmptyState {
                    message: "No applications match your search".to_string(),
                    subtitle: format!("Query: {query}"),
                }
            }
        });

        let banner = if snapshot.loading {
            Some(Banner::Loading)
        } else {
            snapshot.error.clone().map(Banner::Error)
        };

        Self {
            header: HeaderInfo {
                title: "Candidate Applications".to_string(),
                count: rows.len(),
                total: snapshot.applications.len(),
            },
            rows,
            empty_state,
            banner,
        }
    }
}

/// Read-only detail view of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub title: String,
    pub status: ApplicationStatus,
    /// `(label, value)` pairs in display order. Missing values render as `-`.
    pub fields: Vec<(&'static str, String)>,
    /// `name (mobile)` per team member, in received order.
    pub team_members: Vec<String>,
}

impl DetailViewModel {
    #[must_use]
    pub fn from_application(app: &Application) -> Self {
        let fields = vec![
            ("ID", app.id.clone()),
            ("Name", app.name.clone()),
            ("Father's name", text(app.father_name.as_deref())),
            ("Date of birth", date_of_birth(app)),
            ("Age", app.age.map_or_else(dash, |age| age.to_string())),
            ("Gender", app.gender.map_or_else(dash, |g| gender_label(g).to_string())),
            ("State", place(app.state.as_ref())),
            ("District", place(app.district.as_ref())),
            ("Assembly", place(app.legislative_assembly.as_ref())),
            ("Mobile", text(app.mobile.as_deref())),
            ("Email", text(app.email.as_deref())),
            ("Address", text(app.address.as_deref())),
            ("Education", text(app.education.as_deref())),
            ("Profession", text(app.profession.as_deref())),
            ("Annual income", app.annual_income.map_or_else(dash, |income| format!("{income:.2}"))),
            (
                "Contested before",
                app.contested_before
                    .map_or_else(dash, |yes| if yes { "Yes" } else { "No" }.to_string()),
            ),
            ("Previous election", text(app.previous_election_details.as_deref())),
            ("Biodata", text(app.biodata_url.as_deref())),
            ("Status", app.status.to_string()),
            ("Notes", text(app.notes.as_deref())),
            (
                "Submitted",
                app.created_at
                    .map_or_else(dash, |at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ),
        ];

        let team_members = app
            .team_members
            .iter()
            .map(|member| {
                if member.mobile.is_empty() {
                    member.name.clone()
                } else {
                    format!("{} ({})", member.name, member.mobile)
                }
            })
            .collect();

        Self {
            title: app.name.clone(),
            status: app.status,
            fields,
            team_members,
        }
    }
}

fn dash() -> String {
    "-".to_string()
}

fn text(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).map_or_else(dash, str::to_string)
}

fn place(value: Option<&Place>) -> String {
    value.map_or_else(dash, |p| p.label().to_string())
}

fn date_of_birth(app: &Application) -> String {
    match app.birth_date() {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => text(app.date_of_birth.as_deref()),
    }
}

const fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
        Gender::Other => "Other",
    }
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Coalesces the matched character indices of every token into ranges.
///
/// Indices are char positions in `text` as displayed; lowercasing is done per
/// char so the positions line up.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, tokens: &[String]) -> Vec<(usize, usize)> {
    let lower: String = text.chars().map(|c| c.to_lowercase().next().unwrap_or(c)).collect();
    let mut indices: Vec<usize> = tokens
        .iter()
        .filter_map(|token| matcher.fuzzy_indices(&lower, token))
        .flat_map(|(_score, indices)| indices)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
