//! Candidate application domain model.
//!
//! This module defines [`Application`], the record administered by the crate,
//! together with the payloads sent to the API when creating, editing, or
//! reviewing one. Wire names are camelCase with a Mongo-style `_id`.
//!
//! Fields the model does not know about are kept in [`Application::extra`] so a
//! record fetched from the server and written back loses nothing.

use super::address::Place;
use super::error::AdminError;
use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of an application.
///
/// Absent on the wire means [`ApplicationStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Every status, in review order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                AdminError::InvalidValue(format!(
                    "unknown status '{wanted}' (expected pending, approved or rejected)"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(AdminError::InvalidValue(format!("unknown gender '{other}'"))),
        }
    }
}

/// A campaign team member listed on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub mobile: String,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile: mobile.into(),
        }
    }
}

/// A candidate application as returned by the API.
///
/// `id` is assigned by the server and never changes. `team_members` keeps the
/// order the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    /// Date of birth as sent by the server (ISO date or RFC 3339 timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::from_str_opt")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::from_str_opt")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legislative_assembly: Option<Place>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::from_str_opt")]
    pub annual_income: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::from_str_opt")]
    pub contested_before: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_election_details: Option<String>,

    #[serde(default)]
    pub team_members: Vec<TeamMember>,

    /// URL of the uploaded biodata document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biodata_url: Option<String>,

    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Fields not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Application {
    /// Creates a pending application with only an id and applicant name set.
    ///
    /// # Examples
    ///
    /// ```
    /// use candidate_admin::{Application, ApplicationStatus};
    ///
    /// let app = Application::new("a1", "Asha Menon");
    /// assert_eq!(app.status, ApplicationStatus::Pending);
    /// assert!(app.team_members.is_empty());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            father_name: None,
            date_of_birth: None,
            age: None,
            gender: None,
            state: None,
            district: None,
            legislative_assembly: None,
            mobile: None,
            email: None,
            address: None,
            education: None,
            profession: None,
            annual_income: None,
            contested_before: None,
            previous_election_details: None,
            team_members: Vec::new(),
            biodata_url: None,
            status: ApplicationStatus::Pending,
            notes: None,
            created_at: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Parses the date of birth, accepting `YYYY-MM-DD` or a full RFC 3339 timestamp.
    #[must_use]
    pub fn birth_date(&self) -> Option<chrono::NaiveDate> {
        let raw = self.date_of_birth.as_deref()?.trim();
        chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

/// Payload for creating an application. The server assigns id and status.
///
/// Address references are sent as ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legislative_assembly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contested_before: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_election_details: Option<String>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biodata_url: Option<String>,
}

/// Partial update payload. Only fields set to `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legislative_assembly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contested_before: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_election_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<TeamMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biodata_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload of a review decision: the new status and optional reviewer notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StatusChange {
    #[must_use]
    pub const fn new(status: ApplicationStatus, notes: Option<String>) -> Self {
        Self { status, notes }
    }
}
