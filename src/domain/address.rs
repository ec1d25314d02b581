//! Address hierarchy references.
//!
//! Applications point at three nested administrative units: a State, a District
//! inside that State, and a Legislative Assembly constituency inside that
//! District. The API returns each unit as a `{_id, name}` pair, either populated
//! inline on an application or as the items of a lookup list.

use serde::{Deserialize, Serialize};

/// One administrative unit of the address hierarchy.
///
/// Deserializes from the populated form `{"_id": "...", "name": "..."}` and
/// from a bare id string, which the API sends when a reference is not
/// populated. A bare id yields an empty `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PlaceRepr")]
pub struct Place {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl Place {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns the display label, falling back to the id for unpopulated references.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaceRepr {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        name: String,
    },
}

impl From<PlaceRepr> for Place {
    fn from(repr: PlaceRepr) -> Self {
        match repr {
            PlaceRepr::Id(id) => Self { id, name: String::new() },
            PlaceRepr::Populated { id, name } => Self { id, name },
        }
    }
}

/// Level of the address hierarchy, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressLevel {
    State,
    District,
    LegislativeAssembly,
}

impl AddressLevel {
    /// Resource path of the lookup endpoint for this level.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::State => "states",
            Self::District => "districts",
            Self::LegislativeAssembly => "legislative-assemblies",
        }
    }
}
