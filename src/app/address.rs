//! Cascading State → District → Assembly selector.
//!
//! The create and update forms pick an address one level at a time: choosing a
//! state loads its districts, choosing a district loads its assemblies. This
//! module keeps the lists and selections for that cascade and tells the caller
//! which lookup to run next. It performs no I/O.

use crate::domain::{AddressLevel, Application, ApplicationPatch, NewApplication, Place};

/// A lookup the caller should run through
/// [`Operations::places`](crate::operations::Operations::places).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub level: AddressLevel,
    pub parent_id: Option<String>,
}

impl LookupRequest {
    fn new(level: AddressLevel, parent_id: Option<&str>) -> Self {
        Self {
            level,
            parent_id: parent_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCascade {
    states: Vec<Place>,
    districts: Vec<Place>,
    assemblies: Vec<Place>,
    state: Option<String>,
    district: Option<String>,
    assembly: Option<String>,
}

impl AddressCascade {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lookup that fills the top level.
    #[must_use]
    pub fn initial_lookup() -> LookupRequest {
        LookupRequest::new(AddressLevel::State, None)
    }

    /// Starts a cascade at a known district with no state selected.
    ///
    /// Returns the assembly lookup for that district.
    pub fn from_district(id: impl Into<String>) -> (Self, LookupRequest) {
        let id = id.into();
        let lookup = LookupRequest::new(AddressLevel::LegislativeAssembly, Some(&id));
        let cascade = Self {
            district: Some(id),
            ..Self::default()
        };
        (cascade, lookup)
    }

    /// Selects a state, clearing everything below it.
    pub fn select_state(&mut self, id: impl Into<String>) -> LookupRequest {
        let id = id.into();
        self.clear_below_state();
        let lookup = LookupRequest::new(AddressLevel::District, Some(&id));
        self.state = Some(id);
        lookup
    }

    /// Selects a district under the current state, clearing the assembly level.
    ///
    /// Returns `None` when no state is selected.
    pub fn select_district(&mut self, id: impl Into<String>) -> Option<LookupRequest> {
        self.state.as_ref()?;
        let id = id.into();
        self.clear_below_district();
        let lookup = LookupRequest::new(AddressLevel::LegislativeAssembly, Some(&id));
        self.district = Some(id);
        Some(lookup)
    }

    /// Selects an assembly. Returns `false` when no district is selected.
    pub fn select_assembly(&mut self, id: impl Into<String>) -> bool {
        if self.district.is_none() {
            return false;
        }
        self.assembly = Some(id.into());
        true
    }

    pub fn clear_state(&mut self) {
        self.state = None;
        self.clear_below_state();
    }

    /// Stores lookup results.
    ///
    /// Results whose parent is no longer the selected one are dropped and
    /// `false` is returned.
    pub fn apply_lookup(&mut self, request: &LookupRequest, places: Vec<Place>) -> bool {
        let (current_parent, slot) = match request.level {
            AddressLevel::State => (None, &mut self.states),
            AddressLevel::District => (self.state.as_deref(), &mut self.districts),
            AddressLevel::LegislativeAssembly => (self.district.as_deref(), &mut self.assemblies),
        };

        if request.level != AddressLevel::State && current_parent != request.parent_id.as_deref() {
            tracing::debug!(
                level = ?request.level,
                requested = ?request.parent_id,
                current = ?current_parent,
                "discarding stale lookup result"
            );
            return false;
        }

        *slot = places;
        true
    }

    #[must_use]
    pub fn states(&self) -> &[Place] {
        &self.states
    }

    #[must_use]
    pub fn districts(&self) -> &[Place] {
        &self.districts
    }

    #[must_use]
    pub fn assemblies(&self) -> &[Place] {
        &self.assemblies
    }

    #[must_use]
    pub fn selected_state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    #[must_use]
    pub fn selected_district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    #[must_use]
    pub fn selected_assembly(&self) -> Option<&str> {
        self.assembly.as_deref()
    }

    /// Selected places at each level, named from the loaded lists when possible.
    #[must_use]
    pub fn selection(&self) -> (Option<Place>, Option<Place>, Option<Place>) {
        (
            resolve(&self.states, self.state.as_deref()),
            resolve(&self.districts, self.district.as_deref()),
            resolve(&self.assemblies, self.assembly.as_deref()),
        )
    }

    /// Seeds selections from an existing record, as the update form does.
    ///
    /// Returns the lookups needed to populate every level that has a selection.
    pub fn seed_from(&mut self, application: &Application) -> Vec<LookupRequest> {
        self.clear_state();
        let mut lookups = vec![Self::initial_lookup()];

        let Some(state) = &application.state else {
            return lookups;
        };
        lookups.push(self.select_state(state.id.clone()));

        let Some(district) = &application.district else {
            return lookups;
        };
        lookups.extend(self.select_district(district.id.clone()));

        if let Some(assembly) = &application.legislative_assembly {
            self.select_assembly(assembly.id.clone());
        }
        lookups
    }

    /// Writes the selected ids into a create payload.
    pub fn apply_to_new(&self, payload: &mut NewApplication) {
        payload.state.clone_from(&self.state);
        payload.district.clone_from(&self.district);
        payload.legislative_assembly.clone_from(&self.assembly);
    }

    /// Writes the selected ids into an update payload. Unselected levels are left unset.
    pub fn apply_to_patch(&self, patch: &mut ApplicationPatch) {
        if self.state.is_some() {
            patch.state.clone_from(&self.state);
        }
        if self.district.is_some() {
            patch.district.clone_from(&self.district);
        }
        if self.assembly.is_some() {
            patch.legislative_assembly.clone_from(&self.assembly);
        }
    }

    fn clear_below_state(&mut self) {
        self.districts.clear();
        self.district = None;
        self.clear_below_district();
    }

    fn clear_below_district(&mut self) {
        self.assemblies.clear();
        self.assembly = None;
    }
}

fn resolve(places: &[Place], id: Option<&str>) -> Option<Place> {
    let id = id?;
    Some(
        places
            .iter()
            .find(|place| place.id == id)
            .cloned()
            .unwrap_or_else(|| Place::new(id, "")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places(ids: &[&str]) -> Vec<Place> {
        ids.iter().map(|id| Place::new(*id, id.to_uppercase())).collect()
    }

    #[test]
    fn state_selection_clears_lower_levels() {
        let mut cascade = AddressCascade::new();
        let lookup = cascade.select_state("kl");
        assert!(cascade.apply_lookup(&lookup, places(&["tvm"])));
        let lookup = cascade.select_district("tvm").unwrap();
        assert!(cascade.apply_lookup(&lookup, places(&["nemom"])));
        assert!(cascade.select_assembly("nemom"));

        let lookup = cascade.select_state("tn");

        assert_eq!(lookup, LookupRequest::new(AddressLevel::District, Some("tn")));
        assert!(cascade.districts().is_empty());
        assert!(cascade.assemblies().is_empty());
        assert_eq!(cascade.selected_district(), None);
        assert_eq!(cascade.selected_assembly(), None);
    }

    #[test]
    fn lower_levels_need_a_parent() {
        let mut cascade = AddressCascade::new();
        assert_eq!(cascade.select_district("tvm"), None);
        assert!(!cascade.select_assembly("nemom"));
    }

    #[test]
    fn district_rooted_cascade_accepts_its_assemblies() {
        let (mut cascade, lookup) = AddressCascade::from_district("tvm");

        assert_eq!(lookup, LookupRequest::new(AddressLevel::LegislativeAssembly, Some("tvm")));
        assert!(cascade.apply_lookup(&lookup, places(&["nemom"])));
        assert_eq!(cascade.assemblies(), places(&["nemom"]).as_slice());
        assert!(cascade.select_assembly("nemom"));
        assert_eq!(cascade.selected_state(), None);

        let other = LookupRequest::new(AddressLevel::LegislativeAssembly, Some("ekm"));
        assert!(!cascade.apply_lookup(&other, places(&["kochi"])));
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut cascade = AddressCascade::new();
        let first = cascade.select_state("kl");
        let second = cascade.select_state("tn");

        assert!(!cascade.apply_lookup(&first, places(&["tvm"])));
        assert!(cascade.apply_lookup(&second, places(&["chennai"])));
        assert_eq!(cascade.districts(), places(&["chennai"]).as_slice());
    }

    #[test]
    fn selection_uses_loaded_names() {
        let mut cascade = AddressCascade::new();
        cascade.apply_lookup(&AddressCascade::initial_lookup(), places(&["kl"]));
        cascade.select_state("kl");
        cascade.select_district("unlisted");

        let (state, district, assembly) = cascade.selection();
        assert_eq!(state, Some(Place::new("kl", "KL")));
        assert_eq!(district, Some(Place::new("unlisted", "")));
        assert_eq!(assembly, None);
    }

    #[test]
    fn seeds_from_record_and_writes_payloads() {
        let mut record = Application::new("a1", "Asha");
        record.state = Some(Place::new("kl", "Kerala"));
        record.district = Some(Place::new("tvm", "Thiruvananthapuram"));
        record.legislative_assembly = Some(Place::new("nemom", "Nemom"));

        let mut cascade = AddressCascade::new();
        let lookups = cascade.seed_from(&record);

        assert_eq!(
            lookups,
            vec![
                LookupRequest::new(AddressLevel::State, None),
                LookupRequest::new(AddressLevel::District, Some("kl")),
                LookupRequest::new(AddressLevel::LegislativeAssembly, Some("tvm")),
            ]
        );

        let mut payload = NewApplication::default();
        cascade.apply_to_new(&mut payload);
        assert_eq!(payload.legislative_assembly.as_deref(), Some("nemom"));

        cascade.clear_state();
        let mut patch = ApplicationPatch::default();
        cascade.apply_to_patch(&mut patch);
        assert_eq!(patch, ApplicationPatch::default());
    }
}
