//! Address hierarchy lookups.
//!
//! Same contract as the application wrappers: one call, an envelope on
//! success, an extracted message on failure.

use super::handler::{OperationError, Operations};
use super::messages::OperationKind;
use crate::client::{Envelope, ResourceClient};
use crate::domain::{AddressLevel, Place};
use tracing::Instrument;

impl<C: ResourceClient + ?Sized> Operations<C> {
    /// Lists the places of `level` under `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn places(&self, level: AddressLevel, parent_id: Option<&str>) -> Result<Envelope<Vec<Place>>, OperationError> {
        let span = tracing::debug_span!("address_lookup", level = ?level, parent_id = ?parent_id);
        self.client()
            .list_places(level, parent_id)
            .instrument(span)
            .await
            .map_err(|e| Self::failure(OperationKind::AddressLookup, &e))
    }

    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn states(&self) -> Result<Envelope<Vec<Place>>, OperationError> {
        self.places(AddressLevel::State, None).await
    }

    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn districts(&self, state_id: &str) -> Result<Envelope<Vec<Place>>, OperationError> {
        self.places(AddressLevel::District, Some(state_id)).await
    }

    /// # Errors
    ///
    /// Returns the extracted failure message if the call fails.
    pub async fn assemblies(&self, district_id: &str) -> Result<Envelope<Vec<Place>>, OperationError> {
        self.places(AddressLevel::LegislativeAssembly, Some(district_id)).await
    }
}
