//! The `{"data": ...}` wrapper the API puts around successful payloads.

use serde::{Deserialize, Serialize};

/// Successful response body of every API endpoint.
///
/// # Examples
///
/// ```
/// use candidate_admin::client::Envelope;
///
/// let body: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
/// assert_eq!(body.into_data(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub const fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
