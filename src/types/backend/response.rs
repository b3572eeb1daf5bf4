use serde::{Deserialize, Serialize};
use serde_with::{serde_as, MapSkipError};
use std::collections::HashMap;

/// Envelope returned by push-style POSTs. The backend generates the key of
/// the pushed document and returns it as `name`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct PushResponse {
    pub name: String,
}

/// Collection endpoints return an object keyed by document id, or `null`
/// when the collection is empty. Documents that fail to deserialize are
/// skipped rather than failing the whole collection.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct CollectionResponse<T>(
    #[serde_as(as = "Option<MapSkipError<_, _>>")] pub Option<HashMap<String, T>>,
);

impl<T> CollectionResponse<T> {
    pub fn into_items(self) -> HashMap<String, T> {
        self.0.unwrap_or_default()
    }
}
