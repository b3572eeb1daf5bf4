use crate::types::empty_string_as_none;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Collection documents do not carry their own id, it is injected from
    /// the collection key after fetching.
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub thumbnail: Option<Url>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub video: Option<Url>,
}
