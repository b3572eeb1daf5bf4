use crate::types::empty_string_as_none;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Collection documents do not carry their own id, it is injected from
    /// the collection key after fetching.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub avatar: Option<Url>,
    #[serde(default)]
    pub rank: String,
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub earnings: f64,
    /// Id of the member this member was recruited by.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub upline_id: Option<String>,
}
