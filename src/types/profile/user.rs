use crate::constants::ANONYMOUS_USER_NAME;
use crate::types::empty_string_as_none;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub avatar: Option<Url>,
}

impl User {
    /// Name shown in the UI, with the placeholder used for accounts that have
    /// not set one.
    pub fn display_name(&self) -> String {
        self.name
            .to_owned()
            .unwrap_or_else(|| ANONYMOUS_USER_NAME.to_owned())
    }
    /// First letter of the display name, used as the avatar placeholder.
    pub fn initials(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|first| first.to_uppercase().to_string())
            .unwrap_or_else(|| "A".to_owned())
    }
}
