use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_id: String,
    pub sender_name: String,
    pub sender_initials: String,
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}
