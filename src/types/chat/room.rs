use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical id of a one to one chat room: the two member ids sorted
/// lexicographically and joined with `_`, so that both members compute the
/// same room id regardless of who opens the room.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct ChatRoomId(String);

impl ChatRoomId {
    pub fn from_members(member: &str, other_member: &str) -> Self {
        let mut members = [member, other_member];
        members.sort_unstable();
        ChatRoomId(members.join("_"))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChatRoomId {
    fn from(id: String) -> Self {
        ChatRoomId(id)
    }
}

impl fmt::Display for ChatRoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
