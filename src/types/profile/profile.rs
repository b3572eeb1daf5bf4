use crate::types::profile::User;
use serde::{Deserialize, Serialize};

pub type UID = Option<String>;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user: Option<User>,
}

impl Profile {
    pub fn uid(&self) -> UID {
        self.user.as_ref().map(|user| user.id.to_owned())
    }
}
