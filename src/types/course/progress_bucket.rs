use crate::types::profile::UID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CourseProgress {
    /// Watched part of the course video, in percent, `100` once completed.
    pub percent: u32,
    pub mtime: DateTime<Utc>,
}

#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct ProgressBucket {
    /// User ID
    pub uid: UID,
    /// [`HashMap`] key is the [`Course`]`.id`.
    ///
    /// [`Course`]: crate::types::course::Course
    pub items: HashMap<String, CourseProgress>,
}

impl ProgressBucket {
    pub fn new(uid: UID) -> Self {
        ProgressBucket {
            uid,
            items: HashMap::new(),
        }
    }
}
