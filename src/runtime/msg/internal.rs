use crate::runtime::EnvError;
use crate::types::backend::{DocRequest, PushResponse};
use crate::types::course::Course;
use crate::types::team::TeamMember;
use std::collections::HashMap;

//
// Those messages are meant to be dispatched and handled only inside magnetar-core crate
//
#[derive(Debug)]
pub enum Internal {
    /// Result for fetching a courses collection from the backend.
    CourseCatalogResult(DocRequest, Box<Result<HashMap<String, Course>, EnvError>>),
    /// Result for fetching a single course document from the backend.
    CourseResult(DocRequest, Box<Result<Option<Course>, EnvError>>),
    /// Result for fetching the members collection from the backend.
    TeamMembersResult(DocRequest, Box<Result<HashMap<String, TeamMember>, EnvError>>),
    /// Result for pushing a chat message to the backend.
    ChatMessagePushResult(DocRequest, Box<Result<PushResponse, EnvError>>),
    /// Dispatched when the watched progress of a course needs to be updated
    /// in the memory and storage.
    UpdateCourseProgress(String, u32),
    /// Dispatched when the progress bucket changes.
    ProgressChanged,
    /// Dispatched when the profile changes.
    ProfileChanged,
}
