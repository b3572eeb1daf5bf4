use crate::runtime::EnvError;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(tag = "type")]
pub enum CtxError {
    Env(EnvError),
    Other(OtherError),
}

impl From<EnvError> for CtxError {
    fn from(error: EnvError) -> Self {
        CtxError::Env(error)
    }
}

impl From<OtherError> for CtxError {
    fn from(error: OtherError) -> Self {
        CtxError::Other(error)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OtherError {
    UserNotLoggedIn,
    CourseNotFound,
}

impl OtherError {
    pub fn message(&self) -> String {
        match &self {
            OtherError::UserNotLoggedIn => "User is not logged in".to_owned(),
            OtherError::CourseNotFound => "Course is not found on any backend".to_owned(),
        }
    }
    pub fn code(&self) -> u64 {
        match &self {
            OtherError::UserNotLoggedIn => 1,
            OtherError::CourseNotFound => 2,
        }
    }
}

impl Serialize for OtherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("OtherError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
