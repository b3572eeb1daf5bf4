use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use url::Url;

pub const SCHEMA_VERSION_STORAGE_KEY: &str = "schema_version";
pub const PROFILE_STORAGE_KEY: &str = "profile";
pub const PROGRESS_STORAGE_KEY: &str = "course_progress";
pub const SCHEMA_VERSION: u32 = 1;
pub const PRIMARY_COURSES_COLLECTION: &str = "course";
pub const REALTIME_COURSES_COLLECTION: &str = "courses";
pub const MEMBERS_COLLECTION: &str = "members";
pub const CHATS_COLLECTION: &str = "chats";
pub const MESSAGES_SUB_COLLECTION: &str = "messages";
pub const ANONYMOUS_USER_NAME: &str = "Anonymous User";
pub const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

lazy_static! {
    pub static ref DOC_API_URL: Url =
        Url::parse("https://docs.magnetar-app.com").expect("DOC_API_URL parse failed");
    pub static ref REALTIME_API_URL: Url =
        Url::parse("https://realtime.magnetar-app.com").expect("REALTIME_API_URL parse failed");
}
