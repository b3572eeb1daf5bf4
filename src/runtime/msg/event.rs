use serde::Serialize;

use crate::{
    models::ctx::CtxError,
    types::{
        chat::ChatRoomId,
        player::{PlaybackError, PlayerCommand},
        profile::UID,
    },
};

///
/// Those messages are meant to be dispatched by the `magnetar-core` crate and
/// handled by the users of the `magnetar-core` crate and by the `magnetar-core`
/// crate itself.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "event", content = "args")]
pub enum Event {
    /// Command for the media element or the adaptive transport, to be applied
    /// by the user of the crate.
    PlayerCommand {
        command: PlayerCommand,
    },
    /// The playback has failed and the session cannot recover from it.
    PlayerErrored {
        error: PlaybackError,
    },
    PlayerEnded,
    ProfilePushedToStorage {
        uid: UID,
    },
    CourseProgressPushedToStorage {
        uid: UID,
    },
    UserLoggedOut {
        uid: UID,
    },
    ChatMessageSent {
        room: ChatRoomId,
    },
    Error {
        error: CtxError,
        source: Box<Event>,
    },
}
