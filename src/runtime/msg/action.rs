use serde::Deserialize;

use crate::{
    models::{
        chat_room::Selected as ChatRoomSelected,
        course_details::Selected as CourseDetailsSelected, player::Selected as PlayerSelected,
    },
    types::chat::ChatMessage,
    types::player::TransportErrorKind,
};

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionCtx {
    Logout,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionChatRoom {
    /// Replaces the messages of the active room with a fresh snapshot from
    /// the realtime backend.
    MessagesChanged(Vec<ChatMessage>),
    SendMessage { text: String },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionPlayer {
    TogglePlay,
    Seek {
        time: u64,
    },
    Skip {
        seconds: i64,
    },
    SetVolume {
        volume: f64,
    },
    ToggleMute,
    ToggleFullscreen,
    LoadStarted,
    MetadataLoaded {
        duration: u64,
    },
    CanPlay,
    TimeChanged {
        time: u64,
        duration: u64,
    },
    PausedChanged {
        paused: bool,
    },
    VolumeChanged {
        volume: f64,
        muted: bool,
    },
    FullscreenChanged {
        fullscreen: bool,
    },
    Ended,
    /// Error reported by the media element, carrying the `MediaError` code.
    MediaError {
        code: u32,
    },
    /// The adaptive transport has parsed the stream manifest and the stream
    /// is about to start buffering.
    ManifestParsed,
    /// Error reported by the adaptive transport.
    TransportError {
        kind: TransportErrorKind,
        fatal: bool,
        details: Option<String>,
    },
}

#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "model", content = "args")]
pub enum ActionLoad {
    ChatRoom(ChatRoomSelected),
    CourseCatalog,
    CourseDetails(CourseDetailsSelected),
    Player(Box<PlayerSelected>),
    Team,
}

/// Action messages
///
/// Those messages are meant to be dispatched only by the users of the
/// `magnetar-core` crate and handled by the `magnetar-core` crate.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum Action {
    Ctx(ActionCtx),
    ChatRoom(ActionChatRoom),
    Player(ActionPlayer),
    Load(ActionLoad),
    Unload,
}
