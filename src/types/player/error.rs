use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Error category reported by the adaptive transport.
#[derive(Clone, Copy, PartialEq, Eq, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum TransportErrorKind {
    Network,
    Media,
    Mux,
    Key,
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackErrorKind {
    Aborted,
    Network,
    Decode,
    Unsupported,
    Unknown,
}

impl PlaybackErrorKind {
    /// Maps the `MediaError.code` constants of the media element.
    pub fn from_media_error_code(code: u32) -> Self {
        match code {
            1 => PlaybackErrorKind::Aborted,
            2 => PlaybackErrorKind::Network,
            3 => PlaybackErrorKind::Decode,
            4 => PlaybackErrorKind::Unsupported,
            _ => PlaybackErrorKind::Unknown,
        }
    }
    pub fn from_transport(kind: TransportErrorKind) -> Self {
        match kind {
            TransportErrorKind::Network => PlaybackErrorKind::Network,
            TransportErrorKind::Media => PlaybackErrorKind::Decode,
            TransportErrorKind::Mux | TransportErrorKind::Key | TransportErrorKind::Other => {
                PlaybackErrorKind::Unknown
            }
        }
    }
    pub fn message(&self) -> &'static str {
        match self {
            PlaybackErrorKind::Aborted => "Playback aborted by the user.",
            PlaybackErrorKind::Network => "Network error prevented video download.",
            PlaybackErrorKind::Decode => {
                "Format error. The video might be corrupted or use an unsupported format."
            }
            PlaybackErrorKind::Unsupported => "The video format is not supported by your browser.",
            PlaybackErrorKind::Unknown => "Unknown error occurred.",
        }
    }
    pub fn code(&self) -> u32 {
        match self {
            PlaybackErrorKind::Aborted => 1,
            PlaybackErrorKind::Network => 2,
            PlaybackErrorKind::Decode => 3,
            PlaybackErrorKind::Unsupported => 4,
            PlaybackErrorKind::Unknown => 0,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PlaybackError {
    pub kind: PlaybackErrorKind,
    pub message: String,
}

impl PlaybackError {
    pub fn from_media_error_code(code: u32) -> Self {
        PlaybackErrorKind::from_media_error_code(code).into()
    }
    pub fn from_transport(kind: TransportErrorKind) -> Self {
        PlaybackErrorKind::from_transport(kind).into()
    }
}

impl From<PlaybackErrorKind> for PlaybackError {
    fn from(kind: PlaybackErrorKind) -> Self {
        PlaybackError {
            kind,
            message: kind.message().to_owned(),
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Serialize for PlaybackError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PlaybackError", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("code", &self.kind.code())?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}
