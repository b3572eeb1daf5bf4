use serde::Serialize;
use url::Url;

/// Imperative directive for the media element or the adaptive transport,
/// emitted as [`Event::PlayerCommand`] and applied by the user of the crate.
///
/// [`Event::PlayerCommand`]: crate::runtime::msg::Event::PlayerCommand
#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(tag = "command", content = "args")]
pub enum PlayerCommand {
    AttachStream { source: Url },
    ReleaseStream,
    StartLoad,
    RecoverMedia,
    Play,
    Pause,
    SeekTo { time: u64 },
    SetVolume { volume: f64 },
    SetMuted { muted: bool },
    SetFullscreen { fullscreen: bool },
}
