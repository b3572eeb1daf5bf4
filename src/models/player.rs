use crate::models::common::eq_update;
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionLoad, ActionPlayer, Event, Internal, Msg};
use crate::runtime::{Effects, Env, UpdateWithCtx};
use crate::types::empty_string_as_none;
use crate::types::player::{PlaybackError, PlaybackErrorKind, PlayerCommand};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::cmp;
use url::Url;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Selected {
    pub source: Url,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub poster: Option<Url>,
    #[serde(default)]
    pub title: Option<String>,
    /// Id of the course the stream belongs to, used for watched progress
    /// tracking.
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub autoplay: bool,
}

/// State of the playback session, derived from the media element and the
/// adaptive transport events.
///
/// `Errored` is terminal. The session stays frozen in it until a new stream
/// is loaded.
#[derive(Derivative, Clone, PartialEq, Serialize, Debug)]
#[derivative(Default)]
#[serde(tag = "state", content = "args")]
pub enum StreamState {
    #[derivative(Default)]
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
    Errored(PlaybackError),
}

impl StreamState {
    #[inline]
    pub fn is_errored(&self) -> bool {
        matches!(self, StreamState::Errored(_))
    }
}

#[derive(Derivative, Clone, PartialEq, Serialize, Debug)]
#[derivative(Default)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    /// Playback position in milliseconds.
    pub time: u64,
    /// Stream duration in milliseconds, `0` until the metadata is loaded.
    pub duration: u64,
    #[derivative(Default(value = "1.0"))]
    pub volume: f64,
    pub muted: bool,
    #[derivative(Default(value = "true"))]
    pub paused: bool,
    pub fullscreen: bool,
    pub buffering: bool,
}

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub selected: Option<Selected>,
    pub stream_state: StreamState,
    pub controls: Controls,
    // recovery accounting for the current playback cycle, cleared once
    // playback makes progress again
    #[serde(skip)]
    load_retried: bool,
    #[serde(skip)]
    media_recovered: bool,
    #[serde(skip)]
    transport_attached: bool,
    #[serde(skip)]
    autoplay_requested: bool,
}

impl<E: Env + 'static> UpdateWithCtx<E> for Player {
    fn update(&mut self, msg: &Msg, _ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::Player(selected))) => {
                let release_effects = release_transport_update(&mut self.transport_attached);
                let progress_effects = watched_progress_update(&self.selected, &self.controls);
                let selected_effects =
                    eq_update(&mut self.selected, Some(*selected.to_owned()));
                let state_effects = eq_update(&mut self.stream_state, StreamState::Loading);
                let controls_effects = eq_update(&mut self.controls, Controls::default());
                self.load_retried = false;
                self.media_recovered = false;
                self.autoplay_requested = false;
                self.transport_attached = true;
                let attach_effects = Effects::msg(Msg::Event(Event::PlayerCommand {
                    command: PlayerCommand::AttachStream {
                        source: selected.source.to_owned(),
                    },
                }))
                .unchanged();
                release_effects
                    .join(progress_effects)
                    .join(selected_effects)
                    .join(state_effects)
                    .join(controls_effects)
                    .join(attach_effects)
            }
            Msg::Action(Action::Unload) => {
                let progress_effects = watched_progress_update(&self.selected, &self.controls);
                let release_effects = release_transport_update(&mut self.transport_attached);
                let selected_effects = eq_update(&mut self.selected, None);
                let state_effects = eq_update(&mut self.stream_state, StreamState::default());
                let controls_effects = eq_update(&mut self.controls, Controls::default());
                self.load_retried = false;
                self.media_recovered = false;
                self.autoplay_requested = false;
                progress_effects
                    .join(release_effects)
                    .join(selected_effects)
                    .join(state_effects)
                    .join(controls_effects)
            }
            Msg::Action(Action::Player(_)) if self.selected.is_none() => {
                Effects::none().unchanged()
            }
            Msg::Action(Action::Player(_)) if self.stream_state.is_errored() => {
                Effects::none().unchanged()
            }
            Msg::Action(Action::Player(ActionPlayer::TogglePlay)) => {
                let command = match self.controls.paused {
                    true => PlayerCommand::Play,
                    _ => PlayerCommand::Pause,
                };
                Effects::msg(Msg::Event(Event::PlayerCommand { command })).unchanged()
            }
            Msg::Action(Action::Player(ActionPlayer::Seek { time })) => {
                seek_update(&mut self.controls, *time)
            }
            Msg::Action(Action::Player(ActionPlayer::Skip { seconds })) => {
                let time = (self.controls.time as i64)
                    .saturating_add(seconds.saturating_mul(1000));
                seek_update(&mut self.controls, cmp::max(time, 0) as u64)
            }
            Msg::Action(Action::Player(ActionPlayer::SetVolume { volume })) => {
                let volume = volume.clamp(0.0, 1.0);
                let volume_effects = eq_update(&mut self.controls.volume, volume);
                let muted_effects = mute_update(&mut self.controls, volume == 0.0);
                let command_effects = Effects::msg(Msg::Event(Event::PlayerCommand {
                    command: PlayerCommand::SetVolume { volume },
                }))
                .unchanged();
                volume_effects.join(muted_effects).join(command_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::ToggleMute)) => {
                let muted = !self.controls.muted;
                mute_update(&mut self.controls, muted)
            }
            Msg::Action(Action::Player(ActionPlayer::ToggleFullscreen)) => {
                let fullscreen = !self.controls.fullscreen;
                let fullscreen_effects = eq_update(&mut self.controls.fullscreen, fullscreen);
                fullscreen_effects.join(
                    Effects::msg(Msg::Event(Event::PlayerCommand {
                        command: PlayerCommand::SetFullscreen { fullscreen },
                    }))
                    .unchanged(),
                )
            }
            Msg::Action(Action::Player(ActionPlayer::LoadStarted)) => {
                eq_update(&mut self.controls.buffering, true)
            }
            Msg::Action(Action::Player(ActionPlayer::MetadataLoaded { duration })) => {
                eq_update(&mut self.controls.duration, *duration)
            }
            Msg::Action(Action::Player(ActionPlayer::ManifestParsed)) => autoplay_update(
                &self.selected,
                &self.stream_state,
                &mut self.autoplay_requested,
            ),
            Msg::Action(Action::Player(ActionPlayer::CanPlay)) => {
                let buffering_effects = eq_update(&mut self.controls.buffering, false);
                let autoplay_effects = autoplay_update(
                    &self.selected,
                    &self.stream_state,
                    &mut self.autoplay_requested,
                );
                let state = match &self.stream_state {
                    StreamState::Loading if self.controls.paused => Some(StreamState::Paused),
                    StreamState::Loading => Some(StreamState::Playing),
                    _ => None,
                };
                let state_effects = match state {
                    Some(state) => eq_update(&mut self.stream_state, state),
                    _ => Effects::none().unchanged(),
                };
                buffering_effects.join(autoplay_effects).join(state_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::TimeChanged { time, duration })) => {
                if *time > self.controls.time {
                    self.load_retried = false;
                    self.media_recovered = false;
                }
                let time_effects = eq_update(&mut self.controls.time, *time);
                let duration_effects = eq_update(&mut self.controls.duration, *duration);
                time_effects.join(duration_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::PausedChanged { paused })) => {
                if !*paused {
                    self.load_retried = false;
                    self.media_recovered = false;
                }
                let paused_effects = eq_update(&mut self.controls.paused, *paused);
                let state = match (*paused, &self.stream_state) {
                    (false, _) => Some(StreamState::Playing),
                    (true, StreamState::Playing) => Some(StreamState::Paused),
                    _ => None,
                };
                let state_effects = match state {
                    Some(state) => eq_update(&mut self.stream_state, state),
                    _ => Effects::none().unchanged(),
                };
                paused_effects.join(state_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::VolumeChanged { volume, muted })) => {
                let volume_effects = eq_update(&mut self.controls.volume, *volume);
                let muted_effects = eq_update(&mut self.controls.muted, *muted);
                volume_effects.join(muted_effects)
            }
            Msg::Action(Action::Player(ActionPlayer::FullscreenChanged { fullscreen })) => {
                eq_update(&mut self.controls.fullscreen, *fullscreen)
            }
            Msg::Action(Action::Player(ActionPlayer::Ended)) => {
                let state_effects = eq_update(&mut self.stream_state, StreamState::Ended);
                let paused_effects = eq_update(&mut self.controls.paused, true);
                let progress_effects = match &self.selected {
                    Some(Selected {
                        course: Some(course_id),
                        ..
                    }) => Effects::msg(Msg::Internal(Internal::UpdateCourseProgress(
                        course_id.to_owned(),
                        100,
                    )))
                    .unchanged(),
                    _ => Effects::none().unchanged(),
                };
                state_effects
                    .join(paused_effects)
                    .join(progress_effects)
                    .join(Effects::msg(Msg::Event(Event::PlayerEnded)).unchanged())
            }
            Msg::Action(Action::Player(ActionPlayer::MediaError { code })) => fatal_error_update(
                &mut self.stream_state,
                &mut self.controls,
                &mut self.load_retried,
                &mut self.media_recovered,
                &mut self.transport_attached,
                PlaybackError::from_media_error_code(*code),
            ),
            Msg::Action(Action::Player(ActionPlayer::TransportError {
                kind,
                fatal,
                details,
            })) => match fatal {
                true => fatal_error_update(
                    &mut self.stream_state,
                    &mut self.controls,
                    &mut self.load_retried,
                    &mut self.media_recovered,
                    &mut self.transport_attached,
                    PlaybackError::from_transport(*kind),
                ),
                _ => {
                    tracing::warn!("recoverable stream error: {kind:?} {details:?}");
                    Effects::none().unchanged()
                }
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn release_transport_update(transport_attached: &mut bool) -> Effects {
    match *transport_attached {
        true => {
            *transport_attached = false;
            Effects::msg(Msg::Event(Event::PlayerCommand {
                command: PlayerCommand::ReleaseStream,
            }))
            .unchanged()
        }
        _ => Effects::none().unchanged(),
    }
}

fn watched_progress_update(selected: &Option<Selected>, controls: &Controls) -> Effects {
    match selected {
        Some(Selected {
            course: Some(course_id),
            ..
        }) if controls.time > 0 && controls.duration > 0 => {
            let percent = cmp::min(controls.time.saturating_mul(100) / controls.duration, 100);
            Effects::msg(Msg::Internal(Internal::UpdateCourseProgress(
                course_id.to_owned(),
                percent as u32,
            )))
            .unchanged()
        }
        _ => Effects::none().unchanged(),
    }
}

fn autoplay_update(
    selected: &Option<Selected>,
    stream_state: &StreamState,
    autoplay_requested: &mut bool,
) -> Effects {
    match selected {
        Some(Selected { autoplay: true, .. })
            if *stream_state == StreamState::Loading && !*autoplay_requested =>
        {
            *autoplay_requested = true;
            Effects::msg(Msg::Event(Event::PlayerCommand {
                command: PlayerCommand::Play,
            }))
            .unchanged()
        }
        _ => Effects::none().unchanged(),
    }
}

fn seek_update(controls: &mut Controls, time: u64) -> Effects {
    let time = match controls.duration {
        0 => time,
        duration => cmp::min(time, duration),
    };
    let time_effects = eq_update(&mut controls.time, time);
    time_effects.join(
        Effects::msg(Msg::Event(Event::PlayerCommand {
            command: PlayerCommand::SeekTo { time },
        }))
        .unchanged(),
    )
}

fn mute_update(controls: &mut Controls, muted: bool) -> Effects {
    let muted_effects = eq_update(&mut controls.muted, muted);
    match muted_effects.has_changed {
        true => muted_effects.join(
            Effects::msg(Msg::Event(Event::PlayerCommand {
                command: PlayerCommand::SetMuted { muted },
            }))
            .unchanged(),
        ),
        _ => muted_effects,
    }
}

/// Applies the bounded recovery policy for a fatal playback error.
///
/// A fatal network error is answered with a single transport reload and a
/// fatal decode error with a single in-place media recovery. Any other fatal
/// error, or a repeated one while its recovery attempt is still accounted,
/// releases the transport and freezes the session in `StreamState::Errored`.
fn fatal_error_update(
    stream_state: &mut StreamState,
    controls: &mut Controls,
    load_retried: &mut bool,
    media_recovered: &mut bool,
    transport_attached: &mut bool,
    error: PlaybackError,
) -> Effects {
    match error.kind {
        PlaybackErrorKind::Network if !*load_retried => {
            *load_retried = true;
            let state_effects = eq_update(stream_state, StreamState::Loading);
            let buffering_effects = eq_update(&mut controls.buffering, true);
            state_effects.join(buffering_effects).join(
                Effects::msg(Msg::Event(Event::PlayerCommand {
                    command: PlayerCommand::StartLoad,
                }))
                .unchanged(),
            )
        }
        PlaybackErrorKind::Decode if !*media_recovered => {
            *media_recovered = true;
            let state_effects = eq_update(stream_state, StreamState::Loading);
            let buffering_effects = eq_update(&mut controls.buffering, true);
            state_effects.join(buffering_effects).join(
                Effects::msg(Msg::Event(Event::PlayerCommand {
                    command: PlayerCommand::RecoverMedia,
                }))
                .unchanged(),
            )
        }
        _ => {
            let release_effects = release_transport_update(transport_attached);
            let buffering_effects = eq_update(&mut controls.buffering, false);
            let state_effects =
                eq_update(stream_state, StreamState::Errored(error.to_owned()));
            release_effects
                .join(buffering_effects)
                .join(state_effects)
                .join(Effects::msg(Msg::Event(Event::PlayerErrored { error })).unchanged())
        }
    }
}
