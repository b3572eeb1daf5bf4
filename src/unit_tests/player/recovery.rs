use crate::models::ctx::Ctx;
use crate::models::player::{Player, Selected, StreamState};
use crate::runtime::msg::{Action, ActionLoad, ActionPlayer, Event};
use crate::runtime::{Runtime, RuntimeAction, RuntimeEvent};
use crate::types::player::{PlaybackError, PlayerCommand, TransportErrorKind};
use crate::unit_tests::{TestEnv, EVENTS, STATES};
use enclose::enclose;
use magnetar_derive::Model;
use std::sync::{Arc, RwLock};
use url::Url;

#[derive(Model, Default, Clone, Debug)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    player: Player,
}

const STREAM_SOURCE: &str = "https://cdn.magnetar-app.com/courses/course_1/master.m3u8";

fn stream_selected() -> Selected {
    Selected {
        source: Url::parse(STREAM_SOURCE).unwrap(),
        poster: None,
        title: None,
        course: None,
        autoplay: true,
    }
}

fn core_events() -> Vec<Event> {
    EVENTS
        .read()
        .unwrap()
        .iter()
        .filter_map(|event| event.downcast_ref::<RuntimeEvent<TestEnv, TestModel>>())
        .filter_map(|event| match event {
            RuntimeEvent::CoreEvent(event) => Some(event.to_owned()),
            _ => None,
        })
        .collect()
}

fn last_player_state() -> Player {
    let states = STATES.read().unwrap();
    states
        .last()
        .and_then(|state| state.downcast_ref::<TestModel>())
        .unwrap()
        .player
        .to_owned()
}

fn attach_stream_event() -> Event {
    Event::PlayerCommand {
        command: PlayerCommand::AttachStream {
            source: STREAM_SOURCE.parse().unwrap(),
        },
    }
}

#[test]
fn fatal_network_error_reloads_in_place() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::PausedChanged { paused: false }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: Some("fragLoadError".to_owned()),
                }),
            });
        }),
    );
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::StartLoad,
            },
        ],
    );
    let player = last_player_state();
    assert_eq!(player.stream_state, StreamState::Loading);
    assert!(player.controls.buffering);
    assert!(player.selected.is_some());
}

#[test]
fn second_network_error_without_progress_is_terminal() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::PausedChanged { paused: false }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: Some("fragLoadError".to_owned()),
                }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: Some("fragLoadError".to_owned()),
                }),
            });
        }),
    );
    let network_error = PlaybackError::from_transport(TransportErrorKind::Network);
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::StartLoad,
            },
            Event::PlayerCommand {
                command: PlayerCommand::ReleaseStream,
            },
            Event::PlayerErrored {
                error: network_error.to_owned(),
            },
        ],
    );
    let player = last_player_state();
    assert_eq!(player.stream_state, StreamState::Errored(network_error));
    assert!(!player.controls.buffering);
    assert!(player.selected.is_some());
}

#[test]
fn fatal_decode_error_recovers_media_once() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::PausedChanged { paused: false }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 3 }),
            });
        }),
    );
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::RecoverMedia,
            },
        ],
    );
    let player = last_player_state();
    assert_eq!(player.stream_state, StreamState::Loading);
    assert!(player.controls.buffering);
}

#[test]
fn second_decode_error_without_progress_is_terminal() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::PausedChanged { paused: false }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 3 }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 3 }),
            });
        }),
    );
    let decode_error = PlaybackError::from_media_error_code(3);
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::RecoverMedia,
            },
            Event::PlayerCommand {
                command: PlayerCommand::ReleaseStream,
            },
            Event::PlayerErrored {
                error: decode_error.to_owned(),
            },
        ],
    );
    assert_eq!(
        last_player_state().stream_state,
        StreamState::Errored(decode_error)
    );
}

#[test]
fn playback_progress_rearms_recovery() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::PausedChanged { paused: false }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: Some("fragLoadError".to_owned()),
                }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TimeChanged {
                    time: 5000,
                    duration: 60000,
                }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: Some("fragLoadError".to_owned()),
                }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 3 }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TimeChanged {
                    time: 9000,
                    duration: 60000,
                }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 3 }),
            });
        }),
    );
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::StartLoad,
            },
            Event::PlayerCommand {
                command: PlayerCommand::StartLoad,
            },
            Event::PlayerCommand {
                command: PlayerCommand::RecoverMedia,
            },
            Event::PlayerCommand {
                command: PlayerCommand::RecoverMedia,
            },
        ],
    );
    assert_eq!(last_player_state().stream_state, StreamState::Loading);
}

#[test]
fn unknown_fatal_error_is_immediately_terminal() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Mux,
                    fatal: true,
                    details: Some("fragParsingError".to_owned()),
                }),
            });
        }),
    );
    let unknown_error = PlaybackError::from_transport(TransportErrorKind::Mux);
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::ReleaseStream,
            },
            Event::PlayerErrored {
                error: unknown_error.to_owned(),
            },
        ],
    );
    assert_eq!(
        last_player_state().stream_state,
        StreamState::Errored(unknown_error)
    );
}

#[test]
fn unsupported_media_is_immediately_terminal() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 4 }),
            });
        }),
    );
    let player = last_player_state();
    match &player.stream_state {
        StreamState::Errored(error) => {
            assert_eq!(
                error.message,
                "The video format is not supported by your browser."
            );
        }
        stream_state => panic!("Expected terminal error state, got {:?}", stream_state),
    };
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::ReleaseStream,
            },
            Event::PlayerErrored {
                error: PlaybackError::from_media_error_code(4),
            },
        ],
    );
}

#[test]
fn recoverable_transport_error_is_ignored() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::PausedChanged { paused: false }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: false,
                    details: Some("fragLoadTimeOut".to_owned()),
                }),
            });
        }),
    );
    assert_eq!(core_events(), vec![attach_stream_event()]);
    assert_eq!(last_player_state().stream_state, StreamState::Playing);
}

#[test]
fn terminal_error_freezes_until_recreated() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(TestModel::default(), vec![], 1000);
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Mux,
                    fatal: true,
                    details: None,
                }),
            });
            // every playback action is ignored while the session is frozen
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TogglePlay),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::Seek { time: 1000 }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::MediaError { code: 3 }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: None,
                }),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::CanPlay),
            });
            // loading a stream again recreates the session with both
            // recoveries rearmed
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(ActionLoad::Player(Box::new(stream_selected()))),
            });
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Player(ActionPlayer::TransportError {
                    kind: TransportErrorKind::Network,
                    fatal: true,
                    details: None,
                }),
            });
        }),
    );
    assert_eq!(
        core_events(),
        vec![
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::ReleaseStream,
            },
            Event::PlayerErrored {
                error: PlaybackError::from_transport(TransportErrorKind::Mux),
            },
            attach_stream_event(),
            Event::PlayerCommand {
                command: PlayerCommand::StartLoad,
            },
        ],
    );
    let player = last_player_state();
    assert_eq!(player.stream_state, StreamState::Loading);
    assert!(player.controls.buffering);
}
