use crate::constants::{PROFILE_STORAGE_KEY, PROGRESS_STORAGE_KEY};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCtx, Event};
use crate::runtime::{Runtime, RuntimeAction, RuntimeEvent};
use crate::types::course::{CourseProgress, ProgressBucket};
use crate::types::profile::{Profile, User};
use crate::unit_tests::{TestEnv, EVENTS, STATES, STORAGE};
use chrono::Utc;
use enclose::enclose;
use magnetar_derive::Model;
use std::sync::{Arc, RwLock};

#[derive(Model, Default, Clone, Debug)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
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

#[test]
fn logout_clears_profile_and_progress() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let profile = Profile {
        user: Some(User {
            id: "user_1".to_owned(),
            name: Some("Leader".to_owned()),
            email: Some("leader@magnetar-app.com".to_owned()),
            avatar: None,
        }),
    };
    let progress = ProgressBucket {
        uid: Some("user_1".to_owned()),
        items: vec![(
            "course_1".to_owned(),
            CourseProgress {
                percent: 50,
                mtime: Utc::now(),
            },
        )]
        .into_iter()
        .collect(),
    };
    let (runtime, rx) = Runtime::<TestEnv, TestModel>::new(
        TestModel {
            ctx: Ctx::new(profile, progress),
        },
        vec![],
        1000,
    );
    let runtime = Arc::new(RwLock::new(runtime));
    TestEnv::run_with_runtime(
        rx,
        runtime.clone(),
        enclose!((runtime) move || {
            let runtime = runtime.read().unwrap();
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Ctx(ActionCtx::Logout),
            });
        }),
    );
    assert_eq!(
        core_events(),
        vec![
            Event::UserLoggedOut {
                uid: Some("user_1".to_owned()),
            },
            Event::ProfilePushedToStorage { uid: None },
            Event::CourseProgressPushedToStorage { uid: None },
        ],
    );
    let states = STATES.read().unwrap();
    let model = states
        .last()
        .and_then(|state| state.downcast_ref::<TestModel>())
        .unwrap();
    assert_eq!(model.ctx.profile, Profile::default());
    assert_eq!(model.ctx.progress, ProgressBucket::default());
    assert_eq!(states.len(), 2);
    let storage = STORAGE.read().unwrap();
    assert_eq!(
        storage.get(PROFILE_STORAGE_KEY).map(|data| data.as_str()),
        Some(r#"{"user":null}"#),
    );
    assert_eq!(
        storage.get(PROGRESS_STORAGE_KEY).map(|data| data.as_str()),
        Some(r#"{"uid":null,"items":{}}"#),
    );
}

#[test]
fn logout_without_user_reports_event_only() {
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
                action: Action::Ctx(ActionCtx::Logout),
            });
        }),
    );
    assert_eq!(core_events(), vec![Event::UserLoggedOut { uid: None }]);
    assert_eq!(STATES.read().unwrap().len(), 1);
    assert!(STORAGE.read().unwrap().is_empty());
}
