use crate::constants::PROGRESS_STORAGE_KEY;
use crate::models::ctx::CtxError;
use crate::runtime::msg::{Action, ActionCtx, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt};
use crate::types::course::{CourseProgress, ProgressBucket};
use crate::types::profile::Profile;
use enclose::enclose;
use futures::FutureExt;
use std::cmp;

pub fn update_progress<E: Env + 'static>(
    progress: &mut ProgressBucket,
    profile: &Profile,
    msg: &Msg,
) -> Effects {
    match msg {
        Msg::Action(Action::Ctx(ActionCtx::Logout)) => {
            let next_progress = ProgressBucket::default();
            if *progress != next_progress {
                *progress = next_progress;
                Effects::msg(Msg::Internal(Internal::ProgressChanged))
            } else {
                Effects::none().unchanged()
            }
        }
        Msg::Internal(Internal::UpdateCourseProgress(course_id, percent)) => {
            let percent = cmp::min(*percent, 100);
            match progress.items.get(course_id) {
                // watched progress never goes backwards
                Some(course_progress) if course_progress.percent >= percent => {
                    Effects::none().unchanged()
                }
                _ => {
                    if progress.uid != profile.uid() {
                        progress.uid = profile.uid();
                    };
                    progress.items.insert(
                        course_id.to_owned(),
                        CourseProgress {
                            percent,
                            mtime: E::now(),
                        },
                    );
                    Effects::msg(Msg::Internal(Internal::ProgressChanged))
                }
            }
        }
        Msg::Internal(Internal::ProgressChanged) => {
            Effects::one(push_progress_to_storage::<E>(progress)).unchanged()
        }
        _ => Effects::none().unchanged(),
    }
}

fn push_progress_to_storage<E: Env + 'static>(progress: &ProgressBucket) -> Effect {
    EffectFuture::Sequential(
        E::set_storage(PROGRESS_STORAGE_KEY, Some(progress))
            .map(enclose!((progress.uid.to_owned() => uid) move |result| match result {
                Ok(_) => Msg::Event(Event::CourseProgressPushedToStorage { uid }),
                Err(error) => Msg::Event(Event::Error {
                    error: CtxError::from(error),
                    source: Box::new(Event::CourseProgressPushedToStorage { uid }),
                })
            }))
            .boxed_env(),
    )
    .into()
}
