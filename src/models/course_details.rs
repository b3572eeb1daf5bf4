use crate::constants::{
    DOC_API_URL, PRIMARY_COURSES_COLLECTION, REALTIME_API_URL, REALTIME_COURSES_COLLECTION,
};
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::models::player::Selected as PlayerSelected;
use crate::runtime::msg::{Action, ActionLoad, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::backend::{fetch_doc, DocPath, DocRequest};
use crate::types::course::Course;
use enclose::enclose;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Selected {
    pub id: String,
}

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub selected: Option<Selected>,
    pub course: Loadable<Course, CtxError>,
    /// Stream selection for the player, available once the course is loaded
    /// and carries a video url.
    pub video_selected: Option<PlayerSelected>,
    /// Watched part of the course video in percent, taken from the profile
    /// owner progress bucket.
    pub progress: Option<u32>,
    #[serde(skip)]
    pending: Option<DocRequest>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for CourseDetails {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::CourseDetails(selected))) => {
                let request = DocRequest {
                    base: DOC_API_URL.to_owned(),
                    path: DocPath::doc(PRIMARY_COURSES_COLLECTION, &selected.id),
                };
                self.pending = Some(request.to_owned());
                let selected_effects = eq_update(&mut self.selected, Some(selected.to_owned()));
                let course_effects = eq_update(&mut self.course, Loadable::Loading);
                let video_selected_effects = eq_update(&mut self.video_selected, None);
                let progress_effects = progress_update(&mut self.progress, &self.selected, ctx);
                Effects::one(fetch_course::<E>(request))
                    .unchanged()
                    .join(selected_effects)
                    .join(course_effects)
                    .join(video_selected_effects)
                    .join(progress_effects)
            }
            Msg::Action(Action::Unload) => {
                self.pending = None;
                let selected_effects = eq_update(&mut self.selected, None);
                let course_effects = eq_update(&mut self.course, Loadable::Loading);
                let video_selected_effects = eq_update(&mut self.video_selected, None);
                let progress_effects = eq_update(&mut self.progress, None);
                selected_effects
                    .join(course_effects)
                    .join(video_selected_effects)
                    .join(progress_effects)
            }
            Msg::Internal(Internal::CourseResult(request, result))
                if Some(request) == self.pending.as_ref() =>
            {
                let from_primary = request.base == *DOC_API_URL;
                match (result.as_ref(), from_primary) {
                    (Ok(Some(course)), _) => {
                        self.pending = None;
                        let course = Course {
                            id: request.path.id.to_owned().unwrap_or_default(),
                            ..course.to_owned()
                        };
                        let course_effects =
                            eq_update(&mut self.course, Loadable::Ready(course));
                        let video_selected_effects =
                            video_selected_update(&mut self.video_selected, &self.course);
                        let progress_effects =
                            progress_update(&mut self.progress, &self.selected, ctx);
                        course_effects
                            .join(video_selected_effects)
                            .join(progress_effects)
                    }
                    (Ok(None), true) | (Err(_), true) => {
                        if let Err(error) = result.as_ref() {
                            tracing::warn!("primary course source failed: {error}");
                        }
                        let fallback_request = DocRequest {
                            base: REALTIME_API_URL.to_owned(),
                            path: DocPath::doc(
                                REALTIME_COURSES_COLLECTION,
                                request.path.id.as_deref().unwrap_or_default(),
                            ),
                        };
                        self.pending = Some(fallback_request.to_owned());
                        Effects::one(fetch_course::<E>(fallback_request)).unchanged()
                    }
                    (Ok(None), false) => {
                        self.pending = None;
                        eq_update(
                            &mut self.course,
                            Loadable::Err(CtxError::from(OtherError::CourseNotFound)),
                        )
                    }
                    (Err(error), false) => {
                        self.pending = None;
                        eq_update(
                            &mut self.course,
                            Loadable::Err(CtxError::Env(error.to_owned())),
                        )
                    }
                }
            }
            Msg::Internal(Internal::ProgressChanged) => {
                progress_update(&mut self.progress, &self.selected, ctx)
            }
            _ => Effects::none().unchanged(),
        }
    }
}

fn video_selected_update(
    video_selected: &mut Option<PlayerSelected>,
    course: &Loadable<Course, CtxError>,
) -> Effects {
    let next_video_selected = match course {
        Loadable::Ready(Course {
            id,
            title,
            thumbnail,
            video: Some(video),
            ..
        }) => Some(PlayerSelected {
            source: video.to_owned(),
            poster: thumbnail.to_owned(),
            title: Some(title.to_owned()),
            course: Some(id.to_owned()),
            autoplay: true,
        }),
        _ => None,
    };
    eq_update(video_selected, next_video_selected)
}

fn progress_update(progress: &mut Option<u32>, selected: &Option<Selected>, ctx: &Ctx) -> Effects {
    let next_progress = selected.as_ref().and_then(|selected| {
        ctx.progress
            .items
            .get(&selected.id)
            .map(|course_progress| course_progress.percent)
    });
    eq_update(progress, next_progress)
}

fn fetch_course<E: Env + 'static>(request: DocRequest) -> Effect {
    EffectFuture::Concurrent(
        fetch_doc::<E, Option<Course>>(&request)
            .map(enclose!((request) move |result| {
                Msg::Internal(Internal::CourseResult(request, Box::new(result)))
            }))
            .boxed_env(),
    )
    .into()
}
