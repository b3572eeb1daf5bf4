use crate::constants::{
    DOC_API_URL, PRIMARY_COURSES_COLLECTION, REALTIME_API_URL, REALTIME_COURSES_COLLECTION,
};
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, CtxError};
use crate::runtime::msg::{Action, ActionLoad, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvError, EnvFutureExt, UpdateWithCtx};
use crate::types::backend::{fetch_doc, CollectionResponse, DocPath, DocRequest};
use crate::types::course::Course;
use enclose::enclose;
use futures::FutureExt;
use itertools::Itertools;
use serde::Serialize;

type CatalogSource = (DocRequest, Option<Result<Vec<Course>, EnvError>>);

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CourseCatalog {
    /// Courses from all backends merged by id, newest first. The primary
    /// backend wins over the realtime one for courses present on both.
    pub catalog: Loadable<Vec<Course>, CtxError>,
    #[serde(skip)]
    sources: Vec<CatalogSource>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for CourseCatalog {
    fn update(&mut self, msg: &Msg, _ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::CourseCatalog)) => {
                let primary_request = DocRequest {
                    base: DOC_API_URL.to_owned(),
                    path: DocPath::collection(PRIMARY_COURSES_COLLECTION),
                };
                let realtime_request = DocRequest {
                    base: REALTIME_API_URL.to_owned(),
                    path: DocPath::collection(REALTIME_COURSES_COLLECTION),
                };
                self.sources = vec![
                    (primary_request.to_owned(), None),
                    (realtime_request.to_owned(), None),
                ];
                let catalog_effects = eq_update(&mut self.catalog, Loadable::Loading);
                Effects::many(vec![
                    fetch_courses::<E>(primary_request),
                    fetch_courses::<E>(realtime_request),
                ])
                .unchanged()
                .join(catalog_effects)
            }
            Msg::Internal(Internal::CourseCatalogResult(request, result)) => {
                let source = self.sources.iter_mut().find(|(source_request, source_result)| {
                    source_request == request && source_result.is_none()
                });
                match source {
                    Some((_, source_result)) => {
                        *source_result = Some(result.as_ref().to_owned().map(|items| {
                            items
                                .into_iter()
                                .map(|(id, course)| Course { id, ..course })
                                .collect::<Vec<_>>()
                        }));
                        catalog_update(&mut self.catalog, &self.sources)
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            _ => Effects::none().unchanged(),
        }
    }
}

fn catalog_update(
    catalog: &mut Loadable<Vec<Course>, CtxError>,
    sources: &[CatalogSource],
) -> Effects {
    let resolved = sources.iter().all(|(_, result)| result.is_some());
    match resolved {
        true => {
            let courses = sources
                .iter()
                .filter_map(|(request, result)| match result {
                    Some(Ok(courses)) => Some(courses.to_owned()),
                    Some(Err(error)) => {
                        tracing::warn!("course source skipped: {} {error}", request.url());
                        None
                    }
                    _ => None,
                })
                .flatten()
                .unique_by(|course| course.id.to_owned())
                .sorted_by(|a, b| {
                    b.created_at
                        .cmp(&a.created_at)
                        .then_with(|| a.id.cmp(&b.id))
                })
                .collect::<Vec<_>>();
            let all_failed = sources
                .iter()
                .all(|(_, result)| matches!(result, Some(Err(_))));
            let error = sources.iter().find_map(|(_, result)| match result {
                Some(Err(error)) => Some(error.to_owned()),
                _ => None,
            });
            let next_catalog = match (all_failed, error) {
                (true, Some(error)) => Loadable::Err(CtxError::from(error)),
                _ => Loadable::Ready(courses),
            };
            eq_update(catalog, next_catalog)
        }
        _ => Effects::none().unchanged(),
    }
}

fn fetch_courses<E: Env + 'static>(request: DocRequest) -> Effect {
    EffectFuture::Concurrent(
        fetch_doc::<E, CollectionResponse<Course>>(&request)
            .map(enclose!((request) move |result| {
                Msg::Internal(Internal::CourseCatalogResult(
                    request,
                    Box::new(result.map(|response| response.into_items())),
                ))
            }))
            .boxed_env(),
    )
    .into()
}
