use crate::constants::{MEMBERS_COLLECTION, REALTIME_API_URL};
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::runtime::msg::{Action, ActionLoad, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::backend::{fetch_doc, CollectionResponse, DocPath, DocRequest};
use crate::types::team::TeamMember;
use enclose::enclose;
use futures::FutureExt;
use itertools::Itertools;
use serde::Serialize;

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Direct recruits of the profile owner, sorted by name.
    pub members: Loadable<Vec<TeamMember>, CtxError>,
    #[serde(skip)]
    pending: Option<DocRequest>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for Team {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::Team)) => match ctx.profile.uid() {
                Some(_) => {
                    let request = DocRequest {
                        base: REALTIME_API_URL.to_owned(),
                        path: DocPath::collection(MEMBERS_COLLECTION),
                    };
                    self.pending = Some(request.to_owned());
                    let members_effects = eq_update(&mut self.members, Loadable::Loading);
                    Effects::one(fetch_members::<E>(request))
                        .unchanged()
                        .join(members_effects)
                }
                _ => {
                    self.pending = None;
                    eq_update(
                        &mut self.members,
                        Loadable::Err(CtxError::from(OtherError::UserNotLoggedIn)),
                    )
                }
            },
            Msg::Internal(Internal::TeamMembersResult(request, result))
                if Some(request) == self.pending.as_ref() =>
            {
                self.pending = None;
                let uid = ctx.profile.uid();
                let next_members = match result.as_ref() {
                    Ok(items) => Loadable::Ready(
                        items
                            .to_owned()
                            .into_iter()
                            .map(|(id, member)| TeamMember { id, ..member })
                            .filter(|member| member.upline_id == uid)
                            .sorted_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
                            .collect::<Vec<_>>(),
                    ),
                    Err(error) => Loadable::Err(CtxError::Env(error.to_owned())),
                };
                eq_update(&mut self.members, next_members)
            }
            _ => Effects::none().unchanged(),
        }
    }
}

fn fetch_members<E: Env + 'static>(request: DocRequest) -> Effect {
    EffectFuture::Concurrent(
        fetch_doc::<E, CollectionResponse<TeamMember>>(&request)
            .map(enclose!((request) move |result| {
                Msg::Internal(Internal::TeamMembersResult(
                    request,
                    Box::new(result.map(|response| response.into_items())),
                ))
            }))
            .boxed_env(),
    )
    .into()
}
