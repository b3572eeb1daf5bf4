use crate::models::ctx::{update_profile, update_progress};
use crate::runtime::{
    msg::{Action, ActionCtx, Event, Msg},
    Effects, Env, Update,
};
use crate::types::{course::ProgressBucket, profile::Profile};
use serde::Serialize;

#[derive(Default, Serialize, Clone, Debug)]
pub struct Ctx {
    pub profile: Profile,
    #[serde(skip)]
    pub progress: ProgressBucket,
}

impl Ctx {
    pub fn new(profile: Profile, progress: ProgressBucket) -> Self {
        Self { profile, progress }
    }
}

impl<E: Env + 'static> Update<E> for Ctx {
    fn update(&mut self, msg: &Msg) -> Effects {
        match msg {
            Msg::Action(Action::Ctx(ActionCtx::Logout)) => {
                let uid = self.profile.uid();
                let profile_effects = update_profile::<E>(&mut self.profile, msg);
                let progress_effects = update_progress::<E>(&mut self.progress, &self.profile, msg);
                Effects::msg(Msg::Event(Event::UserLoggedOut { uid }))
                    .unchanged()
                    .join(profile_effects)
                    .join(progress_effects)
            }
            _ => {
                let profile_effects = update_profile::<E>(&mut self.profile, msg);
                let progress_effects = update_progress::<E>(&mut self.progress, &self.profile, msg);
                profile_effects.join(progress_effects)
            }
        }
    }
}
