use crate::constants::{CHATS_COLLECTION, MESSAGES_SUB_COLLECTION, REALTIME_API_URL};
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, CtxError, OtherError};
use crate::runtime::msg::{Action, ActionChatRoom, ActionLoad, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::backend::{push_doc, DocPath, DocRequest};
use crate::types::chat::{ChatMessage, ChatRoomId};
use enclose::enclose;
use futures::FutureExt;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Selected {
    /// Id of the member the room is shared with.
    pub recipient: String,
}

#[derive(Default, Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub selected: Option<Selected>,
    pub room: Loadable<ChatRoomId, CtxError>,
    /// Messages of the active room ordered by send time, replaced as a whole
    /// on every realtime snapshot.
    pub messages: Vec<ChatMessage>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for ChatRoom {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::ChatRoom(selected))) => {
                let selected_effects = eq_update(&mut self.selected, Some(selected.to_owned()));
                let room = match ctx.profile.uid() {
                    Some(uid) => {
                        Loadable::Ready(ChatRoomId::from_members(&uid, &selected.recipient))
                    }
                    _ => Loadable::Err(CtxError::from(OtherError::UserNotLoggedIn)),
                };
                let room_effects = eq_update(&mut self.room, room);
                let messages_effects = eq_update(&mut self.messages, vec![]);
                selected_effects.join(room_effects).join(messages_effects)
            }
            Msg::Action(Action::Unload) => {
                let selected_effects = eq_update(&mut self.selected, None);
                let room_effects = eq_update(&mut self.room, Loadable::Loading);
                let messages_effects = eq_update(&mut self.messages, vec![]);
                selected_effects.join(room_effects).join(messages_effects)
            }
            Msg::Action(Action::ChatRoom(ActionChatRoom::MessagesChanged(messages))) => {
                match &self.room {
                    Loadable::Ready(_) => {
                        let next_messages = messages
                            .iter()
                            .cloned()
                            .sorted_by_key(|message| message.timestamp)
                            .collect::<Vec<_>>();
                        eq_update(&mut self.messages, next_messages)
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            Msg::Action(Action::ChatRoom(ActionChatRoom::SendMessage { text })) => {
                let text = text.trim();
                match (&self.room, &ctx.profile.user, text.is_empty()) {
                    (Loadable::Ready(room), Some(user), false) => {
                        let message = ChatMessage {
                            sender_id: user.id.to_owned(),
                            sender_name: user.display_name().to_owned(),
                            sender_initials: user.initials(),
                            text: text.to_owned(),
                            timestamp: E::now().timestamp_millis(),
                        };
                        Effects::one(push_message::<E>(room, message)).unchanged()
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            Msg::Internal(Internal::ChatMessagePushResult(request, result)) => {
                match &request.path.id {
                    Some(room_id) => {
                        let room = ChatRoomId::from(room_id.to_owned());
                        match result.as_ref() {
                            Ok(_) => Effects::msg(Msg::Event(Event::ChatMessageSent { room }))
                                .unchanged(),
                            Err(error) => Effects::msg(Msg::Event(Event::Error {
                                error: CtxError::Env(error.to_owned()),
                                source: Box::new(Event::ChatMessageSent { room }),
                            }))
                            .unchanged(),
                        }
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            _ => Effects::none().unchanged(),
        }
    }
}

fn push_message<E: Env + 'static>(room: &ChatRoomId, message: ChatMessage) -> Effect {
    let request = DocRequest {
        base: REALTIME_API_URL.to_owned(),
        path: DocPath::sub_collection(CHATS_COLLECTION, room.as_str(), MESSAGES_SUB_COLLECTION),
    };
    EffectFuture::Concurrent(
        push_doc::<E, _>(&request, message)
            .map(enclose!((request) move |result| {
                Msg::Internal(Internal::ChatMessagePushResult(request, Box::new(result)))
            }))
            .boxed_env(),
    )
    .into()
}
