use crate::runtime::{ConditionalSend, Env, TryEnvFuture};
use crate::types::backend::{DocRequest, PushResponse};
use http::Request;
use serde::{Deserialize, Serialize};

pub fn fetch_doc<E: Env, OUT>(doc_request: &DocRequest) -> TryEnvFuture<OUT>
where
    OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    let request = Request::get(doc_request.url().as_str())
        .body(())
        .expect("request builder failed");
    E::fetch::<_, OUT>(request)
}

pub fn push_doc<E: Env, IN>(doc_request: &DocRequest, body: IN) -> TryEnvFuture<PushResponse>
where
    IN: Serialize + ConditionalSend + 'static,
{
    let request = Request::post(doc_request.url().as_str())
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body)
        .expect("request builder failed");
    E::fetch::<_, PushResponse>(request)
}
