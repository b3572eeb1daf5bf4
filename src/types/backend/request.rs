use crate::constants::URI_COMPONENT_ENCODE_SET;
use itertools::Itertools;
use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};
use std::iter;
use url::Url;

/// Path to a collection, a document, or a nested collection of a document,
/// relative to the root of a backend endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DocPath {
    pub collection: String,
    pub id: Option<String>,
    pub sub_collection: Option<String>,
}

impl DocPath {
    pub fn collection(collection: &str) -> Self {
        DocPath {
            collection: collection.to_owned(),
            id: None,
            sub_collection: None,
        }
    }
    pub fn doc(collection: &str, id: &str) -> Self {
        DocPath {
            collection: collection.to_owned(),
            id: Some(id.to_owned()),
            sub_collection: None,
        }
    }
    pub fn sub_collection(collection: &str, id: &str, sub_collection: &str) -> Self {
        DocPath {
            collection: collection.to_owned(),
            id: Some(id.to_owned()),
            sub_collection: Some(sub_collection.to_owned()),
        }
    }
    fn segments(&self) -> impl Iterator<Item = &str> {
        iter::once(self.collection.as_str())
            .chain(self.id.as_deref())
            .chain(self.sub_collection.as_deref())
    }
}

/// Request against one of the document backends. Equality is used to pair
/// in-flight requests with their results.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct DocRequest {
    pub base: Url,
    pub path: DocPath,
}

impl DocRequest {
    pub fn url(&self) -> Url {
        let path = self
            .path
            .segments()
            .map(|segment| utf8_percent_encode(segment, URI_COMPONENT_ENCODE_SET).to_string())
            .join("/");
        self.base
            .join(&format!("{path}.json"))
            .expect("url builder failed")
    }
}
