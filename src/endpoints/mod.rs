//! Per-resource bindings of the Management API.
//!
//! Each module maps typed calls onto one family of URL templates and adds
//! the headers those routes need (`X-Contentful-Version` on writes,
//! `X-Contentful-Content-Type` on entry creation, ...).

pub mod asset;
pub mod content_type;
pub mod entry;
pub mod environment;
pub mod space;
pub mod team;
pub mod upload;

use crate::entity::Sys;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Serialize an entity for an update request.
///
/// The API rejects bodies carrying `sys`; its version travels in the
/// `X-Contentful-Version` header instead, so it is returned alongside
/// (0 when the entity has never been saved).
pub(crate) fn update_body<T: Serialize>(props: &T, sys: &Sys) -> Result<(Value, u64)> {
    let mut data = serde_json::to_value(props)?;
    if let Value::Object(ref mut map) = data {
        map.remove("sys");
    }
    Ok((data, sys.version.unwrap_or(0)))
}
