//! Entries: `/spaces/{space}/environments/{env}/entries[/{id}[/published|/archived]]`

use super::update_body;
use crate::collection::Collection;
use crate::entity::{CreateEntryProps, EntryProps, KeyValueMap};
use crate::error::Result;
use crate::params::SpaceEnvironmentParams;
use crate::query::QueryParams;
use crate::rest::{Headers, RestContext, JSON_PATCH_CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One JSON-patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOp {
    /// "add", "remove", "replace", "move", "copy" or "test"
    pub op: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOp {
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        PatchOp {
            op: "replace".to_string(),
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn add(path: impl Into<String>, value: Value) -> Self {
        PatchOp {
            op: "add".to_string(),
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        PatchOp {
            op: "remove".to_string(),
            path: path.into(),
            value: None,
            from: None,
        }
    }
}

fn base_url(params: &SpaceEnvironmentParams) -> String {
    format!("{}/entries", params.url())
}

fn entity_url(params: &SpaceEnvironmentParams, entry_id: &str) -> String {
    format!("{}/{}", base_url(params), entry_id)
}

pub fn get<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
    query: &QueryParams,
    headers: &Headers,
) -> Result<EntryProps<T>> {
    ctx.get(&entity_url(params, entry_id), &query.normalize_select(), headers)
}

pub fn get_many<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    query: &QueryParams,
) -> Result<Collection<EntryProps<T>>> {
    ctx.get(&base_url(params), &query.normalize_select(), &Headers::new())
}

/// Apply JSON-patch operations to the entry at `version`
pub fn patch<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
    version: u64,
    ops: &[PatchOp],
    headers: &Headers,
) -> Result<EntryProps<T>> {
    let headers = Headers::new()
        .version(version)
        .with("Content-Type", JSON_PATCH_CONTENT_TYPE)
        .merge(headers);
    ctx.patch(&entity_url(params, entry_id), ops, &headers)
}

/// Replace the entry's fields; the version comes from `entry.sys`
pub fn update<T>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
    entry: &EntryProps<T>,
    headers: &Headers,
) -> Result<EntryProps<T>>
where
    T: Serialize + DeserializeOwned + Default,
{
    let (data, version) = update_body(entry, &entry.sys)?;
    let headers = Headers::new().version(version).merge(headers);
    ctx.put(&entity_url(params, entry_id), &data, &headers)
}

pub fn delete(ctx: &RestContext, params: &SpaceEnvironmentParams, entry_id: &str) -> Result<()> {
    ctx.delete(&entity_url(params, entry_id), &Headers::new())
}

pub fn publish<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
    entry: &EntryProps<T>,
) -> Result<EntryProps<T>> {
    let headers = Headers::new().version(entry.sys.version.unwrap_or(0));
    ctx.put_empty(&format!("{}/published", entity_url(params, entry_id)), &headers)
}

pub fn unpublish<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
) -> Result<EntryProps<T>> {
    ctx.delete_json(&format!("{}/published", entity_url(params, entry_id)), &Headers::new())
}

pub fn archive<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
) -> Result<EntryProps<T>> {
    ctx.put_empty(&format!("{}/archived", entity_url(params, entry_id)), &Headers::new())
}

pub fn unarchive<T: DeserializeOwned + Default>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
) -> Result<EntryProps<T>> {
    ctx.delete_json(&format!("{}/archived", entity_url(params, entry_id)), &Headers::new())
}

/// Create an entry with a server-generated id
pub fn create<T>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type_id: &str,
    data: &CreateEntryProps<T>,
) -> Result<EntryProps<T>>
where
    T: Serialize + DeserializeOwned + Default,
{
    let headers = Headers::new().with("X-Contentful-Content-Type", content_type_id);
    ctx.post(&base_url(params), data, &headers)
}

/// Create an entry under a caller-chosen id
pub fn create_with_id<T>(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    entry_id: &str,
    content_type_id: &str,
    data: &CreateEntryProps<T>,
) -> Result<EntryProps<T>>
where
    T: Serialize + DeserializeOwned + Default,
{
    let headers = Headers::new().with("X-Contentful-Content-Type", content_type_id);
    ctx.put(&entity_url(params, entry_id), data, &headers)
}

/// Untyped entry, the common case
pub type Entry = EntryProps<KeyValueMap>;
