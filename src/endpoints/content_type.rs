//! Content types: `/spaces/{space}/environments/{env}/content_types[/{id}[/published]]`

use super::update_body;
use crate::collection::Collection;
use crate::entity::{ContentTypeProps, CreateContentTypeProps};
use crate::error::Result;
use crate::params::SpaceEnvironmentParams;
use crate::query::QueryParams;
use crate::rest::{Headers, RestContext};

fn base_url(params: &SpaceEnvironmentParams) -> String {
    format!("{}/content_types", params.url())
}

fn entity_url(params: &SpaceEnvironmentParams, content_type_id: &str) -> String {
    format!("{}/{}", base_url(params), content_type_id)
}

pub fn get(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type_id: &str,
    query: &QueryParams,
) -> Result<ContentTypeProps> {
    ctx.get(
        &entity_url(params, content_type_id),
        &query.normalize_select(),
        &Headers::new(),
    )
}

pub fn get_many(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    query: &QueryParams,
) -> Result<Collection<ContentTypeProps>> {
    ctx.get(&base_url(params), &query.normalize_select(), &Headers::new())
}

pub fn create(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    data: &CreateContentTypeProps,
) -> Result<ContentTypeProps> {
    ctx.post(&base_url(params), data, &Headers::new())
}

pub fn create_with_id(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type_id: &str,
    data: &CreateContentTypeProps,
) -> Result<ContentTypeProps> {
    ctx.put(&entity_url(params, content_type_id), data, &Headers::new())
}

pub fn update(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type: &ContentTypeProps,
    headers: &Headers,
) -> Result<ContentTypeProps> {
    let (data, version) = update_body(content_type, &content_type.sys)?;
    let headers = Headers::new().version(version).merge(headers);
    ctx.put(&entity_url(params, &content_type.sys.id), &data, &headers)
}

pub fn delete(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type_id: &str,
) -> Result<()> {
    ctx.delete(&entity_url(params, content_type_id), &Headers::new())
}

/// Activate the current version; entries of this type can be created afterwards
pub fn publish(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type: &ContentTypeProps,
) -> Result<ContentTypeProps> {
    let headers = Headers::new().version(content_type.sys.version.unwrap_or(0));
    ctx.put_empty(
        &format!("{}/published", entity_url(params, &content_type.sys.id)),
        &headers,
    )
}

pub fn unpublish(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    content_type_id: &str,
) -> Result<ContentTypeProps> {
    ctx.delete_json(
        &format!("{}/published", entity_url(params, content_type_id)),
        &Headers::new(),
    )
}
