//! Environments: `/spaces/{space}/environments[/{id}]`

use super::update_body;
use crate::collection::Collection;
use crate::entity::{CreateEnvironmentProps, EnvironmentProps};
use crate::error::Result;
use crate::params::{SpaceEnvironmentParams, SpaceParams};
use crate::query::QueryParams;
use crate::rest::{Headers, RestContext};

fn base_url(params: &SpaceParams) -> String {
    format!("{}/environments", params.url())
}

pub fn get(ctx: &RestContext, params: &SpaceEnvironmentParams) -> Result<EnvironmentProps> {
    ctx.get(&params.url(), &QueryParams::new(), &Headers::new())
}

pub fn get_many(
    ctx: &RestContext,
    params: &SpaceParams,
    query: &QueryParams,
) -> Result<Collection<EnvironmentProps>> {
    ctx.get(&base_url(params), &query.normalize_select(), &Headers::new())
}

/// Create an environment, optionally branched from `source_environment_id`
/// (the server defaults to `master`)
pub fn create_with_id(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    data: &CreateEnvironmentProps,
    source_environment_id: Option<&str>,
) -> Result<EnvironmentProps> {
    let mut headers = Headers::new();
    if let Some(source) = source_environment_id {
        headers = headers.with("X-Contentful-Source-Environment", source);
    }
    ctx.put(&params.url(), data, &headers)
}

pub fn update(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    environment: &EnvironmentProps,
    headers: &Headers,
) -> Result<EnvironmentProps> {
    let (data, version) = update_body(environment, &environment.sys)?;
    let headers = Headers::new().version(version).merge(headers);
    ctx.put(&params.url(), &data, &headers)
}

pub fn delete(ctx: &RestContext, params: &SpaceEnvironmentParams) -> Result<()> {
    ctx.delete(&params.url(), &Headers::new())
}
