//! Spaces: `/spaces[/{id}]`

use super::update_body;
use crate::collection::Collection;
use crate::entity::{CreateSpaceProps, SpaceProps};
use crate::error::Result;
use crate::params::SpaceParams;
use crate::query::QueryParams;
use crate::rest::{Headers, RestContext};

pub fn get(ctx: &RestContext, params: &SpaceParams) -> Result<SpaceProps> {
    ctx.get(&params.url(), &QueryParams::new(), &Headers::new())
}

pub fn get_many(ctx: &RestContext, query: &QueryParams) -> Result<Collection<SpaceProps>> {
    ctx.get("/spaces", &query.normalize_select(), &Headers::new())
}

/// Create a space.
///
/// `organization_id` is only needed when the token's user belongs to more
/// than one organization.
pub fn create(
    ctx: &RestContext,
    data: &CreateSpaceProps,
    organization_id: Option<&str>,
) -> Result<SpaceProps> {
    let mut headers = Headers::new();
    if let Some(organization_id) = organization_id {
        headers = headers.with("X-Contentful-Organization", organization_id);
    }
    ctx.post("/spaces", data, &headers)
}

pub fn update(ctx: &RestContext, space: &SpaceProps, headers: &Headers) -> Result<SpaceProps> {
    let (data, version) = update_body(space, &space.sys)?;
    let headers = Headers::new().version(version).merge(headers);
    ctx.put(&SpaceParams::new(space.sys.id.clone()).url(), &data, &headers)
}

pub fn delete(ctx: &RestContext, params: &SpaceParams) -> Result<()> {
    ctx.delete(&params.url(), &Headers::new())
}
