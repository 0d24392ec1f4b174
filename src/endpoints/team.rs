//! Teams: `/organizations/{org}/teams[/{id}]`

use super::update_body;
use crate::collection::Collection;
use crate::entity::{CreateTeamProps, TeamProps};
use crate::error::Result;
use crate::params::{OrganizationParams, TeamParams};
use crate::query::QueryParams;
use crate::rest::{Headers, RestContext};

fn base_url(params: &OrganizationParams) -> String {
    format!("{}/teams", params.url())
}

fn entity_url(params: &TeamParams) -> String {
    format!("{}/{}", base_url(&params.organization()), params.team_id)
}

pub fn get(ctx: &RestContext, params: &TeamParams) -> Result<TeamProps> {
    ctx.get(&entity_url(params), &QueryParams::new(), &Headers::new())
}

pub fn get_many(
    ctx: &RestContext,
    params: &OrganizationParams,
    query: &QueryParams,
) -> Result<Collection<TeamProps>> {
    ctx.get(&base_url(params), &query.normalize_select(), &Headers::new())
}

pub fn create(
    ctx: &RestContext,
    params: &OrganizationParams,
    data: &CreateTeamProps,
    headers: &Headers,
) -> Result<TeamProps> {
    ctx.post(&base_url(params), data, headers)
}

pub fn update(
    ctx: &RestContext,
    params: &TeamParams,
    team: &TeamProps,
    headers: &Headers,
) -> Result<TeamProps> {
    let (data, version) = update_body(team, &team.sys)?;
    let headers = Headers::new().version(version).merge(headers);
    ctx.put(&entity_url(params), &data, &headers)
}

pub fn delete(ctx: &RestContext, params: &TeamParams) -> Result<()> {
    ctx.delete(&entity_url(params), &Headers::new())
}
