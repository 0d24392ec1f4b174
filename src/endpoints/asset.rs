//! Assets: `/spaces/{space}/environments/{env}/assets[/{id}[/published|/archived|/files/{locale}/process]]`

use super::update_body;
use crate::collection::Collection;
use crate::entity::{AssetProps, CreateAssetProps};
use crate::error::Result;
use crate::params::SpaceEnvironmentParams;
use crate::query::QueryParams;
use crate::rest::{Headers, RestContext};
use serde_json::Value;

fn base_url(params: &SpaceEnvironmentParams) -> String {
    format!("{}/assets", params.url())
}

fn entity_url(params: &SpaceEnvironmentParams, asset_id: &str) -> String {
    format!("{}/{}", base_url(params), asset_id)
}

pub fn get(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset_id: &str,
    query: &QueryParams,
) -> Result<AssetProps> {
    ctx.get(
        &entity_url(params, asset_id),
        &query.normalize_select(),
        &Headers::new(),
    )
}

pub fn get_many(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    query: &QueryParams,
) -> Result<Collection<AssetProps>> {
    ctx.get(&base_url(params), &query.normalize_select(), &Headers::new())
}

pub fn create(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    data: &CreateAssetProps,
) -> Result<AssetProps> {
    ctx.post(&base_url(params), data, &Headers::new())
}

pub fn create_with_id(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset_id: &str,
    data: &CreateAssetProps,
) -> Result<AssetProps> {
    ctx.put(&entity_url(params, asset_id), data, &Headers::new())
}

pub fn update(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset: &AssetProps,
    headers: &Headers,
) -> Result<AssetProps> {
    let (data, version) = update_body(asset, &asset.sys)?;
    let headers = Headers::new().version(version).merge(headers);
    ctx.put(&entity_url(params, &asset.sys.id), &data, &headers)
}

pub fn delete(ctx: &RestContext, params: &SpaceEnvironmentParams, asset_id: &str) -> Result<()> {
    ctx.delete(&entity_url(params, asset_id), &Headers::new())
}

pub fn publish(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset: &AssetProps,
) -> Result<AssetProps> {
    let headers = Headers::new().version(asset.sys.version.unwrap_or(0));
    ctx.put_empty(&format!("{}/published", entity_url(params, &asset.sys.id)), &headers)
}

pub fn unpublish(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset_id: &str,
) -> Result<AssetProps> {
    ctx.delete_json(&format!("{}/published", entity_url(params, asset_id)), &Headers::new())
}

pub fn archive(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset_id: &str,
) -> Result<AssetProps> {
    ctx.put_empty(&format!("{}/archived", entity_url(params, asset_id)), &Headers::new())
}

pub fn unarchive(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset_id: &str,
) -> Result<AssetProps> {
    ctx.delete_json(&format!("{}/archived", entity_url(params, asset_id)), &Headers::new())
}

/// Ask the API to fetch and process the file of one locale.
///
/// Processing is asynchronous on the server: the call returns as soon as
/// the job is accepted and `fields.file[locale].url` appears later.
pub fn process_for_locale(
    ctx: &RestContext,
    params: &SpaceEnvironmentParams,
    asset: &AssetProps,
    locale: &str,
) -> Result<()> {
    let headers = Headers::new().version(asset.sys.version.unwrap_or(0));
    ctx.put_empty::<Value>(
        &format!("{}/files/{}/process", entity_url(params, &asset.sys.id), locale),
        &headers,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let params = SpaceEnvironmentParams::master("s1");
        assert_eq!(entity_url(&params, "a1"), "/spaces/s1/environments/master/assets/a1");
    }
}
