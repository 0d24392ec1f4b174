//! Uploads on the upload host: `/spaces/{space}/uploads[/{id}]`
//!
//! An upload stages raw bytes; an asset then points at it through
//! `AssetFile::upload_from` and is processed like any other asset.

use crate::entity::UploadProps;
use crate::error::Result;
use crate::params::SpaceParams;
use crate::rest::RestContext;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

fn base_url(params: &SpaceParams) -> String {
    format!("{}/uploads", params.url())
}

/// Upload bytes
pub fn create(ctx: &RestContext, params: &SpaceParams, data: Vec<u8>) -> Result<UploadProps> {
    debug!(space_id = %params.space_id, size = data.len(), "uploading file");
    ctx.upload_post(&base_url(params), data)
}

/// Upload everything `reader` yields
pub fn create_from_reader<R: Read>(
    ctx: &RestContext,
    params: &SpaceParams,
    mut reader: R,
) -> Result<UploadProps> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    create(ctx, params, data)
}

/// Upload a local file
pub fn create_from_file(
    ctx: &RestContext,
    params: &SpaceParams,
    path: impl AsRef<Path>,
) -> Result<UploadProps> {
    let file = File::open(path.as_ref())?;
    create_from_reader(ctx, params, file)
}

pub fn get(ctx: &RestContext, params: &SpaceParams, upload_id: &str) -> Result<UploadProps> {
    ctx.upload_get(&format!("{}/{}", base_url(params), upload_id))
}

pub fn delete(ctx: &RestContext, params: &SpaceParams, upload_id: &str) -> Result<()> {
    ctx.upload_delete(&format!("{}/{}", base_url(params), upload_id))
}
