//! Copy the content model, entries and assets of one space into another.
//!
//! Everything runs sequentially. The first failing call is logged with the
//! id of the item being copied and then returned; nothing is rolled back.

use crate::collection::{Collection, Pages};
use crate::endpoints::{asset, content_type, entry, space};
use crate::entity::{
    AssetFields, AssetFile, AssetProps, CreateAssetProps, CreateContentTypeProps,
    CreateEntryProps, CreateSpaceProps, KeyValueMap, Localized, SpaceProps,
};
use crate::error::{RestError, Result};
use crate::params::{SpaceEnvironmentParams, SpaceParams, DEFAULT_ENVIRONMENT};
use crate::query::QueryParams;
use crate::rest::RestContext;
use std::time::Duration;
use tracing::{error, info, warn};

/// What to clone and where
#[derive(Debug, Clone)]
pub struct CloneOptions {
    pub source_space_id: String,
    pub source_environment_id: String,
    /// Existing destination space; a new one is created when `None`
    pub destination_space_id: Option<String>,
    pub destination_environment_id: String,
    /// Organization for a newly created space
    pub destination_organization_id: Option<String>,
    /// Entries and assets requested per page
    pub page_size: u32,
    /// Content types requested (a single page)
    pub content_type_limit: u32,
    /// Pause after creating a space, before writing to it
    pub creation_delay: Duration,
}

impl CloneOptions {
    pub fn new(source_space_id: impl Into<String>) -> Self {
        CloneOptions {
            source_space_id: source_space_id.into(),
            source_environment_id: DEFAULT_ENVIRONMENT.to_string(),
            destination_space_id: None,
            destination_environment_id: DEFAULT_ENVIRONMENT.to_string(),
            destination_organization_id: None,
            page_size: 10,
            content_type_limit: 1000,
            creation_delay: Duration::from_secs(5),
        }
    }

    pub fn with_destination(mut self, space_id: impl Into<String>) -> Self {
        self.destination_space_id = Some(space_id.into());
        self
    }
}

/// Counts of what was copied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneReport {
    pub destination_space_id: String,
    pub content_types: usize,
    pub entries: usize,
    pub assets: usize,
    pub processed_assets: usize,
}

/// Clone `options.source_space_id` as seen by `source` into a space
/// reachable through `destination`.
pub fn clone_space(
    source: &RestContext,
    destination: &RestContext,
    options: &CloneOptions,
) -> Result<CloneReport> {
    let source_space = space::get(source, &SpaceParams::new(options.source_space_id.clone()))
        .map_err(|e| {
            error!(space_id = %options.source_space_id, error = %e, "could not find source space");
            e
        })?;

    let destination_space = destination_space(destination, &source_space, options)?;

    info!(
        "cloning from space \"{}\" ({}) to \"{}\" ({})",
        source_space.name, source_space.sys.id, destination_space.name, destination_space.sys.id
    );

    let src = SpaceEnvironmentParams::new(
        source_space.sys.id.clone(),
        options.source_environment_id.clone(),
    );
    let dst = SpaceEnvironmentParams::new(
        destination_space.sys.id.clone(),
        options.destination_environment_id.clone(),
    );

    let mut report = CloneReport {
        destination_space_id: destination_space.sys.id.clone(),
        ..CloneReport::default()
    };

    report.content_types = clone_content_types(source, destination, &src, &dst, options)?;

    let entries = Pages::new(
        QueryParams::new().order("sys.createdAt"),
        options.page_size,
        |query: &QueryParams| entry::get_many::<KeyValueMap>(source, &src, query),
    );
    report.entries = for_each(entries, |item| {
        info!("creating entry {}", item.sys.id);
        create_entry(destination, &dst, &item).map_err(|e| {
            error!(entry_id = %item.sys.id, error = %e, "error creating entry");
            e
        })
    })?;

    let assets = Pages::new(
        QueryParams::new().order("sys.createdAt"),
        options.page_size,
        |query: &QueryParams| asset::get_many(source, &src, query),
    );
    let mut processed = 0;
    report.assets = for_each(assets, |item| {
        if clone_asset(destination, &dst, &item)? {
            processed += 1;
        }
        Ok(())
    })?;
    report.processed_assets = processed;

    info!(
        content_types = report.content_types,
        entries = report.entries,
        assets = report.assets,
        "clone finished"
    );
    Ok(report)
}

fn destination_space(
    destination: &RestContext,
    source_space: &SpaceProps,
    options: &CloneOptions,
) -> Result<SpaceProps> {
    if let Some(ref space_id) = options.destination_space_id {
        return space::get(destination, &SpaceParams::new(space_id.clone())).map_err(|e| {
            error!(space_id = %space_id, error = %e, "could not find destination space");
            e
        });
    }

    let data = CreateSpaceProps {
        name: format!("Clone of {}", source_space.name),
        default_locale: None,
    };
    let created = space::create(
        destination,
        &data,
        options.destination_organization_id.as_deref(),
    )?;
    info!(space_id = %created.sys.id, "created destination space \"{}\"", created.name);

    // New spaces are not writable right away.
    if !options.creation_delay.is_zero() {
        std::thread::sleep(options.creation_delay);
    }
    Ok(created)
}

fn clone_content_types(
    source: &RestContext,
    destination: &RestContext,
    src: &SpaceEnvironmentParams,
    dst: &SpaceEnvironmentParams,
    options: &CloneOptions,
) -> Result<usize> {
    let content_types = content_type::get_many(
        source,
        src,
        &QueryParams::new().limit(options.content_type_limit),
    )?;
    if content_types.total as usize > content_types.len() {
        warn!(
            total = content_types.total,
            fetched = content_types.len(),
            "source has more content types than fetched"
        );
    }

    let mut count = 0;
    for ct in content_types {
        info!("creating & publishing content type {}", ct.name);
        let mut data = CreateContentTypeProps::from(&ct);
        // Taxonomy links may not exist in the destination.
        data.extra.remove("metadata");
        let created = if ct.sys.id.is_empty() {
            content_type::create(destination, dst, &data)?
        } else {
            content_type::create_with_id(destination, dst, &ct.sys.id, &data)?
        };
        content_type::publish(destination, dst, &created)?;
        count += 1;
    }
    Ok(count)
}

fn create_entry(
    destination: &RestContext,
    dst: &SpaceEnvironmentParams,
    item: &entry::Entry,
) -> Result<()> {
    let content_type_id = item.sys.content_type_id().ok_or_else(|| {
        RestError::Other(format!("entry {} has no content type", item.sys.id))
    })?;
    // Tags and other metadata may not exist in the destination.
    let data = CreateEntryProps {
        fields: item.fields.clone(),
        metadata: None,
    };
    if item.sys.id.is_empty() {
        entry::create(destination, dst, content_type_id, &data)?;
    } else {
        entry::create_with_id(destination, dst, &item.sys.id, content_type_id, &data)?;
    }
    Ok(())
}

/// Create the asset in the destination and trigger processing of its file.
/// Returns whether processing was requested.
fn clone_asset(
    destination: &RestContext,
    dst: &SpaceEnvironmentParams,
    item: &AssetProps,
) -> Result<bool> {
    info!("creating asset {}", item.sys.id);
    let data = destination_asset(item);
    let created = if item.sys.id.is_empty() {
        asset::create(destination, dst, &data)
    } else {
        asset::create_with_id(destination, dst, &item.sys.id, &data)
    }
    .map_err(|e| {
        error!(asset_id = %item.sys.id, error = %e, "error creating asset");
        e
    })?;

    info!("processing asset {}", created.sys.id);
    let locale = match first_locale(&created) {
        Some(locale) => locale.to_string(),
        None => return Ok(false),
    };
    asset::process_for_locale(destination, dst, &created, &locale).map_err(|e| {
        error!(asset_id = %created.sys.id, error = %e, "error processing asset");
        e
    })?;
    Ok(true)
}

/// Reduce a source asset to what can be recreated elsewhere: title,
/// description and the file of its first locale, re-pointed at the
/// source URL so the destination fetches it during processing.
pub fn destination_asset(asset: &AssetProps) -> CreateAssetProps {
    let mut fields = AssetFields {
        title: asset.fields.title.clone(),
        description: asset.fields.description.clone(),
        file: None,
    };

    if let Some((locale, source_file)) = asset.fields.file.as_ref().and_then(|f| f.first()) {
        match source_file.url.as_ref().or(source_file.upload.as_ref()) {
            Some(url) => {
                let mut file = Localized::new();
                file.insert(
                    locale.clone(),
                    AssetFile {
                        file_name: source_file.file_name.clone(),
                        content_type: source_file.content_type.clone(),
                        url: None,
                        upload: Some(absolute_url(url)),
                        upload_from: None,
                        details: None,
                    },
                );
                fields.file = Some(file);
            }
            None => warn!(
                asset_id = %asset.sys.id,
                locale = %locale,
                "asset file has no url, skipping file"
            ),
        }
    }

    CreateAssetProps { fields }
}

/// Locale whose file gets processed
pub fn first_locale(asset: &AssetProps) -> Option<&str> {
    asset
        .fields
        .file
        .as_ref()
        .and_then(|f| f.keys().next())
        .map(String::as_str)
}

/// Asset URLs come protocol-relative (`//images.ctfassets.net/...`)
fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("http:{}", url)
    } else {
        url.to_string()
    }
}

fn for_each<T, F, M>(pages: Pages<T, F>, mut map: M) -> Result<usize>
where
    F: FnMut(&QueryParams) -> Result<Collection<T>>,
    M: FnMut(T) -> Result<()>,
{
    let mut count = 0;
    for page in pages {
        let page = page?;
        info!("cloning {} items at {}/{}", page.len(), page.skip, page.total);
        for item in page {
            map(item)?;
            count += 1;
        }
    }
    Ok(count)
}
