//! Resource shapes shared by the endpoint modules.
//!
//! Every entity carries a [`Sys`] block with its id, type and version.
//! Unknown keys are kept in `extra` maps so that a fetched entity can be
//! written back without losing data.

use crate::time::Time;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped JSON object, the default shape of entry fields
pub type KeyValueMap = serde_json::Map<String, Value>;

/// Per-locale values of a single field, keyed by locale code in API order
pub type Localized<T> = IndexMap<String, T>;

/// System metadata attached to every entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Entity type, e.g. "Entry", "Asset", "Array"
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Time>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Time>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Link>,

    #[serde(flatten)]
    pub extra: KeyValueMap,
}

impl Sys {
    /// Id of the linked content type, for entries
    pub fn content_type_id(&self) -> Option<&str> {
        self.content_type.as_ref().map(Link::id)
    }

    pub fn is_published(&self) -> bool {
        self.published_version.is_some()
    }

    pub fn is_archived(&self) -> bool {
        self.archived_version.is_some()
    }
}

/// Reference to another entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    /// Always "Link"
    #[serde(rename = "type")]
    pub kind: String,
    pub link_type: String,
    pub id: String,
}

impl Link {
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Link {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: link_type.into(),
                id: id.into(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceProps {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProps {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEnvironmentProps {
    pub name: String,
}

/// A field definition of a content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFields {
    pub id: String,
    pub name: String,
    /// Field type, e.g. "Symbol", "Text", "Link", "Array"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub required: bool,
    /// validations, items, linkType, disabled, omitted, ...
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeProps {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<ContentFields>,
    /// metadata and anything else not modeled above
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentTypeProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<ContentFields>,
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

impl From<&ContentTypeProps> for CreateContentTypeProps {
    fn from(ct: &ContentTypeProps) -> Self {
        CreateContentTypeProps {
            name: ct.name.clone(),
            description: ct.description.clone(),
            display_field: ct.display_field.clone(),
            fields: ct.fields.clone(),
            extra: ct.extra.clone(),
        }
    }
}

/// An entry; `T` is the shape of `fields` (field id → locale → value).
///
/// `fields` is absent from responses projected with `select`, so `T` must
/// implement `Default` to be deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryProps<T = KeyValueMap> {
    pub sys: Sys,
    #[serde(default)]
    pub fields: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryProps<T = KeyValueMap> {
    pub fields: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl<T: Clone> From<&EntryProps<T>> for CreateEntryProps<T> {
    fn from(entry: &EntryProps<T>) -> Self {
        CreateEntryProps {
            fields: entry.fields.clone(),
            metadata: entry.metadata.clone(),
        }
    }
}

/// Binary attached to an asset in one locale.
///
/// Before processing, `upload` (a public URL) or `upload_from` (an upload
/// link) names the source; after processing the API fills in `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_from: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Localized<AssetFile>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProps {
    pub sys: Sys,
    #[serde(default)]
    pub fields: AssetFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAssetProps {
    pub fields: AssetFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProps {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: KeyValueMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTeamProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A binary staged on the upload host, referenced from assets by link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProps {
    pub sys: Sys,
}

impl UploadProps {
    /// Link to use as `AssetFile::upload_from`
    pub fn link(&self) -> Link {
        Link::new("Upload", self.sys.id.clone())
    }
}
