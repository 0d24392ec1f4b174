//! # contentful-management - Contentful Management API client for Rust
//!
//! A blocking client for the Contentful Management REST API. Each resource
//! (spaces, environments, content types, entries, assets, teams, uploads)
//! has an endpoint module that turns typed calls into requests against the
//! API's URL templates, with the versioning and content-type headers each
//! route expects.
//!
//! ## Features
//!
//! - Typed entities with lossless round-tripping of unknown keys
//! - `select` normalization on every read
//! - Automatic retries for rate-limited (429) and 5xx responses
//! - Page-by-page iteration over collection endpoints
//! - A `clone_space` routine (and `clone-space` binary) copying content
//!   types, entries and assets between spaces
//!
//! ## Basic Usage
//!
//! ```no_run
//! use contentful_management::endpoints::entry;
//! use contentful_management::{AccessToken, QueryParams, RestContext, SpaceEnvironmentParams};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = RestContext::new(AccessToken::new("CFPAT-...")?)?;
//!     let params = SpaceEnvironmentParams::master("cfexampleapi");
//!
//!     let entries = entry::get_many::<contentful_management::KeyValueMap>(
//!         &ctx,
//!         &params,
//!         &QueryParams::new().content_type("cat").select("fields.name"),
//!     )?;
//!
//!     for e in entries {
//!         println!("{} {:?}", e.sys.id, e.fields.get("name"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Walking a collection
//!
//! ```no_run
//! use contentful_management::endpoints::asset;
//! use contentful_management::{
//!     AccessToken, Pages, QueryParams, RestContext, SpaceEnvironmentParams,
//! };
//!
//! let ctx = RestContext::new(AccessToken::new("CFPAT-...")?)?;
//! let params = SpaceEnvironmentParams::master("cfexampleapi");
//!
//! let assets = Pages::new(QueryParams::new().order("sys.createdAt"), 100, |q: &QueryParams| {
//!     asset::get_many(&ctx, &params, q)
//! });
//! for item in assets.items() {
//!     println!("{}", item?.sys.id);
//! }
//! # Ok::<(), contentful_management::RestError>(())
//! ```

pub mod client;
pub mod clone;
pub mod collection;
pub mod endpoints;
pub mod entity;
pub mod error;
pub mod params;
pub mod query;
pub mod rest;
pub mod time;
pub mod token;

// Re-export main types for convenience
pub use client::Config;
pub use clone::{clone_space, CloneOptions, CloneReport};
pub use collection::{Collection, Items, Pages};
pub use entity::{KeyValueMap, Link, Sys};
pub use error::{RestError, Result};
pub use params::{OrganizationParams, SpaceEnvironmentParams, SpaceParams, TeamParams};
pub use query::QueryParams;
pub use rest::{Headers, RestContext};
pub use time::Time;
pub use token::AccessToken;

// Re-export serde_json for convenience
pub use serde_json::json;
