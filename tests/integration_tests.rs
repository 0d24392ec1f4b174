//! Tests against the live Management API.
//!
//! Run with:
//! `CONTENTFUL_MANAGEMENT_ACCESS_TOKEN=... CONTENTFUL_SPACE_ID=... cargo test --test integration_tests -- --ignored`

use contentful_management::endpoints::{content_type, entry, space};
use contentful_management::{
    AccessToken, KeyValueMap, Pages, QueryParams, RestContext, RestError, SpaceEnvironmentParams,
    SpaceParams,
};

fn live_context() -> (RestContext, String) {
    let token = std::env::var("CONTENTFUL_MANAGEMENT_ACCESS_TOKEN")
        .expect("CONTENTFUL_MANAGEMENT_ACCESS_TOKEN must be set");
    let space_id = std::env::var("CONTENTFUL_SPACE_ID").expect("CONTENTFUL_SPACE_ID must be set");
    let ctx = RestContext::new(AccessToken::new(token).expect("valid token")).expect("context");
    (ctx, space_id)
}

#[test]
#[ignore]
fn test_get_space() {
    let (ctx, space_id) = live_context();

    let space = space::get(&ctx, &SpaceParams::new(space_id.clone())).expect("failed to get space");
    assert_eq!(space.sys.id, space_id);
    assert!(!space.name.is_empty(), "expected a space name");

    println!("Space: {} ({})", space.name, space.sys.id);
}

#[test]
#[ignore]
fn test_missing_space() {
    let (ctx, _) = live_context();

    let result = space::get(&ctx, &SpaceParams::new("this-space-does-not-exist"));
    match result.unwrap_err() {
        err @ RestError::Api { .. } => {
            assert!(err.is_not_found(), "expected not found, got {:?}", err);
        }
        other => panic!("expected RestError::Api, got {:?}", other),
    }
}

#[test]
#[ignore]
fn test_select_projection() {
    let (ctx, space_id) = live_context();
    let params = SpaceEnvironmentParams::master(space_id);

    let content_types = content_type::get_many(&ctx, &params, &QueryParams::new().limit(1))
        .expect("failed to list content types");
    let Some(ct) = content_types.items.first() else {
        println!("space has no content types, skipping");
        return;
    };

    let query = QueryParams::new()
        .content_type(ct.sys.id.clone())
        .select("fields")
        .limit(5);
    let entries = entry::get_many::<KeyValueMap>(&ctx, &params, &query)
        .expect("select without sys should be normalized");
    for e in &entries.items {
        assert!(!e.sys.id.is_empty());
    }
}

#[test]
#[ignore]
fn test_walk_entries() {
    let (ctx, space_id) = live_context();
    let params = SpaceEnvironmentParams::master(space_id);

    let mut count = 0;
    let pages = Pages::new(QueryParams::new().order("sys.createdAt"), 100, |q: &QueryParams| {
        entry::get_many::<KeyValueMap>(&ctx, &params, q)
    });
    for page in pages {
        let page = page.expect("failed to fetch page");
        assert_eq!(page.skip as usize, count);
        count += page.items.len();
    }

    println!("Walked {} entries", count);
}
