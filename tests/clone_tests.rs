mod common;

use common::{collection_json, entry_json, MockApi};
use contentful_management::{clone_space, CloneOptions};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

const SRC: &str = "/spaces/src/environments/master";
const DST: &str = "/spaces/dst/environments/master";

fn options() -> CloneOptions {
    CloneOptions {
        page_size: 2,
        creation_delay: Duration::ZERO,
        destination_organization_id: Some("org1".to_string()),
        ..CloneOptions::new("src")
    }
}

fn mount_source_space(api: &MockApi) {
    api.mount(
        Mock::given(method("GET"))
            .and(path("/spaces/src"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"id": "src", "type": "Space"},
                "name": "Blog"
            }))),
    );
}

fn mount_content_types(api: &MockApi) {
    let ct = json!({
        "sys": {"id": "post", "type": "ContentType", "version": 1},
        "name": "Post",
        "fields": [{"id": "title", "name": "Title", "type": "Symbol"}]
    });
    api.mount(
        Mock::given(method("GET"))
            .and(path(format!("{}/content_types", SRC)))
            .and(query_param("limit", "1000"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(collection_json(vec![ct.clone()], 0, 1)),
            )
            .expect(1),
    );
    api.mount(
        Mock::given(method("PUT"))
            .and(path(format!("{}/content_types/post", DST)))
            .respond_with(ResponseTemplate::new(201).set_body_json(ct.clone()))
            .expect(1),
    );
    api.mount(
        Mock::given(method("PUT"))
            .and(path(format!("{}/content_types/post/published", DST)))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ct))
            .expect(1),
    );
}

fn mount_entries(api: &MockApi) {
    let pages = [
        ("0", vec![entry_json("e1", 1, "post"), entry_json("e2", 4, "post")]),
        ("2", vec![entry_json("e3", 2, "post")]),
        ("3", vec![]),
    ];
    for (skip, items) in pages {
        api.mount(
            Mock::given(method("GET"))
                .and(path(format!("{}/entries", SRC)))
                .and(query_param("skip", skip))
                .and(query_param("limit", "2"))
                .and(query_param("order", "sys.createdAt"))
                .respond_with(ResponseTemplate::new(200).set_body_json(collection_json(
                    items,
                    skip.parse().unwrap(),
                    3,
                )))
                .expect(1),
        );
    }
    api.mount(
        Mock::given(method("PUT"))
            .and(path_regex(r"^/spaces/dst/environments/master/entries/e[123]$"))
            .and(header("X-Contentful-Content-Type", "post"))
            .respond_with(ResponseTemplate::new(201).set_body_json(entry_json("e", 1, "post")))
            .expect(3),
    );
}

fn mount_assets(api: &MockApi) {
    let source_asset = json!({
        "sys": {"id": "a1", "type": "Asset", "version": 3},
        "fields": {
            "title": {"en-US": "Logo"},
            "file": {
                "en-US": {
                    "fileName": "logo.png",
                    "contentType": "image/png",
                    "url": "//images.ctfassets.net/src/logo.png",
                    "details": {"size": 10}
                }
            }
        }
    });
    api.mount(
        Mock::given(method("GET"))
            .and(path(format!("{}/assets", SRC)))
            .and(query_param("skip", "0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(collection_json(vec![source_asset], 0, 1)),
            )
            .expect(1),
    );
    api.mount(
        Mock::given(method("GET"))
            .and(path(format!("{}/assets", SRC)))
            .and(query_param("skip", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(collection_json(vec![], 1, 1)))
            .expect(1),
    );
    api.mount(
        Mock::given(method("PUT"))
            .and(path(format!("{}/assets/a1", DST)))
            .and(body_json(json!({
                "fields": {
                    "title": {"en-US": "Logo"},
                    "file": {
                        "en-US": {
                            "fileName": "logo.png",
                            "contentType": "image/png",
                            "upload": "http://images.ctfassets.net/src/logo.png"
                        }
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sys": {"id": "a1", "type": "Asset", "version": 1},
                "fields": {
                    "title": {"en-US": "Logo"},
                    "file": {
                        "en-US": {
                            "fileName": "logo.png",
                            "contentType": "image/png",
                            "upload": "http://images.ctfassets.net/src/logo.png"
                        }
                    }
                }
            })))
            .expect(1),
    );
    api.mount(
        Mock::given(method("PUT"))
            .and(path(format!("{}/assets/a1/files/en-US/process", DST)))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1),
    );
}

#[test]
fn test_clone_into_new_space() {
    let api = MockApi::start();
    mount_source_space(&api);
    api.mount(
        Mock::given(method("POST"))
            .and(path("/spaces"))
            .and(header("X-Contentful-Organization", "org1"))
            .and(body_json(json!({"name": "Clone of Blog"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sys": {"id": "dst", "type": "Space", "version": 1},
                "name": "Clone of Blog"
            })))
            .expect(1),
    );
    mount_content_types(&api);
    mount_entries(&api);
    mount_assets(&api);

    let ctx = api.context();
    let report = clone_space(&ctx, &ctx, &options()).expect("clone");

    assert_eq!(report.destination_space_id, "dst");
    assert_eq!(report.content_types, 1);
    assert_eq!(report.entries, 3);
    assert_eq!(report.assets, 1);
    assert_eq!(report.processed_assets, 1);
}

#[test]
fn test_clone_into_existing_space() {
    let api = MockApi::start();
    mount_source_space(&api);
    api.mount(
        Mock::given(method("GET"))
            .and(path("/spaces/dst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"id": "dst", "type": "Space"},
                "name": "Existing"
            })))
            .expect(1),
    );
    api.mount(
        Mock::given(method("POST"))
            .and(path("/spaces"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0),
    );
    mount_content_types(&api);
    mount_entries(&api);
    mount_assets(&api);

    let ctx = api.context();
    let report = clone_space(&ctx, &ctx, &options().with_destination("dst")).expect("clone");
    assert_eq!(report.destination_space_id, "dst");
    assert_eq!(report.entries, 3);
}

#[test]
fn test_missing_source_space_stops_clone() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/spaces/src"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "sys": {"type": "Error", "id": "NotFound"},
                "message": "The resource could not be found."
            })))
            .expect(1),
    );

    let ctx = api.context();
    let err = clone_space(&ctx, &ctx, &options()).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(api.received().len(), 1);
}

#[test]
fn test_entry_failure_is_propagated() {
    let api = MockApi::start();
    mount_source_space(&api);
    api.mount(
        Mock::given(method("GET"))
            .and(path("/spaces/dst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"id": "dst", "type": "Space"},
                "name": "Existing"
            }))),
    );
    mount_content_types(&api);
    api.mount(
        Mock::given(method("GET"))
            .and(path(format!("{}/entries", SRC)))
            .respond_with(ResponseTemplate::new(200).set_body_json(collection_json(
                vec![entry_json("e1", 1, "post")],
                0,
                1,
            ))),
    );
    api.mount(
        Mock::given(method("PUT"))
            .and(path(format!("{}/entries/e1", DST)))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "sys": {"type": "Error", "id": "ValidationFailed"},
                "message": "Validation error"
            })))
            .expect(1),
    );

    let ctx = api.context();
    let err = clone_space(&ctx, &ctx, &options().with_destination("dst")).unwrap_err();
    assert_eq!(err.status_code(), Some(422));

    let asset_requests = api
        .received()
        .iter()
        .filter(|r| r.url.path().contains("/assets"))
        .count();
    assert_eq!(asset_requests, 0);
}
