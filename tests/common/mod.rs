//! Shared mock API for the HTTP-level tests.
//!
//! The client is blocking, so the wiremock server is driven from a runtime
//! owned by the test and requests are sent from the plain test thread.

#![allow(dead_code)]

use contentful_management::{AccessToken, Config, RestContext};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub const TOKEN: &str = "test-token";

pub struct MockApi {
    // Dropped before the runtime so pending expectations are verified first.
    pub server: MockServer,
    rt: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("failed to build tokio runtime");
        let server = rt.block_on(MockServer::start());
        MockApi { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn config(&self) -> Config {
        let host = self.server.address().to_string();
        Config::new(host.clone())
            .with_insecure(true)
            .with_upload_host(host)
            .with_retry(true, 2)
    }

    pub fn context(&self) -> RestContext {
        self.context_with(self.config())
    }

    pub fn context_with(&self, config: Config) -> RestContext {
        RestContext::with_config(config, AccessToken::new(TOKEN).unwrap())
            .expect("failed to build context")
    }

    pub fn received(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .expect("request recording is enabled")
    }
}

pub fn entry_json(id: &str, version: u64, content_type: &str) -> serde_json::Value {
    serde_json::json!({
        "sys": {
            "id": id,
            "type": "Entry",
            "version": version,
            "createdAt": "2020-01-01T00:00:00.000Z",
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": content_type}}
        },
        "fields": {"title": {"en-US": format!("Title {}", id)}}
    })
}

pub fn collection_json(items: Vec<serde_json::Value>, skip: u32, total: u32) -> serde_json::Value {
    serde_json::json!({
        "sys": {"type": "Array"},
        "total": total,
        "skip": skip,
        "limit": 10,
        "items": items
    })
}
