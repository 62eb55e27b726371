//! Mock key server helpers

use std::time::Duration;
use tek_stats::{Config, HttpTransport, Pipeline};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount the batch index
pub async fn mount_index(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/keys/index"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount one batch archive, expecting exactly one request for it
pub async fn mount_batch(server: &MockServer, id: i64, archive: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/keys/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .expect(1)
        .mount(server)
        .await;
}

/// Config pointing at the mock server
pub fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// HTTP-backed pipeline pointing at the mock server
pub fn pipeline_for(server: &MockServer) -> Pipeline<HttpTransport> {
    pipeline_with(config_for(server))
}

/// HTTP-backed pipeline for an explicit config
pub fn pipeline_with(config: Config) -> Pipeline<HttpTransport> {
    let transport = HttpTransport::new(&config).unwrap();
    Pipeline::new(transport, config)
}
