//! Common test utilities for profile-scan integration tests

#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

use profile_scan::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing the fetcher at a mock server
#[allow(dead_code)]
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.fetch.base_url = server.uri();
    config
}

/// Serve `body` as the repositories page of `identifier`
#[allow(dead_code)]
pub async fn mount_profile(server: &MockServer, identifier: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{identifier}")))
        .and(query_param("tab", "repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
