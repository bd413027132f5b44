//! Client behaviour against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every verb over real
//! HTTP through the default ureq transport. Covers the full item lifecycle
//! and the status rules (403 returned, other non-2xx raised).

use crudapi_core::{ApiError, ApiResponse, ClientConfig, CrudClient, ResponseFormat};
use serde_json::json;

const KEY: &str = "integration-key";

/// Spawn the mock server on a background thread and return its base URL,
/// with the trailing slash the client expects.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, KEY).await
        })
        .unwrap();
    });

    format!("http://{addr}/")
}

fn uuid_of(response: &ApiResponse) -> String {
    response.as_json().unwrap()["items"][0]["_uuid"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn crud_lifecycle() {
    let client = CrudClient::new(&start_server(), KEY, false);

    // Step 1: list — empty collection.
    let listed = client.list("posts", None).unwrap();
    assert_eq!(listed.into_json()["count"], 0);

    // Step 2: create a post and a user.
    let saved = client.create("posts", &json!({"title": "My first post"})).unwrap();
    let post_id = uuid_of(&saved);
    let user = client.create("users", &json!({"name": "Juan Doe"})).unwrap();
    let user_id = uuid_of(&user);

    // Step 3: list posts — one item.
    let listed = client.list("posts", None).unwrap().into_json();
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["items"][0]["title"], "My first post");

    // Step 4: get by id.
    let fetched = client
        .list("posts", Some(&post_id))
        .unwrap()
        .into_json();
    assert_eq!(fetched["_uuid"], post_id.as_str());

    // Step 5: update the user.
    let edited = client
        .update("users", &user_id, &json!({"name": "John Doe"}))
        .unwrap()
        .into_json();
    assert_eq!(edited["name"], "John Doe");

    // Step 6: delete the user.
    let deleted = client.remove("users", &user_id).unwrap().into_json();
    assert_eq!(deleted["_uuid"], user_id.as_str());

    // Step 7: get after delete — 404 is raised.
    let err = client
        .list("users", Some(&user_id))
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Incorrect statusCode: 404");
}

#[test]
fn wrong_key_returns_forbidden_body() {
    let client = CrudClient::new(&start_server(), "not-the-key", false);

    let result = client.list("posts", None).unwrap();
    assert_eq!(result.into_json(), json!({"error": "forbidden"}));

    let created = client.create("posts", &json!({"title": "x"})).unwrap();
    assert_eq!(created.into_json()["error"], "forbidden");
}

#[test]
fn text_format_returns_raw_body() {
    let client = CrudClient::new(&start_server(), KEY, false);

    let health = client.list_with_format("health", None, ResponseFormat::Text).unwrap();
    assert_eq!(health.as_text(), Some("ok"));

    client.create("posts", &json!({"title": "raw"})).unwrap();
    let raw = client.list_with_format("posts", None, ResponseFormat::Text).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(raw.as_text().unwrap()).unwrap();
    assert_eq!(reparsed["items"][0]["title"], "raw");
}

#[test]
fn json_format_on_text_body_is_a_decode_error() {
    let client = CrudClient::new(&start_server(), KEY, false);

    let err = client.list("health", None).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unwrapped_create_body_is_rejected_by_server() {
    let client = CrudClient::new(&start_server(), KEY, false);

    // bypass build_create to send a bare object
    let mut request = client.build_create("posts", &json!({"title": "x"})).unwrap();
    request.body = Some(r#"{"title":"x"}"#.to_string());
    let err = client.execute(&request).unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[test]
fn unreachable_server_is_a_network_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig::new(format!("http://{addr}/"), KEY).with_debug(true);
    let client = CrudClient::from_config(config);

    let err = client.list("posts", None).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.message().is_empty());
}

#[test]
fn concurrent_calls_are_independent() {
    let client = CrudClient::new(&start_server(), KEY, false);

    std::thread::scope(|s| {
        for n in 0..8 {
            let client = &client;
            s.spawn(move || {
                client
                    .create("posts", &json!({"title": format!("post {n}")}))
                    .unwrap();
            });
        }
    });

    let listed = client.list("posts", None).unwrap().into_json();
    assert_eq!(listed["count"], 8);
}
