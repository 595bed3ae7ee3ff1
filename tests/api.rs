use cove_client::{
    bootstrap,
    client::Client,
    error::{Error, Operation},
    models::Timestamp,
    secrets,
};
use serde_json::json;
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const TOKEN: &str = "test-secret";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A Cove stand-in that answers 401 to anything not matched by a mounted mock.
async fn cove() -> (MockServer, Client) {
    init_logger();

    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .with_priority(u8::MAX)
        .mount(&server)
        .await;

    let client = Client::new(format!("{}/", server.uri()), TOKEN);
    (server, client)
}

fn authed(verb: &str, route: &str) -> wiremock::MockBuilder {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("authorization", "Bearer test-secret"))
}

#[tokio::test]
async fn get_secret() {
    let (server, client) = cove().await;
    authed("GET", "/secrets/api-key")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"secret": "supersecret"})))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(secrets::get(&client, "api-key").await.unwrap(), "supersecret");
}

#[tokio::test]
async fn wrong_token_is_a_status_error() {
    let (server, _) = cove().await;
    authed("GET", "/secrets/api-key")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"secret": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), "someone-else");
    let err = client.get_secret("api-key").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn get_secret_truncated_body() {
    let (server, client) = cove().await;
    authed("GET", "/secrets/api-key")
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"secret":"#))
        .mount(&server)
        .await;

    let err = client.get_secret("api-key").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            operation: Operation::GetSecret,
            ..
        }
    ));
}

#[tokio::test]
async fn list_secrets() {
    let (server, client) = cove().await;
    authed("GET", "/secrets")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "api-key", "dateAdded": "2025-07-01", "lastModified": "2025-07-02"},
            {"key": "db-token", "version": 4, "timesPulled": 9,
             "dateAdded": "2025-07-03T12:00:00Z", "lastModified": "2025-07-04T12:00:00Z"},
        ])))
        .mount(&server)
        .await;

    let entries = secrets::all(&client).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, "api-key");
    assert_eq!(entries[0].date_added, Timestamp::Raw("2025-07-01".into()));
    assert_eq!(entries[1].key, "db-token");
    assert_eq!(entries[1].times_pulled, Some(9));
    assert!(entries[1].last_modified.as_datetime().is_some());
}

#[tokio::test]
async fn list_secrets_empty() {
    let (server, client) = cove().await;
    authed("GET", "/secrets")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.list_secrets().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_secrets_server_error() {
    let (server, client) = cove().await;
    authed("GET", "/secrets")
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list_secrets().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), None);
}

#[tokio::test]
async fn add_secret() {
    let (server, client) = cove().await;
    authed("POST", "/secrets/new-key")
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"secretID": "new-key", "secretValue": "value123"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Operation successful"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let msg = client.add_secret("new-key", "value123").await.unwrap();
    assert_eq!(msg, "Operation successful");
}

#[tokio::test]
async fn add_secret_conflict_keeps_body() {
    let (server, client) = cove().await;
    authed("POST", "/secrets/api-key")
        .respond_with(ResponseTemplate::new(409).set_body_string("secret already exists"))
        .mount(&server)
        .await;

    let err = secrets::add(&client, "api-key", "v").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.body(), Some("secret already exists"));
    assert!(err.to_string().contains("secret already exists"));
}

#[tokio::test]
async fn update_secret() {
    let (server, client) = cove().await;
    authed("PATCH", "/secrets/api-key")
        .and(body_json(json!({"secretID": "api-key", "secretValue": "updated123"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.update_secret("api-key", "updated123").await.unwrap();
}

#[tokio::test]
async fn update_secret_rejects_ok() {
    let (server, client) = cove().await;
    authed("PATCH", "/secrets/api-key")
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Operation successful"})),
        )
        .mount(&server)
        .await;

    let err = secrets::update(&client, "api-key", "x").await.unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert!(err.body().unwrap().contains("Operation successful"));
}

#[tokio::test]
async fn delete_secret() {
    let (server, client) = cove().await;
    authed("DELETE", "/secrets/api-key")
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"secretID": "api-key", "secretValue": ""})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    secrets::remove(&client, "api-key").await.unwrap();
}

#[tokio::test]
async fn delete_missing_secret() {
    let (server, client) = cove().await;
    authed("DELETE", "/secrets/ghost")
        .respond_with(ResponseTemplate::new(404).set_body_string("secret not found"))
        .mount(&server)
        .await;

    let err = client.delete_secret("ghost").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body(), Some("secret not found"));
}

#[tokio::test]
async fn bootstrap_is_anonymous() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bootstrap/lighthouse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"secret": "beacon"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), TOKEN);
    assert_eq!(bootstrap::lighthouse(&client).await.unwrap(), "beacon");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn bootstrap_unavailable() {
    let (server, client) = cove().await;
    Mock::given(method("GET"))
        .and(path("/bootstrap/lighthouse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.bootstrap().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn shared_client_serves_concurrent_callers() {
    let (server, client) = cove().await;
    authed("GET", "/secrets/api-key")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"secret": "supersecret"})))
        .expect(16)
        .mount(&server)
        .await;

    let calls = (0..16).map(|_| client.get_secret("api-key"));
    let results = futures::future::join_all(calls).await;

    assert!(results
        .into_iter()
        .all(|r| r.map(|s| s == "supersecret").unwrap_or(false)));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    init_logger();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = Client::new(format!("http://127.0.0.1:{}", port), TOKEN);

    let err = client.get_secret("api-key").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            operation: Operation::GetSecret,
            ..
        }
    ));
    assert_eq!(err.status(), None);

    let err = client.bootstrap().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            operation: Operation::Bootstrap,
            ..
        }
    ));
}

#[tokio::test]
async fn ids_with_reserved_characters_round_trip() {
    let (server, client) = cove().await;
    authed("GET", "/secrets/db%20password")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"secret": "hunter2"})))
        .expect(1)
        .mount(&server)
        .await;
    authed("PATCH", "/secrets/cl%C3%A9")
        .and(body_json(json!({"secretID": "clé", "secretValue": "v2"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.get_secret("db password").await.unwrap(), "hunter2");
    client.update_secret("clé", "v2").await.unwrap();
}
