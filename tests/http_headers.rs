use restcall::config::TransportConfig;
use restcall::http::auth::{self, Credentials};
use restcall::http::{ReqwestTransport, RequestOptions};
use restcall::{RestClient, RestConfig};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &MockServer) -> RestClient<ReqwestTransport> {
    let transport = ReqwestTransport::new(TransportConfig::default()).expect("transport");
    RestClient::with_transport(RestConfig::new(server.uri()), transport)
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_csrf_header_sent_on_post_only() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .and(header("X-CSRFToken", "AUTHTOKENX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = client_for(&server).with_mutator(auth::chain(
        auth::credentials(Credentials::SameOrigin),
        auth::csrf_token("X-CSRFToken", "AUTHTOKENX"),
    ));
    let _: Value = api.get("me", None).await.expect("get should succeed");
    let _: Value = api.post_empty("logout").await.expect("post should succeed");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("x-csrftoken").is_none());
    assert_eq!(
        requests[1]
            .headers
            .get("x-csrftoken")
            .and_then(|value| value.to_str().ok()),
        Some("AUTHTOKENX")
    );
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_bearer_header_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let api = client_for(&server).with_mutator(auth::bearer("secret"));
    let body: Value = api.get("me", None).await.expect("request should succeed");
    assert_eq!(body, json!({"id": 1}));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_user_agent_and_custom_header_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header(
            "User-Agent",
            format!("restcall/{}", restcall::VERSION).as_str(),
        ))
        .and(header("X-Test-Header", "restcall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = client_for(&server).with_mutator(|options: &mut RequestOptions| {
        options.set_header("X-Test-Header", "restcall");
        options.set_option("timeout", 5_000);
    });
    let _: Value = api.get("me", None).await.expect("request should succeed");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
}
