//! End-to-end tests over the assembled gateway endpoint: REST, unary JSON,
//! the echo GET form, and mixed-adapter round trips against one shared
//! operation layer.

use std::sync::Arc;

use poem::http::StatusCode;
use poem::test::TestClient;
use poem_grpc::Request;
use postbox_gateway::grpc::MessageGrpcService;
use postbox_gateway::ops::Operations;
use postbox_gateway::proto::{GetRequest, MessageService, PostRequest};
use postbox_gateway::routes::{self, ProtocolMux};
use serde_json::json;

async fn client() -> (Arc<Operations>, TestClient<ProtocolMux>) {
    let ops = Arc::new(Operations::in_memory());
    let mux = routes::gateway(ops.clone()).await;
    (ops, TestClient::new(mux))
}

#[tokio::test]
async fn rest_post_then_rest_get_round_trips() {
    let (_, cli) = client().await;

    let posted = cli
        .post("/api/v1/MessageService")
        .body_json(&json!({"user_id": "alice", "text": "hello"}))
        .send()
        .await;
    posted.assert_status_is_ok();
    let id = posted.json().await.value().object().get("id").string().to_string();
    assert!(!id.is_empty());

    let got = cli.get(format!("/api/v1/MessageService?id={id}")).send().await;
    got.assert_status_is_ok();
    let body = got.json().await;
    let body = body.value().object();
    assert_eq!(body.get("user_id").string(), "alice");
    assert_eq!(body.get("text").string(), "hello");
}

#[tokio::test]
async fn rest_post_with_non_json_body_is_bad_request() {
    let (_, cli) = client().await;

    let resp = cli
        .post("/api/v1/MessageService")
        .body("definitely not json")
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rest_get_without_id_param_is_not_found() {
    let (_, cli) = client().await;

    let resp = cli.get("/api/v1/MessageService").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rest_unsupported_verb_is_method_not_allowed() {
    let (_, cli) = client().await;

    let resp = cli.put("/api/v1/MessageService").send().await;
    resp.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unary_json_post_then_get_round_trips() {
    let (_, cli) = client().await;

    let posted = cli
        .post("/postbox.v1.MessageService/Post")
        .body_json(&json!({"user_id": "bob", "text": "via json"}))
        .send()
        .await;
    posted.assert_status_is_ok();
    let id = posted.json().await.value().object().get("id").string().to_string();

    let got = cli
        .post("/postbox.v1.MessageService/Get")
        .body_json(&json!({"id": id}))
        .send()
        .await;
    got.assert_status_is_ok();
    let body = got.json().await;
    let body = body.value().object();
    assert_eq!(body.get("user_id").string(), "bob");
    assert_eq!(body.get("text").string(), "via json");
}

#[tokio::test]
async fn unary_json_post_with_non_json_body_is_bad_request() {
    let (_, cli) = client().await;

    // Malformed payloads answer 400 whatever the declared content type.
    let resp = cli
        .post("/postbox.v1.MessageService/Post")
        .content_type("text/plain")
        .body("definitely not json")
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = cli
        .post("/postbox.v1.MessageService/Post")
        .content_type("application/json")
        .body("definitely not json")
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unary_json_get_unknown_id_is_not_found() {
    let (_, cli) = client().await;

    let resp = cli
        .post("/postbox.v1.MessageService/Get")
        .body_json(&json!({"id": "no-such-id"}))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn echo_get_form_echoes_and_tags_the_version() {
    let (_, cli) = client().await;

    let resp = cli
        .get("/api/v1/MessageService/PingPong?user_id=alice&text=hi")
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_header("message-version", "v1");
    let body = resp.json().await;
    let body = body.value().object();
    assert_eq!(body.get("user_id").string(), "alice");
    assert_eq!(body.get("text").string(), "hi");
}

#[tokio::test]
async fn echo_json_form_echoes_and_tags_the_version() {
    let (_, cli) = client().await;

    let resp = cli
        .post("/postbox.v1.MessageService/PingPong")
        .body_json(&json!({"user_id": "alice", "text": "hi"}))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_header("message-version", "v1");
    let body = resp.json().await;
    let body = body.value().object();
    assert_eq!(body.get("user_id").string(), "alice");
    assert_eq!(body.get("text").string(), "hi");
}

#[tokio::test]
async fn echo_plain_path_rejects_other_verbs() {
    let (_, cli) = client().await;

    let resp = cli.post("/api/v1/MessageService/PingPong").send().await;
    resp.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unmatched_path_is_not_found() {
    let (_, cli) = client().await;

    let resp = cli.get("/api/v1/SomethingElse").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn message_posted_via_grpc_adapter_is_visible_to_rest() {
    let (ops, cli) = client().await;
    let grpc = MessageGrpcService::new(ops);

    let posted = grpc
        .post(Request::new(PostRequest {
            user_id: "carol".to_string(),
            text: "cross protocol".to_string(),
        }))
        .await
        .expect("grpc post");

    let got = cli
        .get(format!("/api/v1/MessageService?id={}", posted.id))
        .send()
        .await;
    got.assert_status_is_ok();
    let body = got.json().await;
    let body = body.value().object();
    assert_eq!(body.get("user_id").string(), "carol");
    assert_eq!(body.get("text").string(), "cross protocol");
}

#[tokio::test]
async fn message_posted_via_rest_is_visible_to_grpc_adapter() {
    let (ops, cli) = client().await;
    let grpc = MessageGrpcService::new(ops);

    let posted = cli
        .post("/api/v1/MessageService")
        .body_json(&json!({"user_id": "dave", "text": "the other way"}))
        .send()
        .await;
    posted.assert_status_is_ok();
    let id = posted.json().await.value().object().get("id").string().to_string();

    let got = grpc
        .get(Request::new(GetRequest { id }))
        .await
        .expect("grpc get");
    assert_eq!(got.user_id, "dave");
    assert_eq!(got.text, "the other way");
}

#[tokio::test]
async fn identical_rest_posts_yield_distinct_ids() {
    let (_, cli) = client().await;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let posted = cli
            .post("/api/v1/MessageService")
            .body_json(&json!({"user_id": "erin", "text": "same payload"}))
            .send()
            .await;
        posted.assert_status_is_ok();
        ids.push(posted.json().await.value().object().get("id").string().to_string());
    }

    assert_ne!(ids[0], ids[1]);
}
