//! Demo consumer of the gateway's binary gRPC surface: posts a message,
//! retrieves it, and echoes through `PingPong` to show the version metadata.

use poem_grpc::{ClientConfig, Request};

poem_grpc::include_proto!("postbox.v1");

#[tokio::main]
async fn main() {
    let uri = std::env::var("POSTBOX_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost:8081".to_string());
    let client = MessageServiceClient::new(
        ClientConfig::builder()
            .uri(uri)
            .build()
            .expect("client config should build"),
    );

    let posted = client
        .post(Request::new(PostRequest {
            user_id: "demo-user".to_string(),
            text: "test".to_string(),
        }))
        .await
        .expect("post should succeed");
    println!("posted id: {}", posted.id);

    let got = client
        .get(Request::new(GetRequest {
            id: posted.id.clone(),
        }))
        .await
        .expect("get should succeed");
    println!("got: user_id={} text={}", got.user_id, got.text);

    let pong = client
        .ping_pong(Request::new(PingPongRequest {
            user_id: "demo-user".to_string(),
            text: "ping".to_string(),
        }))
        .await
        .expect("ping pong should succeed");
    println!(
        "pong: user_id={} text={} version={:?}",
        pong.user_id,
        pong.text,
        pong.metadata().get("message-version")
    );
}
