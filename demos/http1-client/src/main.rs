//! Demo consumer of the gateway's REST surface over plain HTTP/1.1.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct PostEnvelope<'a> {
    user_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostedEnvelope {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    user_id: String,
    text: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let base = std::env::var("POSTBOX_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost:8081".to_string());
    let client = reqwest::Client::new();

    let posted: PostedEnvelope = client
        .post(format!("{base}/api/v1/MessageService"))
        .json(&PostEnvelope {
            user_id: "12345",
            text: "Hello, World!",
        })
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("posted id: {}", posted.id);

    let message: MessageEnvelope = client
        .get(format!("{base}/api/v1/MessageService"))
        .query(&[("id", posted.id.as_str())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("got: user_id={} text={}", message.user_id, message.text);

    Ok(())
}
