//! Unary-JSON adapter.
//!
//! The same method contract as the binary-RPC adapter, reachable at the same
//! RPC method paths over plain HTTP with JSON bodies. Field names follow the
//! proto schema (`user_id`, `text`, `id`); error mapping mirrors the gRPC
//! status codes translated to HTTP, with empty bodies on error paths. Bodies
//! are parsed by hand so a malformed payload yields 400 regardless of its
//! content type. The echo method is additionally reachable in a GET
//! query-string form for trivial smoke-testing.

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::{Data, Json, Query};
use poem::{handler, Error, IntoResponse, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::grpc::{MESSAGE_VERSION, MESSAGE_VERSION_KEY};
use crate::ops::{OpError, Operations};

#[derive(Debug, Deserialize)]
struct PostBody {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct PostReply {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GetBody {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Serialize)]
struct GetReply {
    user_id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct EchoParams {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct EchoReply {
    user_id: String,
    text: String,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| {
        tracing::warn!(error = %err, "failed to decode request body");
        Error::from_status(StatusCode::BAD_REQUEST)
    })
}

fn http_error(err: OpError) -> Error {
    match err {
        OpError::NotFound(_) => Error::from_status(StatusCode::NOT_FOUND),
        OpError::Internal(_) => Error::from_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[handler]
pub async fn post(body: String, Data(ops): Data<&Arc<Operations>>) -> Result<Json<PostReply>> {
    let body: PostBody = decode(&body)?;
    tracing::info!(user_id = %body.user_id, text = %body.text, "received post request");

    let id = ops
        .post(&body.user_id, &body.text)
        .await
        .map_err(http_error)?;
    Ok(Json(PostReply { id }))
}

#[handler]
pub async fn get(body: String, Data(ops): Data<&Arc<Operations>>) -> Result<Json<GetReply>> {
    let body: GetBody = decode(&body)?;
    tracing::info!(id = %body.id, "received get request");

    let message = ops.get(&body.id).await.map_err(http_error)?;
    Ok(Json(GetReply {
        user_id: message.author,
        text: message.text,
    }))
}

#[handler]
pub async fn ping_pong(body: String) -> Result<impl IntoResponse> {
    let body: EchoParams = decode(&body)?;
    Ok(Json(EchoReply {
        user_id: body.user_id,
        text: body.text,
    })
    .with_header(MESSAGE_VERSION_KEY, MESSAGE_VERSION))
}

/// GET query-string form of the echo method.
#[handler]
pub async fn ping_pong_query(Query(params): Query<EchoParams>) -> impl IntoResponse {
    Json(EchoReply {
        user_id: params.user_id,
        text: params.text,
    })
    .with_header(MESSAGE_VERSION_KEY, MESSAGE_VERSION)
}
