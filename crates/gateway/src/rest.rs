//! REST adapter.
//!
//! One path, verb-dispatched, with a hand-defined JSON envelope that is
//! deliberately decoupled from the proto schema: adapters may diverge in
//! wire shape as long as they share the operation layer. Error paths reply
//! with a bare status code and no body.

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::{Data, Json, Query};
use poem::{handler, Error, Result};
use serde::{Deserialize, Serialize};

use crate::ops::{OpError, Operations};

#[derive(Debug, Deserialize)]
struct PostEnvelope {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct PostedEnvelope {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GetParams {
    // An absent `id` behaves like an unknown identifier and yields 404.
    #[serde(default)]
    id: String,
}

#[derive(Debug, Serialize)]
struct MessageEnvelope {
    user_id: String,
    text: String,
}

fn http_error(err: OpError) -> Error {
    match err {
        OpError::NotFound(_) => Error::from_status(StatusCode::NOT_FOUND),
        OpError::Internal(_) => Error::from_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// `POST /api/v1/MessageService` with `{user_id, text}`.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that any non-JSON payload yields 400 regardless of its content type.
#[handler]
pub async fn post_message(
    body: String,
    Data(ops): Data<&Arc<Operations>>,
) -> Result<Json<PostedEnvelope>> {
    let envelope: PostEnvelope = serde_json::from_str(&body).map_err(|err| {
        tracing::warn!(error = %err, "failed to decode request body");
        Error::from_status(StatusCode::BAD_REQUEST)
    })?;

    let id = ops
        .post(&envelope.user_id, &envelope.text)
        .await
        .map_err(http_error)?;
    Ok(Json(PostedEnvelope { id }))
}

/// `GET /api/v1/MessageService?id=`.
#[handler]
pub async fn get_message(
    Query(params): Query<GetParams>,
    Data(ops): Data<&Arc<Operations>>,
) -> Result<Json<MessageEnvelope>> {
    let message = ops.get(&params.id).await.map_err(http_error)?;
    Ok(Json(MessageEnvelope {
        user_id: message.author,
        text: message.text,
    }))
}
