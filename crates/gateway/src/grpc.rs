//! Binary-RPC adapter: the generated `MessageService` trait implemented over
//! the shared operation layer.

use std::sync::Arc;

use poem_grpc::{Code, Request, Response, Status};

use crate::ops::{OpError, Operations};
use crate::proto::{
    GetRequest, GetResponse, MessageService, PingPongRequest, PingPongResponse, PostRequest,
    PostResponse,
};

/// Response metadata key carrying the negotiated protocol version.
pub const MESSAGE_VERSION_KEY: &str = "message-version";
/// Version tag attached by the echo method.
pub const MESSAGE_VERSION: &str = "v1";

/// gRPC front end over [`Operations`].
pub struct MessageGrpcService {
    ops: Arc<Operations>,
}

impl MessageGrpcService {
    pub fn new(ops: Arc<Operations>) -> Self {
        Self { ops }
    }
}

fn status(err: OpError) -> Status {
    let code = match err {
        OpError::NotFound(_) => Code::NotFound,
        OpError::Internal(_) => Code::Internal,
    };
    Status::new(code).with_message(err.to_string())
}

impl MessageService for MessageGrpcService {
    async fn post(
        &self,
        request: Request<PostRequest>,
    ) -> Result<Response<PostResponse>, Status> {
        tracing::info!(user_id = %request.user_id, text = %request.text, "received post request");

        let id = self
            .ops
            .post(&request.user_id, &request.text)
            .await
            .map_err(status)?;

        Ok(Response::new(PostResponse { id }))
    }

    async fn get(&self, request: Request<GetRequest>) -> Result<Response<GetResponse>, Status> {
        tracing::info!(id = %request.id, "received get request");

        let message = self.ops.get(&request.id).await.map_err(status)?;

        Ok(Response::new(GetResponse {
            user_id: message.author,
            text: message.text,
        }))
    }

    async fn ping_pong(
        &self,
        request: Request<PingPongRequest>,
    ) -> Result<Response<PingPongResponse>, Status> {
        let mut response = Response::new(PingPongResponse {
            user_id: request.user_id.clone(),
            text: request.text.clone(),
        });
        response
            .metadata_mut()
            .insert(MESSAGE_VERSION_KEY, MESSAGE_VERSION);
        Ok(response)
    }
}
