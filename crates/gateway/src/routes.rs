//! Request routing for the single shared listener.
//!
//! One socket serves three protocols. [`ProtocolMux`] splits traffic by
//! negotiated content type: `application/grpc*` requests go to the gRPC
//! router (message service, reflection, health), everything else to the
//! plain-HTTP router (REST, unary JSON, echo GET). Unmatched paths fall
//! through to each protocol's native not-found behavior.

use std::sync::Arc;

use poem::endpoint::BoxEndpoint;
use poem::http::header;
use poem::middleware::AddData;
use poem::{get, post, Endpoint, EndpointExt, Request, Response, Result, Route};
use poem_grpc::{health_service, Reflection, RouteGrpc};

use crate::grpc::MessageGrpcService;
use crate::ops::Operations;
use crate::proto::{MessageServiceServer, FILE_DESCRIPTOR_SET};
use crate::{json, rest};

/// The fixed service-name table consulted by the reflection and health
/// announcers. Static by design; no live liveness check is performed.
pub const SERVICE_NAMES: &[&str] = &["postbox.v1.MessageService"];

/// Demultiplexes the shared socket between the gRPC and plain-HTTP routers.
pub struct ProtocolMux {
    grpc: BoxEndpoint<'static, Response>,
    http: BoxEndpoint<'static, Response>,
}

fn is_grpc(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/grpc"))
}

impl Endpoint for ProtocolMux {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        if is_grpc(&req) {
            self.grpc.call(req).await
        } else {
            self.http.call(req).await
        }
    }
}

/// Assembles the full gateway endpoint over one shared [`Operations`].
pub async fn gateway(ops: Arc<Operations>) -> ProtocolMux {
    let (health, health_reporter) = health_service();
    health_reporter.set_serving::<MessageServiceServer<MessageGrpcService>>();

    let grpc = RouteGrpc::new()
        .add_service(MessageServiceServer::new(MessageGrpcService::new(
            ops.clone(),
        )))
        .add_service(
            Reflection::new()
                .add_file_descriptor_set(FILE_DESCRIPTOR_SET)
                .build(),
        )
        .add_service(health)
        .boxed();

    let http = Route::new()
        .at(
            "/api/v1/MessageService",
            get(rest::get_message).post(rest::post_message),
        )
        .at("/api/v1/MessageService/PingPong", get(json::ping_pong_query))
        .at("/postbox.v1.MessageService/Post", post(json::post))
        .at("/postbox.v1.MessageService/Get", post(json::get))
        .at("/postbox.v1.MessageService/PingPong", post(json::ping_pong))
        .with(AddData::new(ops))
        .boxed();

    ProtocolMux { grpc, http }
}
