//! # postbox-gateway
//!
//! A gateway exposing one logical message service — store a message,
//! retrieve it by identifier — through three wire protocols multiplexed on
//! a single port, built on [poem](https://docs.rs/poem) and
//! [poem-grpc](https://docs.rs/poem-grpc):
//!
//! - **Binary gRPC** over cleartext HTTP/2 at `/postbox.v1.MessageService/*`,
//!   with reflection and health services alongside.
//! - **Unary JSON** at the same method paths over plain HTTP, selected by
//!   content type.
//! - **REST/JSON** at `/api/v1/MessageService` with a hand-defined envelope.
//!
//! Every adapter routes through the shared [`ops::Operations`] layer, so
//! identical input via any protocol yields identical stored state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postbox_gateway::GatewayServer;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     postbox_gateway::telemetry::init();
//!     GatewayServer::new().start().await
//! }
//! ```

pub mod grpc;
pub mod id;
pub mod json;
pub mod ops;
pub mod proto;
pub mod rest;
pub mod routes;
pub mod store;
pub mod telemetry;

mod server;

pub use server::GatewayServer;
