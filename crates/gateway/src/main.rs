use std::io;

use postbox_gateway::GatewayServer;

#[tokio::main]
async fn main() -> io::Result<()> {
    postbox_gateway::telemetry::init();
    GatewayServer::new().start().await
}
