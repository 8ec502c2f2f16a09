//! Coverdesk HTTP Server binary

use coverdesk_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load(None)?;
    coverdesk_server::serve(config).await
}
