use pricing_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env, configuration, logging
    let config = setup_environment()?;

    tracing::info!(
        "Pricing server v{} starting (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // 2. State over the in-memory store
    let state = ServerState::initialize(&config);

    // 3. Serve until Ctrl-C / SIGTERM
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
