use pos_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // 1. Load configuration and set up the environment
    let config = Config::from_env();
    pos_server::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    pos_server::setup_environment(&config)?;

    tracing::info!(
        "POS server starting (environment: {})",
        config.environment
    );

    // 2. Initialize server state (opens the store)
    let state = ServerState::initialize(&config);

    // 3. Serve until shutdown (bootstraps reference data first)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
