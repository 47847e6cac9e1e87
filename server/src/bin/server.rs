use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use vox_core::{GeminiClient, Synthesizer, VoxConfig};
use vox_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,vox_core=info,vox_server=info,tower_http=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Defaults + env + optional TOML overlay; refuse to start without a key
    let cfg = VoxConfig::load();
    cfg.validate()?;

    let backend = GeminiClient::new(cfg.gemini.clone())?;
    let state = AppState::new(Synthesizer::new(Arc::new(backend)), cfg.output.dir.clone());

    if let Some(dir) = &cfg.output.dir {
        tokio::fs::create_dir_all(dir).await?;
        info!(target: "vox_server", dir = %dir.display(), "Persisting synthesized audio");
    }

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    info!(target: "vox_server", addr = %addr, model = %cfg.gemini.model, "Starting Vox server");
    let listener = TcpListener::bind(&addr).await?;

    tokio::select! {
        res = serve(listener, state) => res?,
        _ = tokio::signal::ctrl_c() => {
            info!(target: "vox_server", "Shutting down...");
        }
    }
    Ok(())
}
