use anyhow::{Context, Result};
use clap::Parser;
use meeting_scribe::{create_router, AppState, Config};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "meeting-scribe", about = "Meeting audio analysis and minutes export")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/meeting-scribe")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!("model: {}", cfg.gemini.model);
    info!("scratch directory: {}", cfg.uploads.dir);

    std::fs::create_dir_all(&cfg.uploads.dir)
        .with_context(|| format!("failed to create upload directory {}", cfg.uploads.dir))?;

    let state = AppState::new(&cfg);
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
