use anyhow::{Context, Result};
use clap::Parser;
use signsync::{
    create_router, AppState, Config, HealthMonitor, HttpAuthClient, HttpGestureClient,
    PipelineConfig, SessionStore, StreamSession, TrainingCapture,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "signsync", about = "Gesture streaming engine")]
struct Args {
    /// Config file (without extension), loaded via the config crate
    #[arg(long, default_value = "config/signsync")]
    config: String,

    /// Override the configured bind address (host:port)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("SignSync engine v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Gesture engine at {}", cfg.engine.base_url);
    info!("Auth service at {}", cfg.auth.base_url);

    let service: Arc<dyn signsync::GestureService> =
        Arc::new(HttpGestureClient::new(&cfg.engine.base_url));
    let auth_api: Arc<dyn signsync::AuthApi> = Arc::new(HttpAuthClient::new(&cfg.auth.base_url));

    // Rehydrate any persisted session before the API starts serving.
    let session_path = cfg
        .auth
        .session_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(SessionStore::default_path);
    let auth = Arc::new(SessionStore::open(auth_api, session_path)?);

    let pipeline_config = PipelineConfig {
        camera: cfg.camera.camera_config(),
        language: cfg.engine.language,
        capture_interval: Duration::from_millis(cfg.training.interval_ms),
        capture_target: cfg.training.target_samples,
    };

    let stream = Arc::new(StreamSession::new(
        pipeline_config.clone(),
        Arc::clone(&service),
    ));
    let training = Arc::new(TrainingCapture::new(
        &pipeline_config,
        Arc::clone(&service),
        stream.latest_hands(),
        stream.streaming_flag(),
    ));

    let monitor = HealthMonitor::new(
        Arc::clone(&service),
        stream.state(),
        Duration::from_secs(cfg.engine.health_interval_secs),
    );
    monitor.start().await;

    let app_state = AppState {
        stream,
        training,
        auth,
        service,
        camera_source: cfg.camera.source()?,
        detector: cfg.detector.clone(),
    };

    let router = create_router(app_state);
    let bind = args
        .bind
        .unwrap_or_else(|| format!("{}:{}", cfg.service.http.bind, cfg.service.http.port));
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    info!("Control API listening on {}", bind);
    axum::serve(listener, router).await?;

    Ok(())
}
