use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use antria::bot::{Dispatcher, SessionStore};
use antria::config::Config;
use antria::domain::{DomainGateway, MemoryGateway};
use antria::domain::seed::SeedData;
use antria::gateway::stdio::StdoutSender;
use antria::gateway::{MessageSender, NullSender};
use antria::server::{AppState, build_app};

#[derive(Parser)]
#[command(name = "antria", version, about = "Conversational reservation assistant for clinics")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = ".antria/config.yaml")]
    config: PathBuf,

    /// Attach a JSON-Lines transport on stdin/stdout.
    #[arg(long)]
    stdio_gateway: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let seed = SeedData::load(&config.seed_path)
        .await
        .with_context(|| format!("loading seed from {}", config.seed_path.display()))?;
    info!(
        doctors = seed.doctors.len(),
        departments = seed.departments.len(),
        "seed loaded"
    );

    let store = Arc::new(MemoryGateway::from_seed(seed));
    let default_department = store.ensure_department(&config.bot.default_department);

    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.bot.session_ttl_seconds,
    )));
    let sender: Arc<dyn MessageSender> = if cli.stdio_gateway {
        Arc::new(StdoutSender::new())
    } else {
        Arc::new(NullSender)
    };
    let dispatcher = Arc::new(Dispatcher::new(
        sessions,
        store.clone() as Arc<dyn DomainGateway>,
        sender,
        default_department.id,
        config.bot.admin_phone.clone(),
    ));

    if cli.stdio_gateway {
        let gateway_dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            if let Err(err) = antria::gateway::stdio::run(gateway_dispatcher).await {
                tracing::error!(error = %err, "stdio gateway stopped");
            }
        });
    }

    let state = AppState {
        store,
        dispatcher,
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
