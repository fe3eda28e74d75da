use std::error::Error;

use app::config::{Command, Config, print_usage};
use app::http::{AppState, router};
use services::AppServices;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info,drill_core=warn,tower_http=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn run() -> Result<(), Box<dyn Error>> {
    let command = Config::parse(std::env::args().skip(1), |name| std::env::var(name).ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let config = match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Serve(config) => config,
    };

    let services = AppServices::in_memory(&config.quiz)?;
    let app = router(AppState::new(services.quiz()));

    let listener = TcpListener::bind(config.bind).await?;
    info!(
        addr = %config.bind,
        on_complete = %config.quiz.on_complete,
        reset_after_summary = config.quiz.reset_after_summary,
        "serving security drill on http://{}",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
