use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_server::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(true).with_line_number(true))
        .init();

    let config = Config::parse();
    let store = config.open_store()?;
    if config.in_memory {
        tracing::info!("using in-memory store");
    } else {
        tracing::info!(path = %config.database.display(), "using sqlite store");
    }

    let listener = TcpListener::bind(config.bind_addr()).await?;
    todo_server::run(listener, store).await
}
