use std::net::{Ipv4Addr, SocketAddr};

use api::{serve, Secrets};
use tokio::net::TcpListener;
use toml::map::Map;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use util::{load_env, secret};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets = load_env("Secrets.dev.toml").unwrap_or_else(|e| {
        warn!(task = "load secrets", err = %e, "using environment only");
        Map::new()
    });

    let config_name = secret(&secrets, "CONFIG")
        .map(|config| format!("Config.{}.toml", config))
        .unwrap_or_else(|| "Config.toml".to_string());

    let router = serve(
        &config_name,
        Secrets {
            openai_api_key: secret(&secrets, "OPENAI_API_KEY"),
            anthropic_api_key: secret(&secrets, "ANTHROPIC_API_KEY"),
        },
    )?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8000));
    let listener = TcpListener::bind(&address).await?;
    Ok(axum::serve(listener, router).await?)
}
