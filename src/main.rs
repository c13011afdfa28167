use api::Secrets as ApiSecrets;
use shuttle_runtime::{Error, SecretStore, Secrets};
use tracing_subscriber::EnvFilter;

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let get = |name: &str| {
        std::env::var(name)
            .ok()
            .or_else(|| secret_store.get(name))
            .filter(|value| !value.trim().is_empty())
    };

    let config_name = get("CONFIG")
        .map(|config| format!("Config.{}.toml", config))
        .unwrap_or_else(|| "Config.toml".to_string());

    let router = api::serve(
        &config_name,
        ApiSecrets {
            openai_api_key: get("OPENAI_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
        },
    )
    .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
