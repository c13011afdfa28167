use std::sync::Arc;

use anyhow::{ensure, Context};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use toml::{map::Map, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use util::{get_f32, get_str, get_str_array, get_u64, load_config};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::correction::{
    anthropic::AnthropicProvider, openai::OpenAiProvider, Gateway,
};

pub mod check;
pub mod correction;
pub mod healthz;
pub mod home;
pub mod not_found;
mod response;

pub enum ApiError {
    ClientError(String),
    NotFound,
    Unavailable(String),
}

#[derive(Clone)]
pub struct ApiState {
    gateway: Arc<Gateway>,
}

impl ApiState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub anthropic: AnthropicConfig,
    pub server: ServerConfig,
}

#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub version: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub allowed_origins: Vec<String>,
}

/// Provider credentials. Either may be absent.
#[derive(Clone, Default)]
pub struct Secrets {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn from_toml(config: &Map<String, Value>) -> anyhow::Result<Self> {
        let max_tokens = get_u64(config, "anthropic.max_tokens")?;

        Ok(Self {
            openai: OpenAiConfig {
                base_url: get_str(config, "openai.base_url")?,
                model: get_str(config, "openai.model")?,
                temperature: get_f32(config, "openai.temperature")?,
                timeout_secs: get_u64(config, "openai.timeout_secs")?,
            },
            anthropic: AnthropicConfig {
                base_url: get_str(config, "anthropic.base_url")?,
                model: get_str(config, "anthropic.model")?,
                max_tokens: u32::try_from(max_tokens)
                    .context("config key anthropic.max_tokens is too large")?,
                version: get_str(config, "anthropic.version")?,
                temperature: get_f32(config, "anthropic.temperature")?,
                timeout_secs: get_u64(config, "anthropic.timeout_secs")?,
            },
            server: ServerConfig {
                allowed_origins: get_str_array(
                    config,
                    "server.allowed_origins",
                )?,
            },
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(check::post_check, healthz::get_health),
    components(schemas(
        check::request::CheckRequest,
        check::response::ErrorResponse,
        correction::CorrectionResult,
        correction::CorrectionError,
        correction::ErrorKind,
        healthz::HealthResponse,
    )),
    tags(
        (name = "check", description = "Spelling, grammar and paragraph review")
    )
)]
struct ApiDoc;

pub fn serve(config_name: &str, secrets: Secrets) -> anyhow::Result<Router> {
    info!(task = "start api serving", config = config_name);

    let config = Config::from_toml(&load_config(config_name)?)?;

    if secrets.openai_api_key.is_none() {
        warn!(task = "start api serving", "OPENAI_API_KEY is not set");
    }
    if secrets.anthropic_api_key.is_none() {
        warn!(task = "start api serving", "ANTHROPIC_API_KEY is not set");
    }

    let primary = OpenAiProvider::new(
        &config.openai,
        secrets.openai_api_key.as_deref(),
    )?;
    let secondary = AnthropicProvider::new(
        &config.anthropic,
        secrets.anthropic_api_key.as_deref(),
    )?;
    let gateway = Gateway::new(Arc::new(primary), Arc::new(secondary));

    router(ApiState::new(gateway), &config.server)
}

pub fn router(state: ApiState, server: &ServerConfig) -> anyhow::Result<Router> {
    let origins = server
        .allowed_origins
        .iter()
        .map(|origin| {
            ensure!(origin != "*", "wildcard origin is not allowed");
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid allowed origin {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let api_router = Router::new()
        .route("/", get(home::get_home))
        .route("/healthz", get(healthz::get_health))
        .route("/check", post(check::post_check))
        // legacy client path
        .route("/api/spelling-check", post(check::post_check))
        .with_state(state);

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(api_router)
        .fallback(not_found::get_404)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
