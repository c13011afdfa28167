use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use toml::{map::Map, Value};

pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to locate workspace")?
        .stdout;
    let cargo_path = Path::new(
        std::str::from_utf8(&output)
            .context("workspace path is not utf-8")?
            .trim(),
    );
    cargo_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("workspace manifest has no parent directory"))
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    load_toml(&workspace_dir()?.join(config_name))
}

pub fn load_env(secrets_name: &str) -> anyhow::Result<Map<String, Value>> {
    load_toml(&workspace_dir()?.join(secrets_name))
}

pub fn load_toml(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Looks up a dotted key such as `openai.model`.
pub fn lookup<'a>(
    config: &'a Map<String, Value>,
    key: &str,
) -> anyhow::Result<&'a Value> {
    let mut parts = key.split('.');
    let first = parts.next().unwrap_or_default();
    let mut value = config
        .get(first)
        .ok_or_else(|| anyhow!("config key {} is missing", key))?;

    for part in parts {
        value = value
            .get(part)
            .ok_or_else(|| anyhow!("config key {} is missing", key))?;
    }

    Ok(value)
}

pub fn get_str(config: &Map<String, Value>, key: &str) -> anyhow::Result<String> {
    lookup(config, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("config key {} must be a string", key))
}

pub fn get_u64(config: &Map<String, Value>, key: &str) -> anyhow::Result<u64> {
    let value = lookup(config, key)?
        .as_integer()
        .ok_or_else(|| anyhow!("config key {} must be an integer", key))?;

    u64::try_from(value)
        .with_context(|| format!("config key {} must not be negative", key))
}

pub fn get_f32(config: &Map<String, Value>, key: &str) -> anyhow::Result<f32> {
    let value = lookup(config, key)?;
    let value = value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .ok_or_else(|| anyhow!("config key {} must be a number", key))?;

    Ok(value as f32)
}

pub fn get_str_array(
    config: &Map<String, Value>,
    key: &str,
) -> anyhow::Result<Vec<String>> {
    lookup(config, key)?
        .as_array()
        .ok_or_else(|| anyhow!("config key {} must be an array", key))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("config key {} must hold strings", key))
        })
        .collect()
}

/// Reads a secret from the process environment, then from the secrets file.
/// Blank values count as absent.
pub fn secret(secrets: &Map<String, Value>, name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| secrets.get(name).and_then(Value::as_str).map(str::to_string))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
