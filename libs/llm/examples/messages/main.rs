use std::time::Duration;

use anyhow::Context;
use llm::models::{
    messages::{Message, MessageRequest, Messages, Role},
    Models,
};
use util::{load_env, secret};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let secrets = load_env("Secrets.dev.toml")?;
    let api_key = secret(&secrets, "ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY was not found")?;

    let models = Models::anthropic(
        "https://api.anthropic.com",
        &api_key,
        "2023-06-01",
        Duration::from_secs(60),
    )?;

    let result = models
        .create_message(MessageRequest {
            model: "claude-3-sonnet-20240229".into(),
            max_tokens: 256,
            system: None,
            messages: vec![Message {
                role: Role::User,
                content: "Hello, world!".into(),
            }],
            temperature: None,
        })
        .await?;

    println!("{:?}", result.first_text());

    Ok(())
}
