use std::time::Duration;

use anyhow::Context;
use llm::models::{
    chat_completions::{ChatCompletionRequest, ChatCompletions, ChatMessage, Role},
    Models,
};
use util::{load_env, secret};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let secrets = load_env("Secrets.dev.toml")?;
    let token = secret(&secrets, "OPENAI_API_KEY")
        .context("OPENAI_API_KEY was not found")?;

    let models = Models::openai(
        "https://api.openai.com",
        &token,
        Duration::from_secs(60),
    )?;

    let result = models
        .chat_completion(ChatCompletionRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: "Hello, world!".into(),
            }],
            ..Default::default()
        })
        .await?;

    println!("{:?}", result);

    Ok(())
}
