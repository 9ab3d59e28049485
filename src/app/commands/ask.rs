//! Ask command handler.
//!
//! One-shot turn: send a single prompt, print the rendered reply. Unlike the
//! chat loop there is no containing display, so transport errors propagate
//! to a non-zero exit.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::markdown;
use crate::proxy::ProxyClient;
use crate::transcript::{Message, Transcript};

pub async fn run(prompt: &str, config: &Config) -> Result<()> {
    let endpoint = config.effective_endpoint()?;
    let system_prompt = config
        .effective_system_prompt()
        .context("resolve system prompt")?;

    let client = ProxyClient::new(endpoint);

    let mut transcript = Transcript::new(system_prompt);
    transcript.append(Message::user(prompt));

    let reply = client
        .send(transcript.payload())
        .await
        .context("fetch completion")?;

    println!("{}", markdown::render(&reply));

    Ok(())
}
