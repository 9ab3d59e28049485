//! Chat command handler.

use anyhow::{Context, Result};

use crate::chat::{self, ChatSession};
use crate::config::Config;
use crate::proxy::ProxyClient;

pub async fn run(config: &Config) -> Result<()> {
    let endpoint = config.effective_endpoint()?;
    let system_prompt = config
        .effective_system_prompt()
        .context("resolve system prompt")?;

    let client = ProxyClient::new(endpoint);
    let mut session = ChatSession::new(system_prompt);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    chat::run_chat(
        stdin.lock(),
        &mut stdout,
        &client,
        &mut session,
        config.effective_greeting(),
    )
    .await
    .context("interactive chat failed")
}
