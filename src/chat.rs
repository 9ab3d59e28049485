//! Interactive chat for chatrelay.
//!
//! Provides a REPL-style loop around a [`ChatSession`], which owns the
//! conversation transcript and enforces one request in flight at a time.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::error;

use crate::markdown;
use crate::proxy::ProxyClient;
use crate::transcript::{Message, Transcript};

const QUIT_COMMAND: &str = ":q";
const PROMPT_PREFIX: &str = "you> ";
const ASSISTANT_PREFIX: &str = "assistant> ";
const APOLOGY: &str = "Sorry - there was an error fetching a response.";

/// Whether a request is currently awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply,
}

/// One chat session: a transcript plus the in-flight flag.
pub struct ChatSession {
    transcript: Transcript,
    state: TurnState,
}

impl ChatSession {
    /// Creates a session with the given system persona.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::new(system_prompt),
            state: TurnState::Idle,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Starts a turn: records the user entry and returns the full payload
    /// to send. Fails if a reply is still outstanding.
    pub fn begin_turn(&mut self, text: &str) -> Result<&[Message]> {
        if self.state == TurnState::AwaitingReply {
            anyhow::bail!("A request is already in flight");
        }

        self.transcript.append(Message::user(text));
        self.state = TurnState::AwaitingReply;
        Ok(self.transcript.payload())
    }

    /// Finishes a turn with the assistant reply.
    pub fn complete_turn(&mut self, reply: impl Into<String>) {
        self.transcript.append(Message::assistant(reply));
        self.state = TurnState::Idle;
    }

    /// Finishes a failed turn. The user entry stays in the transcript, so
    /// the next request re-sends the unanswered question. No assistant
    /// entry is appended.
    pub fn fail_turn(&mut self) {
        self.state = TurnState::Idle;
    }
}

/// Runs the interactive chat loop.
///
/// Reads user input from `input`, writes conversation output to `output`.
/// The greeting is display only and never enters the transcript.
/// Exits on `:q` command or EOF.
pub async fn run_chat<R, W>(
    input: R,
    output: &mut W,
    client: &ProxyClient,
    session: &mut ChatSession,
    greeting: &str,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{} (type {} to quit)", greeting, QUIT_COMMAND)?;
    write!(output, "{}", PROMPT_PREFIX)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        // Handle quit command
        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        // Skip empty lines without a request
        if trimmed.is_empty() {
            write!(output, "{}", PROMPT_PREFIX)?;
            output.flush()?;
            continue;
        }

        let payload = session.begin_turn(trimmed)?;
        let result = client.send(payload).await;

        match result {
            Ok(reply) => {
                writeln!(output, "{}{}", ASSISTANT_PREFIX, markdown::render(&reply))?;
                session.complete_turn(reply);
            }
            Err(e) => {
                error!(error = %e, "completion request failed");
                writeln!(output, "{}", APOLOGY)?;
                session.fail_turn();
            }
        }

        write!(output, "{}", PROMPT_PREFIX)?;
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Role;

    #[test]
    fn test_begin_turn_records_user_entry_and_returns_payload() {
        let mut session = ChatSession::new("persona");

        let payload = session.begin_turn("hello").unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].role, Role::System);
        assert_eq!(payload[1].role, Role::User);
        assert_eq!(payload[1].content, "hello");
        assert_eq!(session.state(), TurnState::AwaitingReply);
    }

    #[test]
    fn test_begin_turn_rejected_while_awaiting_reply() {
        let mut session = ChatSession::new("persona");
        session.begin_turn("first").unwrap();

        let result = session.begin_turn("second");
        assert!(result.is_err());
        // the rejected submission left no transcript entry
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_complete_turn_appends_assistant_and_goes_idle() {
        let mut session = ChatSession::new("persona");
        session.begin_turn("hello").unwrap();
        session.complete_turn("hi there");

        assert_eq!(session.state(), TurnState::Idle);
        let payload = session.transcript().payload();
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[2].role, Role::Assistant);
        assert_eq!(payload[2].content, "hi there");
    }

    #[test]
    fn test_fail_turn_keeps_user_entry_without_assistant() {
        let mut session = ChatSession::new("persona");
        session.begin_turn("hello").unwrap();
        session.fail_turn();

        assert_eq!(session.state(), TurnState::Idle);
        let payload = session.transcript().payload();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[1].role, Role::User);

        // the unanswered question rides along with the next turn
        let payload = session.begin_turn("again").unwrap();
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[1].content, "hello");
        assert_eq!(payload[2].content, "again");
    }
}
