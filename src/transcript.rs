//! Conversation transcript types.
//!
//! A transcript is an ordered, append-only list of role-tagged messages.
//! The first entry is always the system persona; every request sends the
//! full history, never a window of it.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single conversation message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered message history for one conversation.
///
/// The constructor seats the system message, so the system-first invariant
/// holds for the lifetime of the transcript. User/assistant alternation is a
/// usage convention enforced by the chat loop, not by this type.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript seeded with the system persona.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the full ordered history for request serialization.
    pub fn payload(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seats_system_message_first() {
        let transcript = Transcript::new("You are a helpful assistant.");

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.payload()[0].role, Role::System);
        assert_eq!(transcript.payload()[0].content, "You are a helpful assistant.");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new("persona");
        transcript.append(Message::user("first"));
        transcript.append(Message::assistant("second"));
        transcript.append(Message::user("third"));

        let roles: Vec<Role> = transcript.payload().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
        assert_eq!(transcript.payload()[3].content, "third");
    }

    #[test]
    fn test_payload_returns_entire_history() {
        let mut transcript = Transcript::new("persona");
        for i in 0..10 {
            transcript.append(Message::user(format!("question {}", i)));
            transcript.append(Message::assistant(format!("answer {}", i)));
        }

        // full history, never windowed
        assert_eq!(transcript.payload().len(), 21);
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let msg = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(msg, serde_json::json!({"role": "user", "content": "hi"}));

        let msg = serde_json::to_value(Message::system("s")).unwrap();
        assert_eq!(msg["role"], "system");

        let msg = serde_json::to_value(Message::assistant("a")).unwrap();
        assert_eq!(msg["role"], "assistant");
    }
}
