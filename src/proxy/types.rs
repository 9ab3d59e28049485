use serde::Serialize;

use crate::transcript::Message;

/// Request body for the completion endpoint: the full transcript, in order.
#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest<'a> {
    pub(crate) messages: &'a [Message],
}
