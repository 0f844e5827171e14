//! Conversational reply service.
//!
//! The conversational feature is an external collaborator: free-text input
//! goes in, a textual reply (or a failure) comes out. [`ConversationEngine`]
//! is the seam the API depends on; [`script::ScriptConversation`] is the
//! production implementation that runs a model script as a child process.

pub mod script;
pub mod subprocess;

use async_trait::async_trait;

/// Errors produced while obtaining a conversational reply.
#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    /// The child process could not be spawned or its pipes failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The process exceeded its configured timeout and was killed.
    #[error("Conversation timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The process ran but exited with a non-zero exit code.
    #[error("Conversation process failed with exit code {exit_code}: {stderr}")]
    ExecutionFailed { exit_code: i32, stderr: String },

    /// The process succeeded but produced no output.
    #[error("Conversation process returned an empty response")]
    EmptyResponse,
}

/// Produces a reply for a single piece of user input.
///
/// Implementations must be cheap to share across requests; the API holds
/// one behind an `Arc<dyn ConversationEngine>`.
#[async_trait]
pub trait ConversationEngine: Send + Sync {
    async fn reply(&self, input: &str) -> Result<String, ConversationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_timeout() {
        let err = ConversationError::Timeout { elapsed_ms: 5000 };
        assert_eq!(err.to_string(), "Conversation timed out after 5000ms");
    }

    #[test]
    fn display_execution_failed() {
        let err = ConversationError::ExecutionFailed {
            exit_code: 2,
            stderr: "No module named transformers".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Conversation process failed with exit code 2: No module named transformers"
        );
    }
}
