//! Subprocess-backed [`ConversationEngine`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::subprocess::run_command;
use super::{ConversationEngine, ConversationError};

/// Runs `<program> <args...> <input>` and returns the trimmed stdout.
///
/// No shell is involved, so the user input is passed as a single argument
/// verbatim.
#[derive(Debug, Clone)]
pub struct ScriptConversation {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ScriptConversation {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Convenience constructor for a script run through an interpreter,
    /// e.g. `python3 scripts/converse.py`.
    pub fn interpreted(interpreter: &str, script_path: &str, timeout: Duration) -> Self {
        Self::new(interpreter, vec![script_path.to_string()], timeout)
    }
}

#[async_trait]
impl ConversationEngine for ScriptConversation {
    async fn reply(&self, input: &str) -> Result<String, ConversationError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(input);

        let output = run_command(&mut cmd, self.timeout).await?;
        if output.exit_code != 0 {
            return Err(ConversationError::ExecutionFailed {
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        if !output.stderr.trim().is_empty() {
            tracing::debug!(stderr = %output.stderr.trim(), "Conversation process wrote to stderr");
        }

        let reply = output.stdout.trim();
        if reply.is_empty() {
            return Err(ConversationError::EmptyResponse);
        }
        tracing::debug!(duration_ms = output.duration_ms, "Conversation reply produced");
        Ok(reply.to_string())
    }
}
