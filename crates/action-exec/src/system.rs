//! Simulated system control: acknowledges power/lock/status requests without
//! touching the host.

use command_core::{ActionExecutor, ActionOutcome, PipelineError};
use std::collections::HashMap;
use tracing::info;

pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for SystemExecutor {
    fn name(&self) -> &'static str {
        "system"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let operation = slots
            .get("operation")
            .map(String::as_str)
            .ok_or_else(|| PipelineError::IncompleteSlots {
                slot: "operation".to_string(),
            })?;
        info!(operation, "system operation requested");

        let message = match operation {
            "shutdown" | "shut down" => "Shutting the machine down.",
            "restart" | "reboot" => "Restarting the machine.",
            "sleep" | "hibernate" => "Putting the machine to sleep.",
            "lock" => "Locking the screen.",
            "status" => "CPU, memory and disk all look healthy.",
            "processes" => "Opening the process list.",
            other => {
                return Ok(ActionOutcome::failed(format!(
                    "I don't know the system operation \"{other}\"."
                )))
            }
        };
        Ok(ActionOutcome::ok(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operation: &str) -> HashMap<String, String> {
        [("operation".to_string(), operation.to_string())].into()
    }

    #[test]
    fn known_operations_succeed() {
        let mut exec = SystemExecutor::new();
        for operation in ["shutdown", "restart", "sleep", "lock", "status", "processes"] {
            let outcome = match exec.execute(&op(operation)) {
                Ok(o) => o,
                Err(e) => panic!("execute failed for {operation}: {e}"),
            };
            assert!(outcome.success, "{operation} should succeed");
        }
    }

    #[test]
    fn unknown_operation_fails_softly() {
        let mut exec = SystemExecutor::new();
        let outcome = match exec.execute(&op("defenestrate")) {
            Ok(o) => o,
            Err(e) => panic!("execute failed: {e}"),
        };
        assert!(!outcome.success);
    }
}
