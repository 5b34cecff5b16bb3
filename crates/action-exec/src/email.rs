//! Email composition: builds a ready-to-open Gmail compose URL.

use command_core::{ActionExecutor, ActionOutcome, PipelineError};
use std::collections::HashMap;
use tracing::info;
use url::Url;

const COMPOSE_BASE: &str = "https://mail.google.com/mail/";

pub struct EmailComposeExecutor {
    last_url: Option<Url>,
}

impl EmailComposeExecutor {
    pub fn new() -> Self {
        Self { last_url: None }
    }

    /// The compose URL built by the most recent execution.
    pub fn last_url(&self) -> Option<&Url> {
        self.last_url.as_ref()
    }

    fn compose_url(recipient: &str, subject: &str, body: &str) -> Result<Url, PipelineError> {
        let mut url = Url::parse(COMPOSE_BASE)
            .map_err(|e| PipelineError::ExecutorFailure(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("view", "cm")
            .append_pair("fs", "1")
            .append_pair("to", recipient)
            .append_pair("su", subject)
            .append_pair("body", body);
        Ok(url)
    }
}

impl Default for EmailComposeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for EmailComposeExecutor {
    fn name(&self) -> &'static str {
        "email"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let recipient = slots
            .get("recipient")
            .map(String::as_str)
            .ok_or_else(|| PipelineError::IncompleteSlots {
                slot: "recipient".to_string(),
            })?;
        let subject = slots
            .get("subject")
            .map(String::as_str)
            .ok_or_else(|| PipelineError::IncompleteSlots {
                slot: "subject".to_string(),
            })?;
        let body = slots.get("body").map(String::as_str).unwrap_or_default();

        let url = Self::compose_url(recipient, subject, body)?;
        info!(%url, "compose window prepared");
        self.last_url = Some(url);

        Ok(ActionOutcome::ok(format!(
            "I've prepared an email to {recipient} with the subject \"{subject}\"."
        )))
    }
}
