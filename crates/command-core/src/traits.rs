//! Seam traits for the side-effecting adapters around the pipeline.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of one executed (or refused) command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// One per-intent capability. The dispatcher only invokes it with a complete
/// slot map; a returned error is caught at the dispatcher boundary and never
/// propagates past it.
pub trait ActionExecutor {
    fn name(&self) -> &'static str;

    fn execute(&mut self, slots: &HashMap<String, String>)
        -> Result<ActionOutcome, PipelineError>;
}

/// Append-only log of processed commands. Implementations swallow their own
/// storage errors (logging them) so that recording can never fail a turn.
pub trait HistorySink {
    fn record(&mut self, utterance: &str, outcome: &ActionOutcome);
}

/// A named, persisted email template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub name: String,
    pub subject: String,
    pub body: String,
}

/// Read-only template lookup; the write path is administrative and lives
/// outside the pipeline.
pub trait TemplateSource {
    fn find(&self, name: &str) -> Option<EmailTemplate>;
}

/// A source with no templates; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTemplates;

impl TemplateSource for NoTemplates {
    fn find(&self, _name: &str) -> Option<EmailTemplate> {
        None
    }
}
