//! Simulated spreadsheet control.

use command_core::{ActionExecutor, ActionOutcome, PipelineError};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// The open sheet for one assistant session. The session is an explicit value
/// owned by its executor, created once and threaded through; there is no
/// module-level shared handle.
#[derive(Debug, Default, Serialize)]
pub struct SheetSession {
    cells: HashMap<String, String>,
}

impl SheetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell references are stored uppercase so "b2" and "B2" are one cell.
    pub fn set_cell(&mut self, cell: &str, value: &str) {
        self.cells.insert(cell.to_uppercase(), value.to_string());
    }

    pub fn cell(&self, cell: &str) -> Option<&str> {
        self.cells.get(&cell.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub struct SpreadsheetExecutor {
    session: SheetSession,
}

impl SpreadsheetExecutor {
    pub fn new() -> Self {
        Self {
            session: SheetSession::new(),
        }
    }

    pub fn session(&self) -> &SheetSession {
        &self.session
    }
}

impl Default for SpreadsheetExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn required<'a>(
    slots: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, PipelineError> {
    slots
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| PipelineError::IncompleteSlots {
            slot: name.to_string(),
        })
}

impl ActionExecutor for SpreadsheetExecutor {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let text = required(slots, "text")?;
        let cell = required(slots, "cell")?;
        self.session.set_cell(cell, text);
        info!(cell = %cell.to_uppercase(), "cell updated");

        let message = if slots.get("kind").map(String::as_str) == Some("formula") {
            format!("Applied the formula {} to cell {}.", text, cell.to_uppercase())
        } else {
            format!("Wrote \"{}\" into cell {}.", text, cell.to_uppercase())
        };
        Ok(ActionOutcome::ok(message))
    }
}
