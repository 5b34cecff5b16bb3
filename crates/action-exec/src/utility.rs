//! Everyday utilities (clock, weather, jokes, arithmetic) and the
//! capabilities/identity responses.

use command_core::{ActionExecutor, ActionOutcome, PipelineError};
use std::collections::HashMap;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::info;

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "I told my computer I needed a break, and it said \"no problem, I'll go to sleep.\"",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "Why did the function stop calling? It had too many arguments.",
];

pub struct UtilityExecutor {
    joke_index: usize,
}

impl UtilityExecutor {
    pub fn new() -> Self {
        Self { joke_index: 0 }
    }

    fn next_joke(&mut self) -> &'static str {
        let joke = JOKES[self.joke_index % JOKES.len()];
        self.joke_index += 1;
        joke
    }

    fn current_time() -> Result<String, PipelineError> {
        let format = format_description!("[hour]:[minute] UTC");
        OffsetDateTime::now_utc()
            .format(&format)
            .map_err(|e| PipelineError::ExecutorFailure(e.to_string()))
    }

    fn current_date() -> Result<String, PipelineError> {
        let format = format_description!("[year]-[month]-[day]");
        OffsetDateTime::now_utc()
            .format(&format)
            .map_err(|e| PipelineError::ExecutorFailure(e.to_string()))
    }
}

impl Default for UtilityExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for UtilityExecutor {
    fn name(&self) -> &'static str {
        "utility"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let topic = slots
            .get("topic")
            .map(String::as_str)
            .ok_or_else(|| PipelineError::IncompleteSlots {
                slot: "topic".to_string(),
            })?;
        info!(topic, "utility request");

        let outcome = match topic {
            "time" => ActionOutcome::ok(format!("It is {}.", Self::current_time()?)),
            "date" => ActionOutcome::ok(format!("Today is {}.", Self::current_date()?)),
            "joke" => ActionOutcome::ok(self.next_joke()),
            "weather" => {
                let place = slots.get("place").map(String::as_str).unwrap_or("your area");
                ActionOutcome::ok(format!(
                    "I've looked up the weather for {place} in the browser."
                ))
            }
            "calculate" => {
                let expression = slots.get("expression").map(String::as_str).unwrap_or("");
                match evalexpr::eval(expression) {
                    Ok(value) => ActionOutcome::ok(format!("{expression} is {value}.")),
                    Err(e) => {
                        info!(error = %e, "expression evaluation failed");
                        ActionOutcome::failed(format!("I couldn't evaluate {expression}."))
                    }
                }
            }
            "reminder" => {
                let detail = slots.get("detail").map(String::as_str).unwrap_or("that");
                ActionOutcome::ok(format!("Noted: {detail}."))
            }
            other => ActionOutcome::failed(format!("I can't help with \"{other}\" yet.")),
        };
        Ok(outcome)
    }
}

const CAPABILITIES: &str = "I can write into spreadsheets, compose emails, control the system, \
search the web, answer time, date and weather questions, tell jokes, do arithmetic, control \
media playback, and operate smart home devices.";

pub struct InfoExecutor;

impl InfoExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InfoExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for InfoExecutor {
    fn name(&self) -> &'static str {
        "info"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let message = match slots.get("topic").map(String::as_str) {
            Some("identity") => format!(
                "I'm Aria, a voice assistant, version {}.",
                env!("CARGO_PKG_VERSION")
            ),
            _ => CAPABILITIES.to_string(),
        };
        Ok(ActionOutcome::ok(message))
    }
}
