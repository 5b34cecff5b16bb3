//! Media playback and smart home acknowledgements.

use command_core::{ActionExecutor, ActionOutcome, PipelineError};
use std::collections::HashMap;
use tracing::info;

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

pub struct MediaExecutor;

impl MediaExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MediaExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for MediaExecutor {
    fn name(&self) -> &'static str {
        "media"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let operation = required(slots, "operation")?;
        let item = slots.get("item").map(String::as_str);
        info!(operation, item, "media request");

        let message = match (operation, item) {
            ("play", Some(item)) => format!("Playing {item}."),
            ("play", None) => "Resuming playback.".to_string(),
            ("volume", Some(direction)) => format!("Turning the volume {direction}."),
            ("pause", _) => "Pausing playback.".to_string(),
            ("resume", _) => "Resuming playback.".to_string(),
            ("stop", _) => "Stopping playback.".to_string(),
            ("next", _) => "Skipping to the next track.".to_string(),
            ("previous", _) => "Going back a track.".to_string(),
            (other, _) => {
                return Ok(ActionOutcome::failed(format!(
                    "I can't do \"{other}\" with your media."
                )))
            }
        };
        Ok(ActionOutcome::ok(message))
    }
}

pub struct SmartHomeExecutor;

impl SmartHomeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SmartHomeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for SmartHomeExecutor {
    fn name(&self) -> &'static str {
        "smart home"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let device = required(slots, "device")?;
        let operation = required(slots, "operation")?;
        info!(device, operation, "smart home request");

        let message = match operation {
            "on" => format!("Turning on the {device}."),
            "off" => format!("Turning off the {device}."),
            "open" => format!("Opening the {device}."),
            "close" => format!("Closing the {device}."),
            "set" => match slots.get("value") {
                Some(value) => format!("Setting the {device} to {value}."),
                None => format!("Adjusting the {device}."),
            },
            other => format!("Sending \"{other}\" to the {device}."),
        };
        Ok(ActionOutcome::ok(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn play_names_the_item() {
        let mut exec = MediaExecutor::new();
        let outcome = match exec.execute(&slots(&[("operation", "play"), ("item", "some jazz")])) {
            Ok(o) => o,
            Err(e) => panic!("execute failed: {e}"),
        };
        assert_eq!(outcome.message, "Playing some jazz.");
    }

    #[test]
    fn thermostat_set_uses_the_value() {
        let mut exec = SmartHomeExecutor::new();
        let outcome = match exec.execute(&slots(&[
            ("device", "thermostat"),
            ("operation", "set"),
            ("value", "21"),
        ])) {
            Ok(o) => o,
            Err(e) => panic!("execute failed: {e}"),
        };
        assert_eq!(outcome.message, "Setting the thermostat to 21.");
    }

    #[test]
    fn missing_device_is_an_error() {
        let mut exec = SmartHomeExecutor::new();
        assert!(exec.execute(&slots(&[("operation", "on")])).is_err());
    }
}
