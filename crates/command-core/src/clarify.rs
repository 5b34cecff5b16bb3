//! Bounded multi-turn clarification for missing required slots.

use crate::command::{Command, SlotQuestion};
use crate::error::PipelineError;
use speech_io::{SpeechInput, SpeechOutput};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct ClarifyConfig {
    /// Extra attempts after the first one, per slot. The default of 1 gives
    /// two attempts per slot; repeated misrecognition must not loop forever.
    pub retries_per_slot: u32,
    pub timeout: Duration,
    pub phrase_limit: Duration,
}

impl Default for ClarifyConfig {
    fn default() -> Self {
        Self {
            retries_per_slot: 1,
            timeout: Duration::from_millis(5000),
            phrase_limit: Duration::from_millis(7000),
        }
    }
}

/// Dialog state while one slot is being asked for. Created per slot and
/// discarded as soon as the slot is filled or the command abandoned; nothing
/// survives the turn.
#[derive(Debug)]
struct ClarificationState {
    missing: &'static SlotQuestion,
    retries_left: u32,
}

#[derive(Debug)]
pub enum ClarifyOutcome {
    Resolved(Command),
    /// One unfilled required slot voids the whole command, not just the slot.
    Abandoned {
        command: Command,
        missing: &'static str,
    },
}

pub struct ClarificationDialog<'io> {
    input: &'io mut dyn SpeechInput,
    output: &'io mut dyn SpeechOutput,
    config: ClarifyConfig,
}

impl<'io> ClarificationDialog<'io> {
    pub fn new(
        input: &'io mut dyn SpeechInput,
        output: &'io mut dyn SpeechOutput,
        config: ClarifyConfig,
    ) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Walk the missing required slots in the intent's declared order, asking
    /// each slot's question and filling it from one speech turn. Empty and
    /// timed-out replies consume the retry budget; exhausting it abandons the
    /// command.
    pub fn resolve(&mut self, mut command: Command) -> ClarifyOutcome {
        while let Some(question) = command.first_missing_slot() {
            let mut state = ClarificationState {
                missing: question,
                retries_left: self.config.retries_per_slot,
            };
            loop {
                self.output.speak(state.missing.question);
                let reply = self
                    .input
                    .listen(self.config.timeout, self.config.phrase_limit);
                let reply = reply.trim();
                if !reply.is_empty() {
                    debug!(slot = state.missing.name, value = reply, "slot filled");
                    command.set_slot(state.missing.name, reply);
                    break;
                }
                // An empty reply and a timed-out listen are the same event
                // here; both consume a retry.
                debug!(
                    slot = state.missing.name,
                    error = %PipelineError::SpeechTimeout,
                    "no usable reply"
                );
                if state.retries_left == 0 {
                    info!(slot = state.missing.name, "clarification abandoned");
                    return ClarifyOutcome::Abandoned {
                        command,
                        missing: state.missing.name,
                    };
                }
                state.retries_left -= 1;
                self.output.speak("Sorry, I didn't catch that.");
            }
        }
        ClarifyOutcome::Resolved(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;
    use speech_io::{CapturedOutput, ScriptedInput};

    fn email_missing_recipient() -> Command {
        let mut cmd = Command::new(Intent::Email, "send an email about the offsite");
        cmd.set_slot("subject", "the offsite");
        cmd
    }

    #[test]
    fn one_empty_then_one_valid_reply_completes_the_command() {
        let mut input = ScriptedInput::new(["", "john@gmail.com"]);
        let mut output = CapturedOutput::new();
        let mut dialog = ClarificationDialog::new(&mut input, &mut output, ClarifyConfig::default());

        match dialog.resolve(email_missing_recipient()) {
            ClarifyOutcome::Resolved(cmd) => {
                assert!(cmd.is_complete());
                assert_eq!(cmd.slot("recipient"), Some("john@gmail.com"));
            }
            ClarifyOutcome::Abandoned { .. } => panic!("dialog should have resolved"),
        }
        // Question, retry prompt, question again.
        assert_eq!(output.spoken().len(), 3);
        assert_eq!(output.spoken()[0], "Who should I send the email to?");
    }

    #[test]
    fn two_consecutive_empty_replies_abandon_the_command() {
        let mut input = ScriptedInput::new(["", ""]);
        let mut output = CapturedOutput::new();
        let mut dialog = ClarificationDialog::new(&mut input, &mut output, ClarifyConfig::default());

        match dialog.resolve(email_missing_recipient()) {
            ClarifyOutcome::Abandoned { command, missing } => {
                assert_eq!(missing, "recipient");
                assert!(!command.is_complete());
            }
            ClarifyOutcome::Resolved(_) => panic!("dialog should have been abandoned"),
        }
    }

    #[test]
    fn multiple_missing_slots_are_asked_in_declared_order() {
        let cmd = Command::new(Intent::Email, "send an email");
        let mut input = ScriptedInput::new(["john@gmail.com", "lunch plans"]);
        let mut output = CapturedOutput::new();
        let mut dialog = ClarificationDialog::new(&mut input, &mut output, ClarifyConfig::default());

        match dialog.resolve(cmd) {
            ClarifyOutcome::Resolved(cmd) => {
                assert_eq!(cmd.slot("recipient"), Some("john@gmail.com"));
                assert_eq!(cmd.slot("subject"), Some("lunch plans"));
            }
            ClarifyOutcome::Abandoned { .. } => panic!("dialog should have resolved"),
        }
        assert_eq!(
            output.spoken(),
            [
                "Who should I send the email to?".to_string(),
                "What is the subject of the email?".to_string(),
            ]
        );
    }

    #[test]
    fn replies_are_trimmed_before_storage() {
        let mut cmd = Command::new(Intent::Email, "send an email to john@gmail.com");
        cmd.set_slot("recipient", "john@gmail.com");
        let mut input = ScriptedInput::new(["  weekly report  "]);
        let mut output = CapturedOutput::new();
        let mut dialog = ClarificationDialog::new(&mut input, &mut output, ClarifyConfig::default());

        match dialog.resolve(cmd) {
            ClarifyOutcome::Resolved(cmd) => {
                assert_eq!(cmd.slot("subject"), Some("weekly report"));
            }
            ClarifyOutcome::Abandoned { .. } => panic!("dialog should have resolved"),
        }
    }

    #[test]
    fn a_larger_retry_budget_allows_more_attempts() {
        let config = ClarifyConfig {
            retries_per_slot: 2,
            ..ClarifyConfig::default()
        };
        let mut input = ScriptedInput::new(["", "", "john@gmail.com"]);
        let mut output = CapturedOutput::new();
        let mut dialog = ClarificationDialog::new(&mut input, &mut output, config);

        match dialog.resolve(email_missing_recipient()) {
            ClarifyOutcome::Resolved(cmd) => {
                assert_eq!(cmd.slot("recipient"), Some("john@gmail.com"));
            }
            ClarifyOutcome::Abandoned { .. } => panic!("dialog should have resolved"),
        }
    }
}
