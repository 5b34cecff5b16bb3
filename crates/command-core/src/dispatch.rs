//! The action router: owns the per-turn control flow
//! classify → extract → clarify → execute → record.

use crate::clarify::{ClarificationDialog, ClarifyConfig, ClarifyOutcome};
use crate::error::PipelineError;
use crate::extract::SlotExtractor;
use crate::intent::{Intent, IntentClassifier};
use crate::traits::{ActionExecutor, ActionOutcome, HistorySink, TemplateSource};
use crate::PipelineConfig;
use speech_io::{SpeechInput, SpeechOutput};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const NOT_UNDERSTOOD: &str =
    "I'm sorry, I don't understand that command. Say 'what can you do' to hear my capabilities.";
const APOLOGY: &str = "I encountered an error processing that command.";

/// Registry mapping each intent to its executor. Adding a domain means
/// registering one entry.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<Intent, Box<dyn ActionExecutor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, intent: Intent, executor: Box<dyn ActionExecutor>) {
        self.executors.insert(intent, executor);
    }

    pub fn get_mut(&mut self, intent: Intent) -> Option<&mut Box<dyn ActionExecutor>> {
        self.executors.get_mut(&intent)
    }

    pub fn len(&self) -> usize {
        self.executors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

/// One long-lived session object holding the pipeline stages and the adapter
/// handles. Processes exactly one utterance at a time; per-turn state
/// (command, clarification) never outlives `dispatch`.
pub struct Dispatcher {
    config: PipelineConfig,
    classifier: IntentClassifier,
    extractor: SlotExtractor,
    executors: ExecutorRegistry,
    templates: Box<dyn TemplateSource>,
    history: Box<dyn HistorySink>,
    input: Box<dyn SpeechInput>,
    output: Box<dyn SpeechOutput>,
}

impl Dispatcher {
    pub fn new(
        config: PipelineConfig,
        executors: ExecutorRegistry,
        templates: Box<dyn TemplateSource>,
        history: Box<dyn HistorySink>,
        input: Box<dyn SpeechInput>,
        output: Box<dyn SpeechOutput>,
    ) -> Result<Self, PipelineError> {
        let extractor = SlotExtractor::new(config.email.normalizer())?;
        Ok(Self {
            config,
            classifier: IntentClassifier::new(),
            extractor,
            executors,
            templates,
            history,
            input,
            output,
        })
    }

    /// One blocking listen with the configured command timeout.
    pub fn listen(&mut self) -> String {
        self.listen_for(self.config.speech.timeout())
    }

    /// One blocking listen with an explicit timeout (wake-word polling uses a
    /// short one).
    pub fn listen_for(&mut self, timeout: Duration) -> String {
        self.input.listen(timeout, self.config.speech.phrase_limit())
    }

    pub fn say(&mut self, text: &str) {
        self.output.speak(text);
    }

    /// The single entry point for one turn. Every path through here speaks a
    /// response and records the outcome exactly once; no command is ever
    /// dispatched twice and none bypasses history.
    pub fn dispatch(&mut self, utterance: &str) -> ActionOutcome {
        info!(%utterance, "processing utterance");

        let intent = self.classifier.classify(utterance);
        if intent == Intent::Unknown {
            debug!(error = %PipelineError::Unclassified, "utterance rejected");
            return self.conclude(utterance, ActionOutcome::failed(NOT_UNDERSTOOD));
        }
        debug!(intent = intent.name(), "classified");

        let mut command = self
            .extractor
            .extract(intent, utterance, self.templates.as_ref());

        if !command.is_complete() {
            let clarify = ClarifyConfig {
                retries_per_slot: self.config.clarification.retries_per_slot,
                timeout: self.config.speech.timeout(),
                phrase_limit: self.config.speech.phrase_limit(),
            };
            let mut dialog =
                ClarificationDialog::new(self.input.as_mut(), self.output.as_mut(), clarify);
            match dialog.resolve(command) {
                ClarifyOutcome::Resolved(resolved) => command = resolved,
                ClarifyOutcome::Abandoned { missing, .. } => {
                    let outcome = ActionOutcome::failed(format!(
                        "I still don't have the {missing} I need, so I'll leave that command."
                    ));
                    return self.conclude(utterance, outcome);
                }
            }
            // Slots filled by the dialog have not been through email
            // finalization yet.
            self.extractor.finalize(&mut command);
        }

        let outcome = match self.executors.get_mut(intent) {
            Some(executor) => {
                debug!(executor = executor.name(), "invoking executor");
                match executor.execute(command.slots()) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(error = %e, intent = intent.name(), "executor failed");
                        ActionOutcome::failed(APOLOGY)
                    }
                }
            }
            None => {
                warn!(intent = intent.name(), "no executor registered");
                ActionOutcome::failed(format!(
                    "No handler is available for {} commands.",
                    intent.name()
                ))
            }
        };
        self.conclude(utterance, outcome)
    }

    fn conclude(&mut self, utterance: &str, outcome: ActionOutcome) -> ActionOutcome {
        self.output.speak(&outcome.message);
        self.history.record(utterance, &outcome);
        outcome
    }
}
