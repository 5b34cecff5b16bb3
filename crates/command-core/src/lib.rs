//! command-core: the utterance interpretation and dispatch pipeline.
//!
//! One turn flows through `Dispatcher::dispatch`: the classifier maps the
//! utterance to an [`Intent`], the slot extractor runs that intent's ordered
//! pattern rules, the clarification dialog fills any missing required slots
//! within a bounded retry budget, and the intent's registered executor runs
//! the completed command. Every turn ends with exactly one history record.
//!
//! Speech, executors, history, and template storage sit behind traits; this
//! crate holds all of the branching logic and none of the side effects.

mod intent;
pub use intent::{Intent, IntentClassifier};

mod command;
pub use command::{slot_spec, Command, SlotQuestion, SlotSpec};

mod extract;
pub use extract::SlotExtractor;

mod email;
pub use email::{AddressNormalizer, KNOWN_PROVIDERS};

mod template;
pub use template::generate_body;

mod clarify;
pub use clarify::{ClarificationDialog, ClarifyConfig, ClarifyOutcome};

mod dispatch;
pub use dispatch::{Dispatcher, ExecutorRegistry};

mod error;
pub use error::PipelineError;

mod traits;
pub use traits::{
    ActionExecutor, ActionOutcome, EmailTemplate, HistorySink, NoTemplates, TemplateSource,
};

use serde::{Deserialize, Serialize};
pub use speech_io::SpeechConfig;

/// Utterances that end the interactive session; checked by the outer loop
/// before dispatch, so "stop" quits even though it is also a Media keyword.
pub const EXIT_PHRASES: &[&str] = &["exit", "stop", "goodbye", "quit"];

pub fn is_exit_phrase(utterance: &str) -> bool {
    let folded = utterance.to_lowercase();
    EXIT_PHRASES.iter().any(|p| folded.contains(p))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub clarification: ClarificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_domain")]
    pub default_domain: String,
}

fn default_domain() -> String {
    "gmail.com".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            default_domain: default_domain(),
        }
    }
}

impl EmailConfig {
    pub fn normalizer(&self) -> AddressNormalizer {
        AddressNormalizer::new(&self.default_domain)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarificationConfig {
    #[serde(default = "default_retries_per_slot")]
    pub retries_per_slot: u32,
}

fn default_retries_per_slot() -> u32 {
    1
}

impl Default for ClarificationConfig {
    fn default() -> Self {
        Self {
            retries_per_slot: default_retries_per_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_the_documented_surface() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.speech.timeout_ms, 5000);
        assert_eq!(cfg.speech.phrase_limit_ms, 7000);
        assert_eq!(cfg.email.default_domain, "gmail.com");
        assert_eq!(cfg.clarification.retries_per_slot, 1);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let cfg = PipelineConfig::default();
        let json = match serde_json::to_string(&cfg) {
            Ok(j) => j,
            Err(e) => panic!("serialize failed: {e}"),
        };
        let back: PipelineConfig = match serde_json::from_str(&json) {
            Ok(c) => c,
            Err(e) => panic!("deserialize failed: {e}"),
        };
        assert_eq!(back.email.default_domain, cfg.email.default_domain);
    }

    #[test]
    fn partial_config_json_fills_defaults() {
        let back: PipelineConfig =
            match serde_json::from_str(r#"{"email": {"default_domain": "example.org"}}"#) {
                Ok(c) => c,
                Err(e) => panic!("deserialize failed: {e}"),
            };
        assert_eq!(back.email.default_domain, "example.org");
        assert_eq!(back.clarification.retries_per_slot, 1);
    }

    #[test]
    fn exit_phrases_are_detected_case_insensitively() {
        assert!(is_exit_phrase("Goodbye"));
        assert!(is_exit_phrase("please stop"));
        assert!(!is_exit_phrase("write hello in cell B2"));
    }
}
