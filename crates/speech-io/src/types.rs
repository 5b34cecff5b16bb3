use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_phrase_limit_ms")]
    pub phrase_limit_ms: u64,
    #[serde(default = "default_wake_words")]
    pub wake_words: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_phrase_limit_ms() -> u64 {
    7000
}

fn default_wake_words() -> Vec<String> {
    vec!["aria".to_string(), "hey aria".to_string()]
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            phrase_limit_ms: default_phrase_limit_ms(),
            wake_words: default_wake_words(),
        }
    }
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn phrase_limit(&self) -> Duration {
        Duration::from_millis(self.phrase_limit_ms)
    }

    /// True when the heard phrase contains any configured wake word.
    pub fn contains_wake_word(&self, heard: &str) -> bool {
        let heard = heard.to_lowercase();
        self.wake_words.iter().any(|w| heard.contains(&w.to_lowercase()))
    }
}
