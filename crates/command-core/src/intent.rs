//! Keyword-based intent classification.
//!
//! Each intent owns a keyword set, and the sets are tested in a fixed
//! priority order. The sets are not mutually exclusive ("search" and "email"
//! can co-occur in one utterance), so the order of the registry, not a score,
//! decides ties. The registry is data: adding an intent means adding one
//! entry, not another branch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Spreadsheet,
    Email,
    System,
    Web,
    Utility,
    Info,
    Media,
    SmartHome,
    Unknown,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Spreadsheet => "spreadsheet",
            Intent::Email => "email",
            Intent::System => "system",
            Intent::Web => "web",
            Intent::Utility => "utility",
            Intent::Info => "info",
            Intent::Media => "media",
            Intent::SmartHome => "smart home",
            Intent::Unknown => "unknown",
        }
    }
}

const SPREADSHEET_KEYWORDS: &[&str] = &[
    "excel",
    "spreadsheet",
    "cell",
    "column",
    "row",
    "formula",
    "sheet",
    "workbook",
    "chart",
    "pivot",
];

const EMAIL_KEYWORDS: &[&str] = &["email", "mail", "compose", "inbox", "send"];

const SYSTEM_KEYWORDS: &[&str] = &[
    "shutdown",
    "shut down",
    "restart",
    "reboot",
    "sleep",
    "lock",
    "system info",
    "task manager",
    "processes",
    "cpu",
    "memory",
    "disk",
];

const WEB_KEYWORDS: &[&str] = &[
    "search",
    "google",
    "youtube",
    "browse",
    "website",
    "browser",
    "chrome",
    "firefox",
    "tab",
];

const UTILITY_KEYWORDS: &[&str] = &[
    "time",
    "date",
    "weather",
    "reminder",
    "remind",
    "calculate",
    "convert",
    "translate",
    "joke",
];

const INFO_KEYWORDS: &[&str] = &[
    "who are you",
    "what can you do",
    "help",
    "commands",
    "version",
    "about",
    "capabilities",
];

const MEDIA_KEYWORDS: &[&str] = &[
    "play",
    "pause",
    "stop",
    "music",
    "video",
    "volume",
    "spotify",
    "netflix",
];

const SMART_HOME_KEYWORDS: &[&str] = &[
    "lights",
    "temperature",
    "thermostat",
    "door",
    "security",
    "camera",
    "smart home",
];

fn default_registry() -> Vec<(Intent, &'static [&'static str])> {
    vec![
        (Intent::Spreadsheet, SPREADSHEET_KEYWORDS),
        (Intent::Email, EMAIL_KEYWORDS),
        (Intent::System, SYSTEM_KEYWORDS),
        (Intent::Web, WEB_KEYWORDS),
        (Intent::Utility, UTILITY_KEYWORDS),
        (Intent::Info, INFO_KEYWORDS),
        (Intent::Media, MEDIA_KEYWORDS),
        (Intent::SmartHome, SMART_HOME_KEYWORDS),
    ]
}

pub struct IntentClassifier {
    registry: Vec<(Intent, &'static [&'static str])>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            registry: default_registry(),
        }
    }

    /// Build a classifier with a custom priority order or keyword sets.
    pub fn with_registry(registry: Vec<(Intent, &'static [&'static str])>) -> Self {
        Self { registry }
    }

    /// Classify one utterance. Never fails; `Unknown` is the terminal
    /// classification when no keyword set matches.
    pub fn classify(&self, utterance: &str) -> Intent {
        let folded = utterance.to_lowercase();
        for (intent, keywords) in &self.registry {
            if keywords.iter().any(|k| folded.contains(k)) {
                return *intent;
            }
        }
        Intent::Unknown
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
