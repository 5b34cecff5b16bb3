//! The `Command` under construction for one turn, and the per-intent slot
//! specifications that decide when it is complete.

use crate::intent::Intent;
use std::collections::HashMap;
use time::OffsetDateTime;

/// A required slot together with the question asked when it is missing.
#[derive(Debug, Clone, Copy)]
pub struct SlotQuestion {
    pub name: &'static str,
    pub question: &'static str,
}

/// Required and optional slot names for one intent. Required slots are listed
/// in clarification order.
#[derive(Debug)]
pub struct SlotSpec {
    pub required: &'static [SlotQuestion],
    pub optional: &'static [&'static str],
}

const EMPTY_SPEC: SlotSpec = SlotSpec {
    required: &[],
    optional: &[],
};

const SPREADSHEET_SPEC: SlotSpec = SlotSpec {
    required: &[
        SlotQuestion {
            name: "text",
            question: "What should I write?",
        },
        SlotQuestion {
            name: "cell",
            question: "Which cell should I put it in?",
        },
    ],
    optional: &["kind"],
};

const EMAIL_SPEC: SlotSpec = SlotSpec {
    required: &[
        SlotQuestion {
            name: "recipient",
            question: "Who should I send the email to?",
        },
        SlotQuestion {
            name: "subject",
            question: "What is the subject of the email?",
        },
    ],
    optional: &["body", "template"],
};

const SYSTEM_SPEC: SlotSpec = SlotSpec {
    required: &[SlotQuestion {
        name: "operation",
        question: "Which system operation should I perform?",
    }],
    optional: &[],
};

const WEB_SPEC: SlotSpec = SlotSpec {
    required: &[SlotQuestion {
        name: "target",
        question: "What should I search for?",
    }],
    optional: &["action"],
};

const UTILITY_SPEC: SlotSpec = SlotSpec {
    required: &[SlotQuestion {
        name: "topic",
        question: "What would you like to know?",
    }],
    optional: &["place", "expression", "detail"],
};

const INFO_SPEC: SlotSpec = SlotSpec {
    required: &[],
    optional: &["topic"],
};

const MEDIA_SPEC: SlotSpec = SlotSpec {
    required: &[SlotQuestion {
        name: "operation",
        question: "What should I do with playback?",
    }],
    optional: &["item"],
};

const SMART_HOME_SPEC: SlotSpec = SlotSpec {
    required: &[
        SlotQuestion {
            name: "device",
            question: "Which device?",
        },
        SlotQuestion {
            name: "operation",
            question: "What should I do with it?",
        },
    ],
    optional: &["value"],
};

pub fn slot_spec(intent: Intent) -> &'static SlotSpec {
    match intent {
        Intent::Spreadsheet => &SPREADSHEET_SPEC,
        Intent::Email => &EMAIL_SPEC,
        Intent::System => &SYSTEM_SPEC,
        Intent::Web => &WEB_SPEC,
        Intent::Utility => &UTILITY_SPEC,
        Intent::Info => &INFO_SPEC,
        Intent::Media => &MEDIA_SPEC,
        Intent::SmartHome => &SMART_HOME_SPEC,
        Intent::Unknown => &EMPTY_SPEC,
    }
}

/// One in-flight command: intent, extracted slots, the raw utterance, and a
/// completeness flag kept in sync with the intent's slot spec. Only the slot
/// extractor and the clarification dialog mutate a command; once handed to an
/// executor it is read-only.
#[derive(Debug, Clone)]
pub struct Command {
    intent: Intent,
    utterance: String,
    received_at: OffsetDateTime,
    slots: HashMap<String, String>,
    complete: bool,
}

impl Command {
    pub fn new(intent: Intent, utterance: &str) -> Self {
        let mut command = Self {
            intent,
            utterance: utterance.to_string(),
            received_at: OffsetDateTime::now_utc(),
            slots: HashMap::new(),
            complete: false,
        };
        command.refresh_completeness();
        command
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    pub fn received_at(&self) -> OffsetDateTime {
        self.received_at
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    pub fn slots(&self) -> &HashMap<String, String> {
        &self.slots
    }

    /// Store a slot value, trimmed of surrounding whitespace. A value that is
    /// empty after trimming is ignored.
    pub fn set_slot(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.slots.insert(name.to_string(), value.to_string());
        self.refresh_completeness();
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The first required slot that is still unfilled, in declared order.
    pub fn first_missing_slot(&self) -> Option<&'static SlotQuestion> {
        slot_spec(self.intent)
            .required
            .iter()
            .find(|q| !self.slots.contains_key(q.name))
    }

    fn refresh_completeness(&mut self) {
        self.complete = slot_spec(self.intent)
            .required
            .iter()
            .all(|q| self.slots.contains_key(q.name));
    }
}
