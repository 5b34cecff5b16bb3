//! Slot extraction: per-intent ordered pattern rules.
//!
//! Rules are tried in declaration order and the first rule whose pattern
//! matches wins — there is no backtracking to a later rule that would capture
//! more slots. That first-match-wins policy is part of each intent's
//! contract; the tests pin it.

use crate::command::Command;
use crate::email::AddressNormalizer;
use crate::error::PipelineError;
use crate::intent::Intent;
use crate::template::generate_body;
use crate::traits::TemplateSource;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// One pattern rule: capture group `i + 1` fills `captures[i]`; `presets` are
/// constant slots set whenever the rule matches.
struct ExtractRule {
    pattern: Regex,
    captures: &'static [&'static str],
    presets: &'static [(&'static str, &'static str)],
}

fn rule(
    pattern: &str,
    captures: &'static [&'static str],
    presets: &'static [(&'static str, &'static str)],
) -> Result<ExtractRule, PipelineError> {
    Ok(ExtractRule {
        pattern: Regex::new(pattern)?,
        captures,
        presets,
    })
}

pub struct SlotExtractor {
    rules: HashMap<Intent, Vec<ExtractRule>>,
    normalizer: AddressNormalizer,
    template_ref: Regex,
    template_recipient: Regex,
}

impl SlotExtractor {
    pub fn new(normalizer: AddressNormalizer) -> Result<Self, PipelineError> {
        let mut rules = HashMap::new();

        rules.insert(
            Intent::Spreadsheet,
            vec![
                rule(
                    r"(?i)(?:write|type|enter|put)\s+(.+?)\s+(?:in|into)\s+cell\s+([a-zA-Z]{1,3}\d{1,5})",
                    &["text", "cell"],
                    &[],
                )?,
                rule(
                    r"(?i)(?:write|type|enter|put)\s+(.+?)\s+(?:in|into)\s+([a-zA-Z]{1,3}\d{1,5})\b",
                    &["text", "cell"],
                    &[],
                )?,
                rule(
                    r"(?i)(?:insert|add|apply)\s+formula\s+(.+?)\s+(?:in|into)\s+(?:cell\s+)?([a-zA-Z]{1,3}\d{1,5})",
                    &["text", "cell"],
                    &[("kind", "formula")],
                )?,
            ],
        );

        rules.insert(
            Intent::Email,
            vec![
                rule(
                    r"(?i)send\s+(?:a\s+|an\s+)?(?:mail|email)\s+to\s+(.+?)\s+(?:regarding|about|with\s+subject|subject)\s+(.+?)\s+(?:saying|with\s+message|with\s+body|body)\s+(.+)",
                    &["recipient", "subject", "body"],
                    &[],
                )?,
                rule(
                    r"(?i)send\s+(?:a\s+|an\s+)?(?:mail|email)\s+to\s+(.+?)\s+(?:regarding|about|with\s+subject|subject)\s+(.+)",
                    &["recipient", "subject"],
                    &[],
                )?,
                rule(
                    r"(?i)(?:mail|email)\s+to\s+(.+?)\s+(?:regarding|about|with\s+subject|subject)\s+(.+)",
                    &["recipient", "subject"],
                    &[],
                )?,
                rule(
                    r"(?i)send\s+(?:a\s+|an\s+)?(?:mail|email)\s+to\s+(.+)",
                    &["recipient"],
                    &[],
                )?,
            ],
        );

        rules.insert(
            Intent::System,
            vec![
                rule(
                    r"(?i)\b(shutdown|shut\s+down|restart|reboot|sleep|hibernate|lock)\b",
                    &["operation"],
                    &[],
                )?,
                rule(
                    r"(?i)(?:system|cpu|memory|disk)\s+(?:info|status|usage)",
                    &[],
                    &[("operation", "status")],
                )?,
                rule(
                    r"(?i)task\s+manager|running\s+processes|\bprocesses\b",
                    &[],
                    &[("operation", "processes")],
                )?,
            ],
        );

        rules.insert(
            Intent::Web,
            vec![
                rule(
                    r"(?i)search\s+(?:the\s+web\s+)?(?:for\s+)?(.+)",
                    &["target"],
                    &[("action", "search")],
                )?,
                rule(
                    r"(?i)(?:google|look\s+up)\s+(.+)",
                    &["target"],
                    &[("action", "search")],
                )?,
                rule(
                    r"(?i)open\s+(?:the\s+)?(?:website\s+)?([\w.-]+)",
                    &["target"],
                    &[("action", "open")],
                )?,
            ],
        );

        rules.insert(
            Intent::Utility,
            vec![
                rule(
                    r"(?i)remind\s+me\s+to\s+(.+)",
                    &["detail"],
                    &[("topic", "reminder")],
                )?,
                rule(
                    r"(?i)calculate\s+(.+)",
                    &["expression"],
                    &[("topic", "calculate")],
                )?,
                rule(
                    r"(?i)\bweather\b(?:\s+in\s+(.+))?",
                    &["place"],
                    &[("topic", "weather")],
                )?,
                rule(r"(?i)\bjoke\b", &[], &[("topic", "joke")])?,
                rule(r"(?i)\btime\b", &[], &[("topic", "time")])?,
                rule(r"(?i)\bdate\b|\btoday\b", &[], &[("topic", "date")])?,
            ],
        );

        rules.insert(
            Intent::Info,
            vec![
                rule(
                    r"(?i)what\s+can\s+you\s+do|\bhelp\b|\bcapabilities\b|\bcommands\b",
                    &[],
                    &[("topic", "capabilities")],
                )?,
                rule(
                    r"(?i)who\s+are\s+you|\babout\b|\bversion\b",
                    &[],
                    &[("topic", "identity")],
                )?,
            ],
        );

        rules.insert(
            Intent::Media,
            vec![
                rule(
                    r"(?i)\bplay\s+(.+)",
                    &["item"],
                    &[("operation", "play")],
                )?,
                rule(
                    r"(?i)volume\s+(up|down)",
                    &["item"],
                    &[("operation", "volume")],
                )?,
                rule(
                    r"(?i)\b(pause|resume|stop|next|previous)\b",
                    &["operation"],
                    &[],
                )?,
            ],
        );

        rules.insert(
            Intent::SmartHome,
            vec![
                rule(
                    r"(?i)turn\s+(on|off)\s+(?:the\s+)?(.+)",
                    &["operation", "device"],
                    &[],
                )?,
                rule(
                    r"(?i)(?:set|change)\s+(?:the\s+)?(?:temperature|thermostat)\s+to\s+(\d+)",
                    &["value"],
                    &[("device", "thermostat"), ("operation", "set")],
                )?,
                rule(
                    r"(?i)\b(open|close)\s+(?:the\s+)?(.+)",
                    &["operation", "device"],
                    &[],
                )?,
            ],
        );

        Ok(Self {
            rules,
            normalizer,
            template_ref: Regex::new(r"(?i)using\s+template\s+(\w+)")?,
            template_recipient: Regex::new(r"(?i)\bto\s+(.+?)(?:\s+using\s+template\b|$)")?,
        })
    }

    /// Extract slots for the given intent. The returned command may be
    /// incomplete; the clarification dialog fills the rest.
    pub fn extract(
        &self,
        intent: Intent,
        utterance: &str,
        templates: &dyn TemplateSource,
    ) -> Command {
        let mut command = Command::new(intent, utterance);
        let text = utterance.trim();

        // A template reference replaces the regular email rules: subject and
        // body come from the stored template, the recipient from a plain
        // "to X" clause.
        if intent == Intent::Email && self.prefill_from_template(&mut command, text, templates) {
            self.finalize(&mut command);
            return command;
        }

        if let Some(rules) = self.rules.get(&intent) {
            for (index, rule) in rules.iter().enumerate() {
                if let Some(caps) = rule.pattern.captures(text) {
                    for (i, name) in rule.captures.iter().enumerate() {
                        if let Some(m) = caps.get(i + 1) {
                            command.set_slot(name, m.as_str());
                        }
                    }
                    for (name, value) in rule.presets {
                        command.set_slot(name, value);
                    }
                    debug!(intent = intent.name(), rule = index, "rule matched");
                    break;
                }
            }
        }

        self.finalize(&mut command);
        command
    }

    /// Post-processing for email commands: normalize the recipient and
    /// synthesize a body from the subject when none was spoken. Idempotent,
    /// and called again by the dispatcher after a clarification dialog fills
    /// slots that were missing at extraction time.
    pub fn finalize(&self, command: &mut Command) {
        if command.intent() != Intent::Email {
            return;
        }
        if let Some(recipient) = command.slot("recipient") {
            let normalized = self.normalizer.normalize(recipient);
            command.set_slot("recipient", &normalized);
        }
        if command.slot("body").is_none() {
            if let Some(subject) = command.slot("subject") {
                let body = generate_body(subject);
                command.set_slot("body", &body);
            }
        }
    }

    fn prefill_from_template(
        &self,
        command: &mut Command,
        text: &str,
        templates: &dyn TemplateSource,
    ) -> bool {
        let Some(caps) = self.template_ref.captures(text) else {
            return false;
        };
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            return false;
        };
        command.set_slot("template", name);
        match templates.find(name) {
            Some(template) => {
                command.set_slot("subject", &template.subject);
                command.set_slot("body", &template.body);
                debug!(template = name, "prefilled from template");
            }
            None => debug!(template = name, "template not found"),
        }
        if let Some(caps) = self.template_recipient.captures(text) {
            if let Some(m) = caps.get(1) {
                command.set_slot("recipient", m.as_str());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EmailTemplate, NoTemplates};

    struct OneTemplate;

    impl TemplateSource for OneTemplate {
        fn find(&self, name: &str) -> Option<EmailTemplate> {
            (name == "standup").then(|| EmailTemplate {
                name: "standup".to_string(),
                subject: "daily standup notes".to_string(),
                body: "Notes attached.".to_string(),
            })
        }
    }

    fn extractor() -> SlotExtractor {
        match SlotExtractor::new(AddressNormalizer::new("gmail.com")) {
            Ok(e) => e,
            Err(e) => panic!("extractor construction failed: {e}"),
        }
    }

    #[test]
    fn spreadsheet_write_into_cell() {
        let cmd = extractor().extract(Intent::Spreadsheet, "write hello in cell B2", &NoTemplates);
        assert_eq!(cmd.slot("text"), Some("hello"));
        assert_eq!(cmd.slot("cell"), Some("B2"));
        assert!(cmd.is_complete());
    }

    #[test]
    fn spreadsheet_first_matching_rule_wins() {
        // Both the "cell"-ful and "cell"-less rules could match; the first
        // declared rule is the one that does.
        let cmd = extractor().extract(
            Intent::Spreadsheet,
            "put quarterly totals into cell C10",
            &NoTemplates,
        );
        assert_eq!(cmd.slot("text"), Some("quarterly totals"));
        assert_eq!(cmd.slot("cell"), Some("C10"));
    }

    #[test]
    fn spreadsheet_without_the_word_cell() {
        let cmd = extractor().extract(Intent::Spreadsheet, "type done into D4", &NoTemplates);
        assert_eq!(cmd.slot("text"), Some("done"));
        assert_eq!(cmd.slot("cell"), Some("D4"));
    }

    #[test]
    fn spreadsheet_formula_rule_tags_the_kind() {
        let cmd = extractor().extract(
            Intent::Spreadsheet,
            "insert formula =SUM(A1:A9) into cell A10",
            &NoTemplates,
        );
        assert_eq!(cmd.slot("text"), Some("=SUM(A1:A9)"));
        assert_eq!(cmd.slot("cell"), Some("A10"));
        assert_eq!(cmd.slot("kind"), Some("formula"));
    }

    #[test]
    fn email_full_rule_takes_recipient_subject_and_body() {
        let cmd = extractor().extract(
            Intent::Email,
            "send an email to john doe at gmail about the offsite saying see you there",
            &NoTemplates,
        );
        assert_eq!(cmd.slot("recipient"), Some("johndoe@gmail.com"));
        assert_eq!(cmd.slot("subject"), Some("the offsite"));
        assert_eq!(cmd.slot("body"), Some("see you there"));
        assert!(cmd.is_complete());
    }

    #[test]
    fn email_without_body_synthesizes_one_from_the_subject() {
        let cmd = extractor().extract(
            Intent::Email,
            "send an email to mary at yahoo regarding the budget meeting",
            &NoTemplates,
        );
        assert_eq!(cmd.slot("recipient"), Some("mary@yahoo.com"));
        assert_eq!(cmd.slot("subject"), Some("the budget meeting"));
        let body = cmd.slot("body").unwrap_or_default();
        assert!(body.contains("the budget meeting"));
        assert!(cmd.is_complete());
    }

    #[test]
    fn email_recipient_only_is_incomplete() {
        let cmd = extractor().extract(Intent::Email, "send an email to bob", &NoTemplates);
        assert_eq!(cmd.slot("recipient"), Some("bob@gmail.com"));
        assert_eq!(cmd.slot("subject"), None);
        assert!(!cmd.is_complete());
    }

    #[test]
    fn email_template_reference_prefills_subject_and_body() {
        let cmd = extractor().extract(
            Intent::Email,
            "send email to jane using template standup",
            &OneTemplate,
        );
        assert_eq!(cmd.slot("template"), Some("standup"));
        assert_eq!(cmd.slot("subject"), Some("daily standup notes"));
        assert_eq!(cmd.slot("body"), Some("Notes attached."));
        assert_eq!(cmd.slot("recipient"), Some("jane@gmail.com"));
        assert!(cmd.is_complete());
    }

    #[test]
    fn email_missing_template_is_a_noop_lookup() {
        let cmd = extractor().extract(
            Intent::Email,
            "send email to jane using template missing",
            &NoTemplates,
        );
        assert_eq!(cmd.slot("template"), Some("missing"));
        assert_eq!(cmd.slot("subject"), None);
        assert_eq!(cmd.slot("recipient"), Some("jane@gmail.com"));
        assert!(!cmd.is_complete());
    }

    #[test]
    fn system_operation_verbs() {
        let e = extractor();
        let cmd = e.extract(Intent::System, "please restart the machine", &NoTemplates);
        assert_eq!(cmd.slot("operation"), Some("restart"));
        let cmd = e.extract(Intent::System, "show me the cpu usage", &NoTemplates);
        assert_eq!(cmd.slot("operation"), Some("status"));
        let cmd = e.extract(Intent::System, "open the task manager", &NoTemplates);
        assert_eq!(cmd.slot("operation"), Some("processes"));
    }

    #[test]
    fn web_search_and_open() {
        let e = extractor();
        let cmd = e.extract(Intent::Web, "search for rust workspaces", &NoTemplates);
        assert_eq!(cmd.slot("target"), Some("rust workspaces"));
        assert_eq!(cmd.slot("action"), Some("search"));
        let cmd = e.extract(Intent::Web, "open youtube", &NoTemplates);
        assert_eq!(cmd.slot("target"), Some("youtube"));
        assert_eq!(cmd.slot("action"), Some("open"));
    }

    #[test]
    fn utility_rules_set_topics_in_declared_order() {
        let e = extractor();
        let cmd = e.extract(Intent::Utility, "what time is it", &NoTemplates);
        assert_eq!(cmd.slot("topic"), Some("time"));
        let cmd = e.extract(Intent::Utility, "weather in lisbon", &NoTemplates);
        assert_eq!(cmd.slot("topic"), Some("weather"));
        assert_eq!(cmd.slot("place"), Some("lisbon"));
        let cmd = e.extract(Intent::Utility, "calculate 2 + 2 * 3", &NoTemplates);
        assert_eq!(cmd.slot("topic"), Some("calculate"));
        assert_eq!(cmd.slot("expression"), Some("2 + 2 * 3"));
        // "remind me to check the time" matches the reminder rule before the
        // time rule: declaration order is the contract.
        let cmd = e.extract(Intent::Utility, "remind me to check the time", &NoTemplates);
        assert_eq!(cmd.slot("topic"), Some("reminder"));
        assert_eq!(cmd.slot("detail"), Some("check the time"));
    }

    #[test]
    fn weather_without_a_place_leaves_the_optional_slot_absent() {
        let cmd = extractor().extract(Intent::Utility, "how is the weather", &NoTemplates);
        assert_eq!(cmd.slot("topic"), Some("weather"));
        assert_eq!(cmd.slot("place"), None);
        assert!(cmd.is_complete());
    }

    #[test]
    fn info_is_complete_even_without_a_rule_match() {
        let cmd = extractor().extract(Intent::Info, "tell me something", &NoTemplates);
        assert_eq!(cmd.slot("topic"), None);
        assert!(cmd.is_complete());
    }

    #[test]
    fn media_and_smart_home_rules() {
        let e = extractor();
        let cmd = e.extract(Intent::Media, "play some jazz", &NoTemplates);
        assert_eq!(cmd.slot("operation"), Some("play"));
        assert_eq!(cmd.slot("item"), Some("some jazz"));
        let cmd = e.extract(Intent::Media, "turn the volume up", &NoTemplates);
        assert_eq!(cmd.slot("operation"), Some("volume"));
        assert_eq!(cmd.slot("item"), Some("up"));
        let cmd = e.extract(Intent::SmartHome, "turn on the living room lights", &NoTemplates);
        assert_eq!(cmd.slot("operation"), Some("on"));
        assert_eq!(cmd.slot("device"), Some("living room lights"));
        let cmd = e.extract(Intent::SmartHome, "set the thermostat to 21", &NoTemplates);
        assert_eq!(cmd.slot("device"), Some("thermostat"));
        assert_eq!(cmd.slot("operation"), Some("set"));
        assert_eq!(cmd.slot("value"), Some("21"));
    }

    #[test]
    fn unmatched_required_slots_leave_the_command_incomplete() {
        let cmd = extractor().extract(Intent::Spreadsheet, "make the spreadsheet nicer", &NoTemplates);
        assert_eq!(cmd.slot("text"), None);
        assert!(!cmd.is_complete());
    }
}
