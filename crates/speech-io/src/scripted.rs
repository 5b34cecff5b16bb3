use crate::{SpeechInput, SpeechOutput};
use std::collections::VecDeque;
use std::time::Duration;

/// Replays a fixed sequence of replies; an empty entry simulates a timeout.
/// Once the script runs out every further listen times out.
pub struct ScriptedInput {
    replies: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl SpeechInput for ScriptedInput {
    fn listen(&mut self, _timeout: Duration, _phrase_limit: Duration) -> String {
        self.replies.pop_front().unwrap_or_default()
    }
}

/// Collects spoken lines so tests can assert on the dialog.
#[derive(Default)]
pub struct CapturedOutput {
    spoken: Vec<String>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }
}

impl SpeechOutput for CapturedOutput {
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }
}
