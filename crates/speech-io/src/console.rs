use crate::{SpeechInput, SpeechOutput};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::debug;

/// Text stand-in for a microphone: each typed line is one "heard" phrase.
///
/// Stdin has no portable read deadline, so the timeout is not enforced here;
/// an empty line plays the role of a timed-out listen.
pub struct ConsoleInput {
    prompt: bool,
}

impl ConsoleInput {
    pub fn new(prompt: bool) -> Self {
        Self { prompt }
    }
}

impl SpeechInput for ConsoleInput {
    fn listen(&mut self, _timeout: Duration, _phrase_limit: Duration) -> String {
        if self.prompt {
            print!("you> ");
            let _ = io::stdout().flush();
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => String::new(), // EOF behaves like a timeout
            Ok(_) => {
                let heard = line.trim().to_string();
                debug!(text = %heard, "heard");
                heard
            }
            Err(e) => {
                debug!(error = %e, "stdin read failed");
                String::new()
            }
        }
    }
}

/// Prints spoken lines to stdout in place of a TTS engine.
pub struct ConsoleOutput {
    name: String,
}

impl ConsoleOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SpeechOutput for ConsoleOutput {
    fn speak(&mut self, text: &str) {
        println!("{}: {}", self.name, text);
    }
}
