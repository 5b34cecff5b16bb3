use std::time::Duration;

/// One blocking speech-recognition turn.
///
/// `listen` returns the recognized text, or an empty string when the timeout
/// elapses or the audio could not be recognized. `phrase_limit` caps how long
/// a single phrase may run once speech has started.
pub trait SpeechInput {
    fn listen(&mut self, timeout: Duration, phrase_limit: Duration) -> String;
}

/// Blocking speech synthesis; returns once the utterance has finished playing.
pub trait SpeechOutput {
    fn speak(&mut self, text: &str);
}
