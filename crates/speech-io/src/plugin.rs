use crate::{ConsoleInput, ConsoleOutput, SpeechInput, SpeechOutput};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputBackendKind {
    Console,
    WhisperCpp,
    Vosk,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputBackendKind {
    Console,
    Espeak,
}

pub fn new_input_backend(kind: InputBackendKind) -> Result<Box<dyn SpeechInput + Send>, String> {
    match kind {
        InputBackendKind::Console => Ok(Box::new(ConsoleInput::new(true))),
        InputBackendKind::WhisperCpp => Err("whisper_cpp backend not yet integrated".into()),
        InputBackendKind::Vosk => Err("vosk backend not yet integrated".into()),
    }
}

pub fn new_output_backend(
    kind: OutputBackendKind,
    voice_name: &str,
) -> Result<Box<dyn SpeechOutput + Send>, String> {
    match kind {
        OutputBackendKind::Console => Ok(Box::new(ConsoleOutput::new(voice_name))),
        OutputBackendKind::Espeak => Err("espeak backend not yet integrated".into()),
    }
}
