//! speech-io: speech input/output traits with console and scripted backends

mod types;
pub use types::SpeechConfig;

mod traits;
pub use traits::{SpeechInput, SpeechOutput};

mod console;
pub use console::{ConsoleInput, ConsoleOutput};

#[cfg(feature = "scripted")]
mod scripted;
#[cfg(feature = "scripted")]
pub use scripted::{CapturedOutput, ScriptedInput};

pub mod plugin;
