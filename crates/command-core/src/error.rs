use thiserror::Error;

/// Failures that can surface inside one dispatch turn.
///
/// None of these are fatal to the conversation loop: the dispatcher converts
/// them into a failed `ActionOutcome`, speaks a short response, and records
/// the turn.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no intent keyword matched the utterance")]
    Unclassified,

    #[error("required slot '{slot}' was never filled")]
    IncompleteSlots { slot: String },

    #[error("executor failure: {0}")]
    ExecutorFailure(String),

    #[error("speech input timed out")]
    SpeechTimeout,

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
