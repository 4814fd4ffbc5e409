use thiserror::Error;

/// Errors surfaced by the recording engine.
///
/// All variants are recoverable at the caller's discretion. The engine
/// never retries device or file I/O on its own; it reports the precise
/// failure kind and lets the calling layer decide.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("device busy: {0}")]
    DeviceBusy(String),

    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("no recording in progress")]
    NotRecording,

    #[error("no recording available")]
    NoRecording,

    #[error("buffer is empty")]
    EmptyBuffer,

    #[error("buffer contains only silence")]
    SilentBuffer,

    #[error("no noise floor has been learned")]
    NoNoiseFloor,

    #[error("channel mismatch: buffer holds {expected} channels, chunk delivered {got}")]
    ChannelMismatch { expected: u16, got: u16 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(String),
}
