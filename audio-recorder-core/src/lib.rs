//! # audio-recorder-core
//!
//! Platform-agnostic audio capture-and-edit engine.
//!
//! Owns the recording buffer, drives a device stream through the
//! `CaptureProvider` trait, and implements the post-capture editing
//! algorithms (peak analysis, gain normalization, noise-floor learning,
//! silence trimming) plus WAV export. Hardware backends such as
//! `audio-recorder-cpal` implement `CaptureProvider` and plug into the
//! generic `AudioEngine`.
//!
//! ## Architecture
//!
//! ```text
//! audio-recorder-core (this crate)
//! ├── traits/       ← CaptureProvider + callback types
//! ├── models/       ← RecorderError, SessionState, EngineConfig, Device, reports
//! ├── processing/   ← CaptureBuffer, sample conversion, editor, WAV header
//! ├── session/      ← RecordingSession (idle → recording → stopped)
//! ├── storage/      ← WAV file export
//! ├── registry      ← active-device selection
//! └── engine        ← AudioEngine command surface
//! ```

pub mod engine;
pub mod models;
pub mod processing;
pub mod registry;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use engine::AudioEngine;
pub use models::config::{EngineConfig, DEFAULT_TRIM_MARGIN_SECS};
pub use models::device::Device;
pub use models::error::RecorderError;
pub use models::noise_floor::NoiseFloorEstimate;
pub use models::reports::{NormalizeReport, PeakAnalysis, SaveReport, StopReport, TrimReport};
pub use models::state::SessionState;
pub use processing::capture_buffer::CaptureBuffer;
pub use registry::DeviceRegistry;
pub use session::recording::{Recording, RecordingSession};
pub use traits::capture_provider::{AudioChunkCallback, CaptureErrorCallback, CaptureProvider};
