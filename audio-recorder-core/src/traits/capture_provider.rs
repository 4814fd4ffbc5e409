use std::sync::Arc;

use crate::models::device::Device;
use crate::models::error::RecorderError;

/// Callback invoked when a chunk of captured audio is available.
///
/// Parameters:
/// - `samples`: interleaved f32 samples in the device's native layout.
/// - `sample_rate`: the actual sample rate of the delivered audio.
/// - `channels`: channel count of the interleaved data.
///
/// Fires on a dedicated audio thread; implementations must keep
/// per-call work minimal and never block for long.
pub type AudioChunkCallback = Arc<dyn Fn(&[f32], u32, u16) + Send + Sync + 'static>;

/// Callback invoked when the stream faults mid-capture (for example the
/// device was unplugged). Capture may stop delivering chunks after
/// this; already-captured audio is kept.
pub type CaptureErrorCallback = Arc<dyn Fn(RecorderError) + Send + Sync + 'static>;

/// Interface to a host audio backend.
///
/// The engine is agnostic to the actual driver; `audio-recorder-cpal`
/// provides the production implementation and tests use a scripted
/// mock.
pub trait CaptureProvider: Send {
    /// Snapshot of the currently available input devices. An empty list
    /// is a valid result, not an error.
    fn list_devices(&self) -> Result<Vec<Device>, RecorderError>;

    /// Open a capture stream on `device` and begin delivering chunks.
    ///
    /// Only one stream at a time; a second start without an intervening
    /// stop fails with `DeviceBusy`.
    fn start(
        &mut self,
        device: &Device,
        on_chunk: AudioChunkCallback,
        on_error: CaptureErrorCallback,
    ) -> Result<(), RecorderError>;

    /// Stop the capture stream.
    ///
    /// Must not return until no further `on_chunk` invocation can fire,
    /// so the caller can safely materialize the captured buffer.
    fn stop(&mut self) -> Result<(), RecorderError>;
}
