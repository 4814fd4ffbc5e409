//! # audio-recorder-cpal
//!
//! cpal-backed `CaptureProvider` for `audio-recorder-core`.
//!
//! Enumerates host input devices and runs the capture stream on a
//! dedicated thread: `cpal::Stream` is not `Send`, so the provider
//! spawns a thread that owns the stream and parks until told to stop.
//! Stopping joins that thread, which gives the engine its guarantee
//! that no callback fires after `stop` returns.

mod provider;
mod stream;

pub use provider::CpalProvider;
