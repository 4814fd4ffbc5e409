use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::config::EngineConfig;
use crate::models::device::Device;
use crate::models::error::RecorderError;
use crate::models::reports::StopReport;
use crate::models::state::SessionState;
use crate::processing::capture_buffer::CaptureBuffer;
use crate::processing::convert;
use crate::traits::capture_provider::{
    AudioChunkCallback, CaptureErrorCallback, CaptureProvider,
};

/// A completed capture held by the session until the next start.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub buffer: CaptureBuffer,
    /// True when the stream faulted mid-capture or the driver stop
    /// failed. The frames captured before the fault are intact.
    pub degraded: bool,
}

enum Phase {
    Idle,
    Recording {
        buffer: Arc<Mutex<CaptureBuffer>>,
        fault: Arc<Mutex<Option<RecorderError>>>,
    },
    Stopped(Recording),
}

/// State machine coordinating one capture at a time.
///
/// While `Recording`, exactly two contexts touch the buffer: the
/// provider's audio callback appending chunks and the controller
/// issuing `stop`. The mutex is held only for the duration of a single
/// append, never across the recording. `stop` joins the provider before
/// materializing the buffer, so no in-flight append can race the
/// snapshot.
pub struct RecordingSession {
    phase: Phase,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Recording { .. } => SessionState::Recording,
            Phase::Stopped(_) => SessionState::Stopped,
        }
    }

    /// Open a stream on `device` and begin capturing into a fresh
    /// buffer. Any previously stopped recording is discarded ("last
    /// recording wins"). Fails with `AlreadyRecording` while a capture
    /// is running.
    pub fn start<P: CaptureProvider>(
        &mut self,
        provider: &mut P,
        device: &Device,
        config: &EngineConfig,
    ) -> Result<(), RecorderError> {
        if matches!(self.phase, Phase::Recording { .. }) {
            return Err(RecorderError::AlreadyRecording);
        }

        let buffer = Arc::new(Mutex::new(CaptureBuffer::with_preallocation(
            config.sample_rate,
            config.channels,
            config.preallocate_secs,
        )));
        let fault: Arc<Mutex<Option<RecorderError>>> = Arc::new(Mutex::new(None));

        let target_rate = config.sample_rate;
        let target_channels = config.channels;
        let ingest = Arc::clone(&buffer);
        let on_chunk: AudioChunkCallback = Arc::new(move |samples, sample_rate, channels| {
            let stereo = convert::to_stereo(samples, channels);
            let resampled = convert::resample_stereo(&stereo, sample_rate, target_rate);
            let shaped = if target_channels == 1 {
                convert::downmix_to_mono(&resampled)
            } else {
                resampled
            };
            // Lock held only for this append.
            if let Err(err) = ingest.lock().append(&shaped, target_channels) {
                log::error!("dropping malformed capture chunk: {}", err);
            }
        });

        let fault_slot = Arc::clone(&fault);
        let on_error: CaptureErrorCallback = Arc::new(move |err| {
            log::warn!("capture stream fault: {}", err);
            let mut slot = fault_slot.lock();
            if slot.is_none() {
                *slot = Some(err);
            }
        });

        provider.start(device, on_chunk, on_error)?;
        self.phase = Phase::Recording { buffer, fault };
        Ok(())
    }

    /// Stop the capture and freeze the buffer.
    ///
    /// If the stream faulted mid-capture or the driver stop fails, the
    /// frames captured so far are still kept and the report is tagged
    /// `degraded` instead of surfacing a hard error.
    pub fn stop<P: CaptureProvider>(
        &mut self,
        provider: &mut P,
    ) -> Result<StopReport, RecorderError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Recording { buffer, fault } => {
                // Join the producer first; after this no append can race
                // the snapshot below.
                let stop_result = provider.stop();
                if let Err(err) = &stop_result {
                    log::warn!("device stop failed, keeping captured frames: {}", err);
                }

                let buffer = match Arc::try_unwrap(buffer) {
                    Ok(inner) => inner.into_inner(),
                    // A callback clone is still alive somewhere; fall
                    // back to copying under the lock.
                    Err(shared) => shared.lock().clone(),
                };
                let degraded = stop_result.is_err() || fault.lock().is_some();

                let report = StopReport {
                    frames: buffer.frame_count(),
                    duration_secs: buffer.duration_seconds(),
                    sample_rate: buffer.sample_rate(),
                    channels: buffer.channels(),
                    degraded,
                };
                self.phase = Phase::Stopped(Recording { buffer, degraded });
                Ok(report)
            }
            other => {
                self.phase = other;
                Err(RecorderError::NotRecording)
            }
        }
    }

    /// The stopped recording, if any. `None` while idle or recording.
    pub fn recording(&self) -> Option<&Recording> {
        match &self.phase {
            Phase::Stopped(recording) => Some(recording),
            _ => None,
        }
    }

    pub fn recording_mut(&mut self) -> Option<&mut Recording> {
        match &mut self.phase {
            Phase::Stopped(recording) => Some(recording),
            _ => None,
        }
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}
