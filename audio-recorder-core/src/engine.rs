use std::path::Path;

use crate::models::config::EngineConfig;
use crate::models::device::Device;
use crate::models::error::RecorderError;
use crate::models::noise_floor::NoiseFloorEstimate;
use crate::models::reports::{
    NormalizeReport, PeakAnalysis, SaveReport, StopReport, TrimReport,
};
use crate::models::state::SessionState;
use crate::processing::editor;
use crate::registry::DeviceRegistry;
use crate::session::recording::{Recording, RecordingSession};
use crate::storage::wav_writer;
use crate::traits::capture_provider::CaptureProvider;

/// The capture-and-edit engine's command surface.
///
/// Owns the device backend, the active-device selection, the recording
/// session, and the caller-held noise-floor estimate — explicit state
/// passed to operations instead of process-wide globals, so multiple
/// engines can coexist in tests. Transport layers (HTTP, CLI) are
/// collaborators that call these methods and serialize the returned
/// reports.
pub struct AudioEngine<P: CaptureProvider> {
    provider: P,
    config: EngineConfig,
    registry: DeviceRegistry,
    session: RecordingSession,
    noise_floor: Option<NoiseFloorEstimate>,
}

impl<P: CaptureProvider> AudioEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: EngineConfig::default(),
            registry: DeviceRegistry::new(),
            session: RecordingSession::new(),
            noise_floor: None,
        }
    }

    pub fn with_config(provider: P, config: EngineConfig) -> Result<Self, RecorderError> {
        config.validate().map_err(RecorderError::InvalidConfig)?;
        Ok(Self {
            provider,
            config,
            registry: DeviceRegistry::new(),
            session: RecordingSession::new(),
            noise_floor: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Available input devices; an empty list is not an error.
    pub fn list_devices(&self) -> Result<Vec<Device>, RecorderError> {
        self.provider.list_devices()
    }

    /// Select the device used by the next `start_recording`.
    pub fn set_active_device(&mut self, id: &str) -> Result<(), RecorderError> {
        let devices = self.provider.list_devices()?;
        self.registry.set_active(&devices, id)
    }

    pub fn active_device(&self) -> Option<&Device> {
        self.registry.active()
    }

    /// Begin capturing from the active device into a fresh buffer.
    ///
    /// The selection is re-validated against a fresh device snapshot so
    /// an unplugged device fails with `DeviceUnavailable` instead of a
    /// driver hang.
    pub fn start_recording(&mut self) -> Result<(), RecorderError> {
        if self.session.state().is_recording() {
            return Err(RecorderError::AlreadyRecording);
        }

        let device = self
            .registry
            .active()
            .cloned()
            .ok_or_else(|| RecorderError::DeviceNotFound("no active device set".into()))?;

        let devices = self.provider.list_devices()?;
        if !devices.iter().any(|d| d.id == device.id) {
            return Err(RecorderError::DeviceUnavailable(device.name));
        }

        let Self {
            provider,
            session,
            config,
            ..
        } = self;
        session.start(provider, &device, config)
    }

    /// Stop the capture; the buffer stays inside the engine for
    /// subsequent editing and saving.
    pub fn stop_recording(&mut self) -> Result<StopReport, RecorderError> {
        let Self {
            provider, session, ..
        } = self;
        session.stop(provider)
    }

    /// Export the retained recording as a 32-bit float WAV file.
    /// Repeated saves are allowed; the session state does not change.
    pub fn save_recording(&self, path: &Path) -> Result<SaveReport, RecorderError> {
        let recording = self.current_recording()?;
        wav_writer::write_wav(&recording.buffer, path)
    }

    /// Peak amplitude and clipping report for the retained recording.
    pub fn analyze_peak(&self) -> Result<PeakAnalysis, RecorderError> {
        let recording = self.current_recording()?;
        Ok(editor::analyze_peak(&recording.buffer))
    }

    /// Rewrite the retained recording so its peak lands at `target_db`.
    pub fn normalize(&mut self, target_db: f32) -> Result<NormalizeReport, RecorderError> {
        self.guard_not_recording()?;
        let recording = self
            .session
            .recording_mut()
            .ok_or(RecorderError::NoRecording)?;

        let (normalized, report) = editor::normalize(&recording.buffer, target_db)?;
        recording.buffer = normalized;
        Ok(report)
    }

    /// Learn the silence threshold from the retained recording (expected
    /// to be a short calibration capture of ambient noise). The estimate
    /// is kept inside the engine for `trim_silence`.
    pub fn learn_noise_floor(&mut self) -> Result<NoiseFloorEstimate, RecorderError> {
        let margin = self.config.noise_floor_margin;
        let recording = self.current_recording()?;
        let estimate = editor::learn_noise_floor(&recording.buffer, margin);
        self.noise_floor = Some(estimate.clone());
        Ok(estimate)
    }

    pub fn noise_floor(&self) -> Option<&NoiseFloorEstimate> {
        self.noise_floor.as_ref()
    }

    /// Cut leading and trailing silence from the retained recording
    /// using the previously learned noise floor.
    pub fn trim_silence(&mut self, margin_seconds: f32) -> Result<TrimReport, RecorderError> {
        self.guard_not_recording()?;
        let estimate = self
            .noise_floor
            .clone()
            .ok_or(RecorderError::NoNoiseFloor)?;
        let window_ms = self.config.trim_window_ms;
        let recording = self
            .session
            .recording_mut()
            .ok_or(RecorderError::NoRecording)?;

        let original_frames = recording.buffer.frame_count();
        let trimmed = editor::trim_silence(&recording.buffer, &estimate, margin_seconds, window_ms);
        let report = TrimReport {
            original_frames,
            trimmed_frames: trimmed.frame_count(),
            duration_secs: trimmed.duration_seconds(),
        };
        recording.buffer = trimmed;
        Ok(report)
    }

    fn guard_not_recording(&self) -> Result<(), RecorderError> {
        if self.session.state().is_recording() {
            return Err(RecorderError::AlreadyRecording);
        }
        Ok(())
    }

    fn current_recording(&self) -> Result<&Recording, RecorderError> {
        self.guard_not_recording()?;
        self.session.recording().ok_or(RecorderError::NoRecording)
    }
}
