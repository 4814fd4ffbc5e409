//! Post-capture editing algorithms.
//!
//! Every function here is a pure transform over a `CaptureBuffer`; the
//! only state carried between calls is the caller-held
//! `NoiseFloorEstimate`.

use crate::models::error::RecorderError;
use crate::models::noise_floor::NoiseFloorEstimate;
use crate::models::reports::{NormalizeReport, PeakAnalysis};
use crate::processing::capture_buffer::CaptureBuffer;
use crate::processing::convert;

/// Absolute sample value at or above which a capture counts as clipped.
pub const CLIP_THRESHOLD: f32 = 1.0;

/// Scan the buffer for its peak amplitude and report whether any sample
/// reached full scale.
pub fn analyze_peak(buffer: &CaptureBuffer) -> PeakAnalysis {
    let peak = convert::peak(buffer.samples());
    PeakAnalysis {
        peak_amplitude: peak,
        clipped: peak >= CLIP_THRESHOLD,
    }
}

/// Scale every sample so the peak lands at `target_db` (0.0 dB = full
/// scale).
///
/// The output is deliberately not clamped: a positive `target_db`
/// produces samples beyond unit amplitude, and the caller owns that
/// choice. Fails with `EmptyBuffer` on a zero-frame buffer and
/// `SilentBuffer` when the peak is exactly zero (no gain can be
/// computed).
pub fn normalize(
    buffer: &CaptureBuffer,
    target_db: f32,
) -> Result<(CaptureBuffer, NormalizeReport), RecorderError> {
    if buffer.is_empty() {
        return Err(RecorderError::EmptyBuffer);
    }

    let original_peak = convert::peak(buffer.samples());
    if original_peak == 0.0 {
        return Err(RecorderError::SilentBuffer);
    }

    let target_amplitude = 10.0f32.powf(target_db / 20.0);
    let gain = target_amplitude / original_peak;

    let scaled: Vec<f32> = buffer.samples().iter().map(|s| s * gain).collect();
    let new_peak = convert::peak(&scaled);
    let normalized =
        CaptureBuffer::from_samples(buffer.sample_rate(), buffer.channels(), scaled);

    let report = NormalizeReport {
        target_db,
        original_peak,
        original_peak_db: 20.0 * original_peak.log10(),
        gain,
        new_peak,
    };
    Ok((normalized, report))
}

/// Learn a silence threshold from a calibration capture of ambient
/// noise.
///
/// The buffer's overall RMS is multiplied by `margin` (1.5 by default,
/// see `EngineConfig::noise_floor_margin`) so jitter around the floor
/// stays below the threshold.
pub fn learn_noise_floor(buffer: &CaptureBuffer, margin: f32) -> NoiseFloorEstimate {
    NoiseFloorEstimate::new(convert::rms(buffer.samples()) * margin)
}

/// Cut leading and trailing silence, keeping `margin_seconds` of
/// padding on each side of the detected signal.
///
/// The buffer is scanned in fixed windows of `window_ms`; a window
/// counts as signal when its RMS strictly exceeds the learned
/// threshold. If no window qualifies the result is an empty buffer,
/// which is a valid outcome rather than an error.
pub fn trim_silence(
    buffer: &CaptureBuffer,
    noise_floor: &NoiseFloorEstimate,
    margin_seconds: f32,
    window_ms: f32,
) -> CaptureBuffer {
    let frame_count = buffer.frame_count();
    if frame_count == 0 {
        return buffer.clone();
    }

    let window_frames =
        ((window_ms / 1000.0 * buffer.sample_rate() as f32) as usize).max(1);
    let ch = buffer.channels() as usize;
    let samples = buffer.samples();

    let mut first_signal: Option<usize> = None;
    let mut last_signal_end: usize = 0;

    let mut start = 0;
    while start < frame_count {
        let end = (start + window_frames).min(frame_count);
        let window = &samples[start * ch..end * ch];
        if convert::rms(window) > noise_floor.rms_threshold {
            first_signal.get_or_insert(start);
            last_signal_end = end;
        }
        start = end;
    }

    let Some(first) = first_signal else {
        // Entirely silent by this measure.
        return buffer.slice(0, 0);
    };

    let margin_frames = (margin_seconds * buffer.sample_rate() as f32).max(0.0) as usize;
    let keep_from = first.saturating_sub(margin_frames);
    let keep_to = last_signal_end.saturating_add(margin_frames);
    buffer.slice(keep_from, keep_to)
}
