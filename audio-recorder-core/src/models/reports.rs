use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Peak analysis of a capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakAnalysis {
    /// Maximum absolute sample value across the buffer.
    pub peak_amplitude: f32,
    /// True if any sample reached full scale (>= 1.0).
    pub clipped: bool,
}

/// Summary returned when a recording stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopReport {
    pub frames: usize,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: u16,
    /// True when the stream faulted mid-capture or the driver stop
    /// failed; the captured frames are still retained.
    pub degraded: bool,
}

/// Summary returned after exporting a recording to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReport {
    pub file_path: PathBuf,
    pub file_size_bytes: u64,
    pub duration_secs: f64,
}

/// Summary returned after gain normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub target_db: f32,
    pub original_peak: f32,
    pub original_peak_db: f32,
    /// Linear gain factor applied to every sample.
    pub gain: f32,
    pub new_peak: f32,
}

/// Summary returned after silence trimming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimReport {
    pub original_frames: usize,
    pub trimmed_frames: usize,
    pub duration_secs: f64,
}
