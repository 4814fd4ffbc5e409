use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A learned silence threshold.
///
/// Produced by an RMS pass over a calibration capture of ambient noise
/// and consumed by silence trimming. Held in memory until replaced;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseFloorEstimate {
    /// Windows whose RMS exceeds this value count as signal.
    pub rms_threshold: f32,
    pub learned_at: DateTime<Utc>,
}

impl NoiseFloorEstimate {
    pub fn new(rms_threshold: f32) -> Self {
        Self {
            rms_threshold,
            learned_at: Utc::now(),
        }
    }
}
