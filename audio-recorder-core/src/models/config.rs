/// Default margin applied around the kept region when trimming silence,
/// in seconds.
pub const DEFAULT_TRIM_MARGIN_SECS: f32 = 0.1;

/// Configuration for the recording engine.
///
/// The noise-floor margin and trim window size are empirically tuned;
/// the defaults here reproduce the reference behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Capture and export sample rate in Hz (default: 44100).
    pub sample_rate: u32,

    /// Number of interleaved channels in the capture buffer (default: 2).
    pub channels: u16,

    /// Multiplier applied to the learned ambient RMS before it is used
    /// as the silence threshold. 1.5 keeps ordinary floor jitter from
    /// triggering false positives (default: 1.5).
    pub noise_floor_margin: f32,

    /// Analysis window length for silence trimming, in milliseconds
    /// (default: 10.0).
    pub trim_window_ms: f32,

    /// Seconds of audio to pre-allocate in a fresh capture buffer so the
    /// device callback rarely pays for growth (default: 10.0).
    pub preallocate_secs: f32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if ![1, 2].contains(&self.channels) {
            return Err(format!("unsupported channel count: {}", self.channels));
        }
        if self.noise_floor_margin <= 0.0 {
            return Err("noise floor margin must be positive".into());
        }
        if self.trim_window_ms <= 0.0 {
            return Err("trim window must be positive".into());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            noise_floor_margin: 1.5,
            trim_window_ms: 10.0,
            preallocate_secs: 10.0,
        }
    }
}
