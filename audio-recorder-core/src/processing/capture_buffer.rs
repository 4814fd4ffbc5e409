use crate::models::error::RecorderError;

/// Growable store of interleaved f32 audio frames.
///
/// The channel count and sample rate are fixed at construction; only
/// the frame count changes. Appends grow the backing `Vec` with
/// amortized doubling so the capture callback never pays O(n) per
/// chunk, and a fresh buffer can be pre-sized for the expected
/// recording length. Wrap in `Arc<parking_lot::Mutex<CaptureBuffer>>`
/// to share between the capture callback and a controller.
///
/// Invariant: `samples.len() % channels == 0` — the buffer always holds
/// whole frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureBuffer {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
}

impl CaptureBuffer {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            samples: Vec::new(),
        }
    }

    /// Create an empty buffer with capacity reserved for `seconds` of
    /// audio, so early appends from the capture callback do not
    /// reallocate.
    pub fn with_preallocation(sample_rate: u32, channels: u16, seconds: f32) -> Self {
        let capacity = (sample_rate as f32 * seconds).max(0.0) as usize * channels as usize;
        Self {
            sample_rate,
            channels,
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Build a buffer from existing interleaved samples. Any trailing
    /// partial frame is dropped to preserve the whole-frame invariant.
    pub fn from_samples(sample_rate: u32, channels: u16, mut samples: Vec<f32>) -> Self {
        let whole = samples.len() - samples.len() % channels as usize;
        samples.truncate(whole);
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved samples, `[L0, R0, L1, R1, ...]` for stereo.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Append a chunk of interleaved samples.
    ///
    /// Fails with `ChannelMismatch` if the chunk's channel count differs
    /// from the buffer's, or if the chunk ends on a partial frame.
    pub fn append(&mut self, samples: &[f32], channels: u16) -> Result<(), RecorderError> {
        if channels != self.channels || samples.len() % channels as usize != 0 {
            return Err(RecorderError::ChannelMismatch {
                expected: self.channels,
                got: channels,
            });
        }
        self.samples.extend_from_slice(samples);
        Ok(())
    }

    /// Copy out the frame range `[start_frame, end_frame)` as a new
    /// buffer. Bounds are clamped to `[0, frame_count]`; an inverted or
    /// out-of-range request yields an empty buffer, never a panic.
    pub fn slice(&self, start_frame: usize, end_frame: usize) -> CaptureBuffer {
        let frames = self.frame_count();
        let start = start_frame.min(frames);
        let end = end_frame.min(frames).max(start);
        let ch = self.channels as usize;
        CaptureBuffer {
            sample_rate: self.sample_rate,
            channels: self.channels,
            samples: self.samples[start * ch..end * ch].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::RecorderError;

    #[test]
    fn append_and_duration() {
        let mut buf = CaptureBuffer::new(100, 2);
        buf.append(&[0.1, 0.2, 0.3, 0.4], 2).unwrap();

        assert_eq!(buf.frame_count(), 2);
        assert!((buf.duration_seconds() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn append_rejects_channel_mismatch() {
        let mut buf = CaptureBuffer::new(44_100, 2);
        let err = buf.append(&[0.1], 1).unwrap_err();

        assert_eq!(err, RecorderError::ChannelMismatch { expected: 2, got: 1 });
        assert!(buf.is_empty());
    }

    #[test]
    fn append_rejects_partial_frame() {
        let mut buf = CaptureBuffer::new(44_100, 2);
        let err = buf.append(&[0.1, 0.2, 0.3], 2).unwrap_err();

        assert!(matches!(err, RecorderError::ChannelMismatch { .. }));
    }

    #[test]
    fn slice_clamps_out_of_range() {
        let mut buf = CaptureBuffer::new(100, 2);
        buf.append(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2).unwrap();

        let all = buf.slice(0, 999);
        assert_eq!(all.samples(), buf.samples());

        let inverted = buf.slice(2, 1);
        assert!(inverted.is_empty());

        let middle = buf.slice(1, 2);
        assert_eq!(middle.samples(), &[3.0, 4.0]);
    }

    #[test]
    fn slice_preserves_rate_and_channels() {
        let buf = CaptureBuffer::from_samples(48_000, 2, vec![0.0; 8]);
        let sliced = buf.slice(1, 3);

        assert_eq!(sliced.sample_rate(), 48_000);
        assert_eq!(sliced.channels(), 2);
        assert_eq!(sliced.frame_count(), 2);
    }

    #[test]
    fn from_samples_drops_partial_frame() {
        let buf = CaptureBuffer::from_samples(44_100, 2, vec![0.1, 0.2, 0.3]);
        assert_eq!(buf.frame_count(), 1);
    }

    #[test]
    fn preallocation_does_not_add_frames() {
        let buf = CaptureBuffer::with_preallocation(44_100, 2, 5.0);
        assert!(buf.is_empty());
        assert_eq!(buf.duration_seconds(), 0.0);
    }
}
