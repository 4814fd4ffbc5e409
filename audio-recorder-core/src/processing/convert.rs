//! Pure sample-format plumbing between device-native chunks and the
//! engine's fixed stereo buffer. All functions work on `&[f32]` with no
//! platform dependencies.

/// Convert an interleaved chunk with any channel count to interleaved
/// stereo. Mono is duplicated to both channels, stereo passes through,
/// and wider layouts keep their first two channels.
pub fn to_stereo(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => {
            let mut stereo = Vec::with_capacity(samples.len() * 2);
            for &s in samples {
                stereo.push(s);
                stereo.push(s);
            }
            stereo
        }
        2 => samples.to_vec(),
        n => {
            let ch = n as usize;
            let frame_count = samples.len() / ch;
            let mut stereo = Vec::with_capacity(frame_count * 2);
            for frame in 0..frame_count {
                stereo.push(samples[frame * ch]);
                stereo.push(samples[frame * ch + 1]);
            }
            stereo
        }
    }
}

/// Average each stereo frame down to a single mono sample.
pub fn downmix_to_mono(stereo: &[f32]) -> Vec<f32> {
    stereo
        .chunks_exact(2)
        .map(|frame| (frame[0] + frame[1]) * 0.5)
        .collect()
}

/// Linear-interpolation resampling for interleaved stereo audio.
///
/// Input: `[L0, R0, L1, R1, ...]` at `source_rate`.
/// Returns the input unchanged when the rates match.
pub fn resample_stereo(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let frame_count = samples.len() / 2;
    let ratio = target_rate as f64 / source_rate as f64;
    let output_frames = (frame_count as f64 * ratio) as usize;
    if output_frames == 0 {
        return Vec::new();
    }

    let mut output = vec![0.0f32; output_frames * 2];
    for i in 0..output_frames {
        let source_index = i as f64 / ratio;
        let index = source_index as usize;
        let fraction = (source_index - index as f64) as f32;

        for ch in 0..2usize {
            if index + 1 < frame_count {
                output[i * 2 + ch] = samples[index * 2 + ch] * (1.0 - fraction)
                    + samples[(index + 1) * 2 + ch] * fraction;
            } else if index < frame_count {
                output[i * 2 + ch] = samples[index * 2 + ch];
            }
        }
    }
    output
}

/// Root-mean-square amplitude of a sample slice (0.0 for empty input).
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Peak absolute amplitude of a sample slice.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_duplicates_to_both_channels() {
        let stereo = to_stereo(&[0.1, 0.2], 1);
        assert_eq!(stereo, vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn stereo_passes_through() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        assert_eq!(to_stereo(&samples, 2), samples);
    }

    #[test]
    fn wide_layouts_keep_first_pair() {
        // Two 4-channel frames.
        let quad = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(to_stereo(&quad, 4), vec![1.0, 2.0, 5.0, 6.0]);
    }

    #[test]
    fn downmix_averages_frame_pairs() {
        assert_eq!(downmix_to_mono(&[0.2, 0.4, -1.0, 1.0]), vec![0.3, 0.0]);
    }

    #[test]
    fn resample_same_rate_is_passthrough() {
        let samples = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(resample_stereo(&samples, 48_000, 48_000), samples);
    }

    #[test]
    fn resample_upsample_doubles_frames() {
        let samples = vec![0.0, 0.0, 1.0, 1.0];
        let result = resample_stereo(&samples, 24_000, 48_000);

        assert_eq!(result.len(), 8);
        // Midpoint frame interpolates to ~0.5.
        assert!((result[2] - 0.5).abs() < 0.1);
        assert!((result[3] - 0.5).abs() < 0.1);
    }

    #[test]
    fn resample_downsample_halves_frames() {
        let samples: Vec<f32> = (0..200).map(|i| i as f32 / 200.0).collect();
        let result = resample_stereo(&samples, 48_000, 24_000);
        assert_eq!(result.len(), 100);
    }

    #[test]
    fn rms_of_silence_is_zero() {
        assert_eq!(rms(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn rms_of_full_scale() {
        assert!((rms(&[1.0, -1.0, 1.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn peak_uses_absolute_value() {
        assert!((peak(&[0.1, -0.5, 0.3]) - 0.5).abs() < 1e-6);
        assert_eq!(peak(&[]), 0.0);
    }
}
