//! WAV container format helpers.
//!
//! Generates the standard 44-byte RIFF header for 32-bit IEEE-float
//! PCM, the only format this engine exports. Sizes are known before
//! writing, so no post-hoc patching is needed; the declared sizes must
//! match the payload exactly.

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Largest data payload the header can describe: the RIFF chunk size
/// field holds `36 + data_size` in 32 bits.
pub const MAX_DATA_SIZE: u64 = u32::MAX as u64 - 36;

/// WAVE format tag for IEEE-float samples.
pub const FORMAT_IEEE_FLOAT: u16 = 3;

/// Bits per sample for f32 PCM.
pub const BITS_PER_SAMPLE: u16 = 32;

/// Payload size in bytes for `sample_count` f32 samples, or `None`
/// when it would not fit the header's 32-bit size fields (a bit over
/// four gigabytes, roughly 3.4 hours of 44.1 kHz stereo float).
pub fn data_size(sample_count: usize) -> Option<u32> {
    let bytes = sample_count as u64 * u64::from(BITS_PER_SAMPLE / 8);
    (bytes <= MAX_DATA_SIZE).then_some(bytes as u32)
}

/// Generate a 44-byte WAV RIFF header for 32-bit float PCM,
/// little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    file size - 8 (= 36 + data_size)
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (fmt chunk size)
/// [20-21]  3 (IEEE float format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * 4
/// [32-33]  block_align = channels * 4
/// [34-35]  32 (bits per sample)
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_header(sample_rate: u32, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let bytes_per_sample = u32::from(BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate * u32::from(channels) * bytes_per_sample;
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let chunk_size = 36 + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&FORMAT_IEEE_FLOAT.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}
