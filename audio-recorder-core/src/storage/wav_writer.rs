use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::error::RecorderError;
use crate::models::reports::SaveReport;
use crate::processing::capture_buffer::CaptureBuffer;
use crate::processing::wav_format;

/// Serialize a capture buffer to a 32-bit float WAV file.
///
/// Missing parent directories are created. The header's declared sizes
/// match the written payload exactly; a zero-frame buffer produces a
/// valid header-only file. A recording too large for the header's
/// 32-bit size fields fails with `Io` before anything is written.
pub fn write_wav(buffer: &CaptureBuffer, path: &Path) -> Result<SaveReport, RecorderError> {
    let data_size = wav_format::data_size(buffer.samples().len()).ok_or_else(|| {
        RecorderError::Io(format!(
            "recording of {} samples exceeds the WAV 32-bit size limit",
            buffer.samples().len()
        ))
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::Io(format!("failed to create directory: {}", e)))?;
        }
    }

    let header = wav_format::generate_header(buffer.sample_rate(), buffer.channels(), data_size);

    let file = fs::File::create(path)
        .map_err(|e| RecorderError::Io(format!("failed to create file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(&header)
        .map_err(|e| RecorderError::Io(format!("write failed: {}", e)))?;
    for &sample in buffer.samples() {
        writer
            .write_all(&sample.to_le_bytes())
            .map_err(|e| RecorderError::Io(format!("write failed: {}", e)))?;
    }
    writer
        .flush()
        .map_err(|e| RecorderError::Io(format!("flush failed: {}", e)))?;

    Ok(SaveReport {
        file_path: path.to_path_buf(),
        file_size_bytes: wav_format::WAV_HEADER_SIZE as u64 + u64::from(data_size),
        duration_secs: buffer.duration_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("audio_recorder_test_{}", name))
    }

    #[test]
    fn writes_header_and_payload() {
        let path = temp_path("basic.wav");
        let buffer =
            CaptureBuffer::from_samples(44_100, 2, vec![0.0, 0.5, -0.5, 1.0]);

        let report = write_wav(&buffer, &path).unwrap();
        assert_eq!(report.file_size_bytes, 44 + 16);

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), 44 + 16);
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(u16::from_le_bytes([data[20], data[21]]), 3); // IEEE float

        let declared = u32::from_le_bytes([data[40], data[41], data[42], data[43]]);
        assert_eq!(declared as usize, data.len() - 44);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let path = temp_path("roundtrip.wav");
        let samples: Vec<f32> = (0..512)
            .map(|i| (i as f32 * 0.013).sin() * 0.8)
            .collect();
        let buffer = CaptureBuffer::from_samples(44_100, 2, samples.clone());

        write_wav(&buffer, &path).unwrap();

        let data = fs::read(&path).unwrap();
        let decoded: Vec<f32> = data[44..]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        assert_eq!(decoded.len(), samples.len());
        for (got, want) in decoded.iter().zip(&samples) {
            assert_eq!(got.to_bits(), want.to_bits());
        }

        fs::remove_file(&path).ok();
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = temp_path("nested_dir");
        let path = dir.join("deep").join("out.wav");
        let buffer = CaptureBuffer::from_samples(44_100, 2, vec![0.1, 0.2]);

        write_wav(&buffer, &path).unwrap();
        assert!(path.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_buffer_writes_header_only() {
        let path = temp_path("empty.wav");
        let buffer = CaptureBuffer::new(44_100, 2);

        let report = write_wav(&buffer, &path).unwrap();
        assert_eq!(report.file_size_bytes, 44);
        assert_eq!(report.duration_secs, 0.0);

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), 44);
        let declared = u32::from_le_bytes([data[40], data[41], data[42], data[43]]);
        assert_eq!(declared, 0);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let buffer = CaptureBuffer::from_samples(44_100, 2, vec![0.1, 0.2]);
        let err = write_wav(&buffer, Path::new("/proc/definitely/not/writable.wav"))
            .unwrap_err();
        assert!(matches!(err, RecorderError::Io(_)));
    }
}
