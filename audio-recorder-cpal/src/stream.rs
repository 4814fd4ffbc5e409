use std::collections::HashMap;

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::SampleFormat;

use audio_recorder_core::{AudioChunkCallback, CaptureErrorCallback, RecorderError};

/// Assigns stable per-enumeration ids from device names. cpal exposes
/// no identifier stabler than the name, and hosts can report two
/// devices with the same name; the second and later occurrences get a
/// ` #n` suffix so every device stays addressable.
#[derive(Default)]
pub(crate) struct IdAssigner {
    seen: HashMap<String, usize>,
}

impl IdAssigner {
    pub fn next(&mut self, name: &str) -> String {
        let count = self.seen.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            name.to_string()
        } else {
            format!("{} #{}", name, count)
        }
    }
}

/// Input devices of the default host paired with their assigned ids.
/// Endpoints that cannot be named are skipped. Enumeration order is
/// the host's, so ids are reproducible within one device snapshot.
pub(crate) fn enumerate_input_devices() -> Result<Vec<(String, cpal::Device)>, RecorderError> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| RecorderError::DeviceUnavailable(e.to_string()))?;

    let mut ids = IdAssigner::default();
    let mut out = Vec::new();
    for device in devices {
        let Ok(name) = device.name() else { continue };
        out.push((ids.next(&name), device));
    }
    Ok(out)
}

/// Locate an input device by its assigned id.
pub(crate) fn find_input_device(device_id: &str) -> Result<cpal::Device, RecorderError> {
    enumerate_input_devices()?
        .into_iter()
        .find(|(id, _)| id == device_id)
        .map(|(_, device)| device)
        .ok_or_else(|| RecorderError::DeviceNotFound(device_id.to_string()))
}

/// Build an input stream on `device` in its native configuration,
/// converting every supported sample format to f32 at the edge so the
/// engine stays format-agnostic. The returned stream is not yet
/// playing.
pub(crate) fn build_input_stream(
    device: &cpal::Device,
    on_chunk: AudioChunkCallback,
    on_error: CaptureErrorCallback,
) -> Result<cpal::Stream, RecorderError> {
    let supported = device
        .default_input_config()
        .map_err(|e| RecorderError::DeviceUnavailable(e.to_string()))?;
    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.config();
    let sample_rate = config.sample_rate.0;
    let channels = config.channels;

    let stream = match sample_format {
        SampleFormat::F32 => {
            let err = on_error.clone();
            device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    on_chunk(data, sample_rate, channels);
                },
                move |e| err(map_stream_error(e)),
                None,
            )
        }
        SampleFormat::I16 => {
            let err = on_error.clone();
            // Scratch buffer reused across callbacks: the conversion
            // must not allocate on every invocation.
            let mut scratch: Vec<f32> = Vec::new();
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    scratch.clear();
                    scratch.extend(data.iter().map(|&s| i16_sample_to_f32(s)));
                    on_chunk(&scratch, sample_rate, channels);
                },
                move |e| err(map_stream_error(e)),
                None,
            )
        }
        SampleFormat::U16 => {
            let err = on_error.clone();
            let mut scratch: Vec<f32> = Vec::new();
            device.build_input_stream(
                &config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    scratch.clear();
                    scratch.extend(data.iter().map(|&s| u16_sample_to_f32(s)));
                    on_chunk(&scratch, sample_rate, channels);
                },
                move |e| err(map_stream_error(e)),
                None,
            )
        }
        other => {
            return Err(RecorderError::DeviceUnavailable(format!(
                "unsupported sample format: {other:?}"
            )))
        }
    };

    stream.map_err(map_build_error)
}

pub(crate) fn i16_sample_to_f32(sample: i16) -> f32 {
    sample as f32 / 32_768.0
}

pub(crate) fn u16_sample_to_f32(sample: u16) -> f32 {
    (sample as f32 - 32_768.0) / 32_768.0
}

pub(crate) fn map_build_error(err: cpal::BuildStreamError) -> RecorderError {
    match err {
        cpal::BuildStreamError::DeviceNotAvailable => {
            RecorderError::DeviceUnavailable("device not available".into())
        }
        cpal::BuildStreamError::StreamConfigNotSupported => {
            RecorderError::DeviceUnavailable("stream configuration not supported".into())
        }
        cpal::BuildStreamError::BackendSpecific { err } => {
            RecorderError::DeviceBusy(err.description)
        }
        other => RecorderError::DeviceUnavailable(other.to_string()),
    }
}

pub(crate) fn map_play_error(err: cpal::PlayStreamError) -> RecorderError {
    match err {
        cpal::PlayStreamError::DeviceNotAvailable => {
            RecorderError::DeviceUnavailable("device not available".into())
        }
        cpal::PlayStreamError::BackendSpecific { err } => {
            RecorderError::DeviceBusy(err.description)
        }
    }
}

pub(crate) fn map_stream_error(err: cpal::StreamError) -> RecorderError {
    match err {
        cpal::StreamError::DeviceNotAvailable => {
            RecorderError::DeviceUnavailable("device disconnected".into())
        }
        cpal::StreamError::BackendSpecific { err } => {
            RecorderError::DeviceUnavailable(err.description)
        }
    }
}
