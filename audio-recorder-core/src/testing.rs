//! Scripted capture providers for tests. Not compiled into release
//! builds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::models::device::Device;
use crate::models::error::RecorderError;
use crate::traits::capture_provider::{
    AudioChunkCallback, CaptureErrorCallback, CaptureProvider,
};

/// Deterministic provider: delivers its scripted chunks synchronously
/// inside `start`, then optionally reports a fault.
#[derive(Default)]
pub(crate) struct MockProvider {
    pub devices: Vec<Device>,
    /// `(samples, sample_rate, channels)` tuples handed to the chunk
    /// callback in order.
    pub chunks: Vec<(Vec<f32>, u32, u16)>,
    pub fail_start: Option<RecorderError>,
    pub fail_stop: Option<RecorderError>,
    pub fault_after_chunks: Option<RecorderError>,
    pub started: bool,
}

impl MockProvider {
    pub fn with_chunks(chunks: Vec<(Vec<f32>, u32, u16)>) -> Self {
        Self {
            chunks,
            ..Default::default()
        }
    }

    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }
}

impl CaptureProvider for MockProvider {
    fn list_devices(&self) -> Result<Vec<Device>, RecorderError> {
        Ok(self.devices.clone())
    }

    fn start(
        &mut self,
        _device: &Device,
        on_chunk: AudioChunkCallback,
        on_error: CaptureErrorCallback,
    ) -> Result<(), RecorderError> {
        if let Some(err) = self.fail_start.clone() {
            return Err(err);
        }
        for (samples, sample_rate, channels) in &self.chunks {
            on_chunk(samples, *sample_rate, *channels);
        }
        if let Some(fault) = self.fault_after_chunks.clone() {
            on_error(fault);
        }
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        self.started = false;
        match self.fail_stop.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Provider that feeds chunks from a real producer thread, for
/// exercising the drain-and-join contract of `stop`.
pub(crate) struct ThreadedProvider {
    chunk: Vec<f32>,
    count: usize,
    stop_flag: Arc<AtomicBool>,
    done_flag: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ThreadedProvider {
    pub fn new(chunk: Vec<f32>, count: usize) -> Self {
        Self {
            chunk,
            count,
            stop_flag: Arc::new(AtomicBool::new(false)),
            done_flag: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Block until the producer thread has delivered every chunk.
    pub fn wait_until_done(&self) {
        while !self.done_flag.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(1));
        }
    }
}

impl CaptureProvider for ThreadedProvider {
    fn list_devices(&self) -> Result<Vec<Device>, RecorderError> {
        Ok(Vec::new())
    }

    fn start(
        &mut self,
        _device: &Device,
        on_chunk: AudioChunkCallback,
        _on_error: CaptureErrorCallback,
    ) -> Result<(), RecorderError> {
        let chunk = self.chunk.clone();
        let count = self.count;
        let stop_flag = Arc::clone(&self.stop_flag);
        let done_flag = Arc::clone(&self.done_flag);

        let handle = thread::Builder::new()
            .name("mock-capture".into())
            .spawn(move || {
                for _ in 0..count {
                    if stop_flag.load(Ordering::SeqCst) {
                        break;
                    }
                    on_chunk(&chunk, 44_100, 2);
                    thread::yield_now();
                }
                done_flag.store(true, Ordering::SeqCst);
            })
            .map_err(|e| RecorderError::DeviceUnavailable(e.to_string()))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| RecorderError::DeviceUnavailable("capture thread panicked".into()))?;
        }
        Ok(())
    }
}
