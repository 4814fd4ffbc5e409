use std::thread;

use cpal::traits::{DeviceTrait, StreamTrait};
use crossbeam_channel::{bounded, Receiver, Sender};

use audio_recorder_core::{
    AudioChunkCallback, CaptureErrorCallback, CaptureProvider, Device, RecorderError,
};

use crate::stream;

/// `CaptureProvider` backed by the default cpal host.
///
/// Each capture runs on its own thread because `cpal::Stream` is not
/// `Send`; the thread builds and plays the stream, then parks on a stop
/// channel. `stop` signals and joins it, so after `stop` returns no
/// chunk callback can fire.
pub struct CpalProvider {
    worker: Option<CaptureWorker>,
}

struct CaptureWorker {
    stop_tx: Sender<()>,
    handle: thread::JoinHandle<()>,
}

impl CpalProvider {
    pub fn new() -> Self {
        Self { worker: None }
    }

    fn stop_worker(&mut self) -> Result<(), RecorderError> {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            worker
                .handle
                .join()
                .map_err(|_| RecorderError::DeviceUnavailable("capture thread panicked".into()))?;
        }
        Ok(())
    }
}

impl Default for CpalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureProvider for CpalProvider {
    fn list_devices(&self) -> Result<Vec<Device>, RecorderError> {
        let mut out = Vec::new();
        for (id, device) in stream::enumerate_input_devices()? {
            // Skip endpoints we cannot query; they are not usable for
            // capture anyway.
            let Ok(name) = device.name() else { continue };
            let Ok(config) = device.default_input_config() else {
                continue;
            };
            out.push(Device {
                id,
                name,
                max_input_channels: config.channels(),
                default_sample_rate: config.sample_rate().0,
            });
        }
        Ok(out)
    }

    fn start(
        &mut self,
        device: &Device,
        on_chunk: AudioChunkCallback,
        on_error: CaptureErrorCallback,
    ) -> Result<(), RecorderError> {
        if self.worker.is_some() {
            return Err(RecorderError::DeviceBusy(
                "capture stream already running".into(),
            ));
        }

        let (ready_tx, ready_rx): (
            Sender<Result<(), RecorderError>>,
            Receiver<Result<(), RecorderError>>,
        ) = bounded(1);
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let device_id = device.id.clone();

        let handle = thread::Builder::new()
            .name("cpal-capture".into())
            .spawn(move || {
                let cpal_device = match stream::find_input_device(&device_id) {
                    Ok(d) => d,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let stream = match stream::build_input_stream(&cpal_device, on_chunk, on_error) {
                    Ok(s) => s,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                if let Err(e) = stream.play() {
                    let _ = ready_tx.send(Err(stream::map_play_error(e)));
                    return;
                }
                let _ = ready_tx.send(Ok(()));

                // Parked until stop() signals or the provider is dropped.
                let _ = stop_rx.recv();

                if let Err(e) = stream.pause() {
                    log::warn!("failed to pause capture stream: {}", e);
                }
                drop(stream);
            })
            .map_err(|e| {
                RecorderError::DeviceUnavailable(format!("failed to spawn capture thread: {}", e))
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.worker = Some(CaptureWorker { stop_tx, handle });
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(RecorderError::DeviceUnavailable(
                    "capture thread exited during startup".into(),
                ))
            }
        }
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        self.stop_worker()
    }
}

impl Drop for CpalProvider {
    fn drop(&mut self) {
        if let Err(e) = self.stop_worker() {
            log::warn!("capture worker shutdown failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_is_a_no_op() {
        let mut provider = CpalProvider::new();
        assert!(provider.stop().is_ok());
    }
}
