use crate::models::device::Device;
use crate::models::error::RecorderError;

/// Tracks which input device is active for the next recording session.
///
/// Selection is validated against a device snapshot supplied by the
/// caller and lives only for the process lifetime; nothing is
/// persisted.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    active: Option<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the device with `id` from `devices`. Fails with
    /// `DeviceNotFound` when the id is not in the snapshot; the previous
    /// selection is kept in that case.
    pub fn set_active(&mut self, devices: &[Device], id: &str) -> Result<(), RecorderError> {
        let device = devices
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| RecorderError::DeviceNotFound(id.to_string()))?;
        self.active = Some(device.clone());
        Ok(())
    }

    pub fn active(&self) -> Option<&Device> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<Device> {
        vec![
            Device {
                id: "usb-mic".into(),
                name: "USB Microphone".into(),
                max_input_channels: 2,
                default_sample_rate: 48_000,
            },
            Device {
                id: "built-in".into(),
                name: "Built-in Microphone".into(),
                max_input_channels: 1,
                default_sample_rate: 44_100,
            },
        ]
    }

    #[test]
    fn selecting_known_device_sets_active() {
        let mut registry = DeviceRegistry::new();
        registry.set_active(&devices(), "built-in").unwrap();

        assert_eq!(registry.active().unwrap().id, "built-in");
    }

    #[test]
    fn selecting_unknown_device_fails_and_keeps_previous() {
        let mut registry = DeviceRegistry::new();
        registry.set_active(&devices(), "usb-mic").unwrap();

        let err = registry.set_active(&devices(), "ghost").unwrap_err();
        assert_eq!(err, RecorderError::DeviceNotFound("ghost".into()));
        assert_eq!(registry.active().unwrap().id, "usb-mic");
    }

    #[test]
    fn starts_with_no_selection() {
        assert!(DeviceRegistry::new().active().is_none());
    }
}
