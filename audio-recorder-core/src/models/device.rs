use serde::{Deserialize, Serialize};

/// An input device available for capture.
///
/// Immutable snapshot taken from the host audio subsystem at
/// enumeration time; identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub max_input_channels: u16,
    pub default_sample_rate: u32,
}
