use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub percent: f32,
}

impl Usage {
    pub fn from_bytes(used_bytes: u64, total_bytes: u64) -> Self {
        let percent = if total_bytes > 0 {
            used_bytes as f64 / total_bytes as f64 * 100.0
        } else {
            0.0
        };
        Usage {
            used_bytes,
            total_bytes,
            percent: clamp_percent(percent as f32),
        }
    }
}

/// Cumulative counters since boot. Not a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkTotals {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub percent: f32,
    pub is_charging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Temperatures {
    pub cpu_celsius: Option<f32>,
    pub battery_celsius: Option<f32>,
}

impl Temperatures {
    pub fn is_empty(&self) -> bool {
        self.cpu_celsius.is_none() && self.battery_celsius.is_none()
    }
}

/// One tick's readings. Percent fields are always within `0..=100`; a missing
/// subsystem is `None`, never a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub cpu_overall_percent: f32,
    /// Empty when the active profile does not ask for per-core readings.
    pub cpu_per_core_percent: Vec<f32>,
    pub memory: Usage,
    pub disk: Option<Usage>,
    pub network: Option<NetworkTotals>,
    pub battery: Option<BatteryReading>,
    pub temperature: Option<Temperatures>,
    pub timestamp: DateTime<Local>,
}

pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
