//! Scripted [`MetricsProvider`] for unit tests, the `tests/` suites and the bench.
//! Public so those external targets can link it; it reads no OS state.

use std::path::Path;

use super::provider::MetricsProvider;
use super::snapshot::{BatteryReading, NetworkTotals, Usage};
use super::temperature::SensorGroup;
use super::{SourceKind, SourceUnavailable};

const GIB: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct FakeProvider {
    /// Cycled one value per read; empty means the CPU is unreadable.
    pub cpu_overall: Vec<f32>,
    pub cpu_per_core: Vec<f32>,
    pub memory: Option<Usage>,
    pub disk: Option<Usage>,
    pub network: Option<NetworkTotals>,
    pub battery: Option<BatteryReading>,
    pub sensors: Vec<SensorGroup>,
    /// Number of upcoming memory reads that fail before `memory` is served.
    pub memory_failures: u32,
    cpu_reads: usize,
    windows_opened: usize,
}

impl FakeProvider {
    pub fn healthy() -> Self {
        FakeProvider {
            cpu_overall: vec![25.0],
            cpu_per_core: vec![20.0, 30.0, 25.0, 25.0],
            memory: Some(Usage::from_bytes(4 * GIB, 16 * GIB)),
            disk: Some(Usage::from_bytes(120 * GIB, 500 * GIB)),
            network: Some(NetworkTotals {
                bytes_sent: 1536,
                bytes_received: 3 * 1024 * 1024,
            }),
            battery: Some(BatteryReading {
                percent: 76.0,
                is_charging: true,
            }),
            sensors: Vec::new(),
            memory_failures: 0,
            cpu_reads: 0,
            windows_opened: 0,
        }
    }

    pub fn with_cpu(mut self, values: &[f32]) -> Self {
        self.cpu_overall = values.to_vec();
        self
    }

    pub fn without_battery(mut self) -> Self {
        self.battery = None;
        self
    }

    pub fn failing_memory(mut self, reads: u32) -> Self {
        self.memory_failures = reads;
        self
    }

    pub fn windows_opened(&self) -> usize {
        self.windows_opened
    }
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::healthy()
    }
}

impl MetricsProvider for FakeProvider {
    fn begin_cpu_window(&mut self) {
        self.windows_opened += 1;
    }

    fn cpu_overall(&mut self) -> Result<f32, SourceUnavailable> {
        if self.cpu_overall.is_empty() {
            return Err(SourceUnavailable::new(SourceKind::Cpu, "scripted failure"));
        }
        let value = self.cpu_overall[self.cpu_reads % self.cpu_overall.len()];
        self.cpu_reads += 1;
        Ok(value)
    }

    fn cpu_per_core(&mut self) -> Result<Vec<f32>, SourceUnavailable> {
        if self.cpu_per_core.is_empty() {
            return Err(SourceUnavailable::new(
                SourceKind::CpuPerCore,
                "scripted failure",
            ));
        }
        Ok(self.cpu_per_core.clone())
    }

    fn memory(&mut self) -> Result<Usage, SourceUnavailable> {
        if self.memory_failures > 0 {
            self.memory_failures -= 1;
            return Err(SourceUnavailable::new(SourceKind::Memory, "scripted failure"));
        }
        self.memory
            .ok_or_else(|| SourceUnavailable::new(SourceKind::Memory, "scripted failure"))
    }

    fn disk(&mut self, mount_point: &Path) -> Result<Usage, SourceUnavailable> {
        self.disk.ok_or_else(|| {
            SourceUnavailable::new(
                SourceKind::Disk,
                format!("no disk mounted at {}", mount_point.display()),
            )
        })
    }

    fn network(&mut self) -> Result<NetworkTotals, SourceUnavailable> {
        self.network
            .ok_or_else(|| SourceUnavailable::new(SourceKind::Network, "no interfaces"))
    }

    async fn battery(&mut self) -> Result<BatteryReading, SourceUnavailable> {
        self.battery
            .ok_or_else(|| SourceUnavailable::new(SourceKind::Battery, "no battery detected"))
    }

    fn sensors(&mut self) -> Result<Vec<SensorGroup>, SourceUnavailable> {
        if self.sensors.is_empty() {
            return Err(SourceUnavailable::new(SourceKind::Sensors, "no sensors"));
        }
        Ok(self.sensors.clone())
    }
}
