use std::path::Path;
use std::time::Duration;

use sysinfo::{Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};

use super::platform;
use super::snapshot::{BatteryReading, NetworkTotals, Usage};
use super::temperature::SensorGroup;
use super::{SourceKind, SourceUnavailable};

/// Window over which CPU usage is measured.
pub const DEFAULT_CPU_WINDOW: Duration = Duration::from_millis(100);

/// Raw host telemetry, one fallible query per metric category.
///
/// CPU readings are interval based: callers open a window with
/// [`MetricsProvider::begin_cpu_window`], wait [`MetricsProvider::cpu_window`],
/// then read. Each read closes the window it measured.
pub trait MetricsProvider {
    fn cpu_window(&self) -> Duration {
        DEFAULT_CPU_WINDOW
    }

    fn begin_cpu_window(&mut self);

    fn cpu_overall(&mut self) -> Result<f32, SourceUnavailable>;

    fn cpu_per_core(&mut self) -> Result<Vec<f32>, SourceUnavailable>;

    fn memory(&mut self) -> Result<Usage, SourceUnavailable>;

    fn disk(&mut self, mount_point: &Path) -> Result<Usage, SourceUnavailable>;

    fn network(&mut self) -> Result<NetworkTotals, SourceUnavailable>;

    /// May shell out on some platforms, so it is awaited with a bounded wait.
    fn battery(&mut self) -> impl Future<Output = Result<BatteryReading, SourceUnavailable>>;

    fn sensors(&mut self) -> Result<Vec<SensorGroup>, SourceUnavailable>;
}

pub struct SysinfoProvider {
    sys: System,
    disks: Disks,
    networks: Networks,
    components: Components,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        SysinfoProvider {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
        }
    }
}

impl MetricsProvider for SysinfoProvider {
    fn cpu_window(&self) -> Duration {
        DEFAULT_CPU_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
    }

    fn begin_cpu_window(&mut self) {
        self.sys.refresh_cpu_usage();
    }

    fn cpu_overall(&mut self) -> Result<f32, SourceUnavailable> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(SourceUnavailable::new(SourceKind::Cpu, "no cpus reported"));
        }
        Ok(self.sys.global_cpu_usage())
    }

    fn cpu_per_core(&mut self) -> Result<Vec<f32>, SourceUnavailable> {
        self.sys.refresh_cpu_usage();
        let cores: Vec<f32> = self.sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect();
        if cores.is_empty() {
            return Err(SourceUnavailable::new(
                SourceKind::CpuPerCore,
                "no cpus reported",
            ));
        }
        Ok(cores)
    }

    fn memory(&mut self) -> Result<Usage, SourceUnavailable> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SourceUnavailable::new(
                SourceKind::Memory,
                "total memory reported as zero",
            ));
        }
        Ok(Usage::from_bytes(self.sys.used_memory(), total))
    }

    fn disk(&mut self, mount_point: &Path) -> Result<Usage, SourceUnavailable> {
        self.disks.refresh(true);
        let disk = self
            .disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount_point)
            .ok_or_else(|| {
                SourceUnavailable::new(
                    SourceKind::Disk,
                    format!("no disk mounted at {}", mount_point.display()),
                )
            })?;
        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        Ok(Usage::from_bytes(used, total))
    }

    fn network(&mut self) -> Result<NetworkTotals, SourceUnavailable> {
        self.networks.refresh(true);
        if self.networks.list().is_empty() {
            return Err(SourceUnavailable::new(
                SourceKind::Network,
                "no network interfaces",
            ));
        }
        let (bytes_sent, bytes_received) = self
            .networks
            .list()
            .values()
            .fold((0u64, 0u64), |(tx, rx), data| {
                (
                    tx.saturating_add(data.total_transmitted()),
                    rx.saturating_add(data.total_received()),
                )
            });
        Ok(NetworkTotals {
            bytes_sent,
            bytes_received,
        })
    }

    async fn battery(&mut self) -> Result<BatteryReading, SourceUnavailable> {
        platform::battery()
            .await
            .ok_or_else(|| SourceUnavailable::new(SourceKind::Battery, "no battery detected"))
    }

    fn sensors(&mut self) -> Result<Vec<SensorGroup>, SourceUnavailable> {
        self.components.refresh(true);
        let groups = group_components(
            self.components
                .list()
                .iter()
                .filter_map(|c| c.temperature().map(|t| (c.label(), t))),
        );
        if groups.is_empty() {
            return Err(SourceUnavailable::new(
                SourceKind::Sensors,
                "no temperature sensors",
            ));
        }
        Ok(groups)
    }
}

/// Component labels look like `coretemp Package id 0`; the first word names
/// the sensor group. Group order follows first appearance.
fn group_components<'a>(readings: impl Iterator<Item = (&'a str, f32)>) -> Vec<SensorGroup> {
    let mut groups: Vec<SensorGroup> = Vec::new();
    for (label, celsius) in readings {
        let name = label.split_whitespace().next().unwrap_or(label);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.readings.push(celsius),
            None => groups.push(SensorGroup {
                name: name.to_string(),
                readings: vec![celsius],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_group_by_first_word() {
        let groups = group_components(
            [
                ("coretemp Package id 0", 55.0),
                ("acpitz temp1", 40.0),
                ("coretemp Core 0", 53.0),
            ]
            .into_iter(),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "coretemp");
        assert_eq!(groups[0].readings, vec![55.0, 53.0]);
        assert_eq!(groups[1].name, "acpitz");
    }

    #[test]
    fn unlabeled_component_keeps_raw_label() {
        let groups = group_components([("", 30.0)].into_iter());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "");
    }

    #[test]
    fn live_provider_reports_memory() {
        let mut provider = SysinfoProvider::new();
        let memory = provider.memory().expect("memory should be readable");
        assert!(memory.total_bytes > 0);
        assert!((0.0..=100.0).contains(&memory.percent));
    }

    #[test]
    fn live_provider_cpu_reads_stay_in_range() {
        let mut provider = SysinfoProvider::new();
        provider.begin_cpu_window();
        std::thread::sleep(provider.cpu_window());
        let overall = provider.cpu_overall().expect("cpu should be readable");
        assert!(overall >= 0.0);
        assert!(!provider.cpu_per_core().expect("cores").is_empty());
    }
}
