use std::collections::HashSet;
use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, info, warn};

use super::provider::MetricsProvider;
use super::snapshot::{Snapshot, clamp_percent};
use super::temperature::TemperatureResolver;
use super::{CaptureError, SourceKind, SourceUnavailable};

/// What one capture samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    /// Per-core readings cost a second CPU window.
    pub per_core: bool,
    pub mount_point: PathBuf,
}

impl Default for SamplePlan {
    fn default() -> Self {
        SamplePlan {
            per_core: false,
            mount_point: PathBuf::from("/"),
        }
    }
}

pub struct Aggregator<P> {
    provider: P,
    resolver: TemperatureResolver,
    plan: SamplePlan,
    // Sources currently reporting unavailable, so state changes are logged once.
    unavailable: HashSet<SourceKind>,
}

impl<P: MetricsProvider> Aggregator<P> {
    pub fn new(provider: P, resolver: TemperatureResolver, plan: SamplePlan) -> Self {
        Aggregator {
            provider,
            resolver,
            plan,
            unavailable: HashSet::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sample every source once. Only a CPU or memory failure fails the
    /// capture; every other absence becomes `None` in the snapshot.
    pub async fn capture(&mut self) -> Result<Snapshot, CaptureError> {
        let window = self.provider.cpu_window();

        self.provider.begin_cpu_window();
        tokio::time::sleep(window).await;
        let cpu = self.provider.cpu_overall();
        self.track(SourceKind::Cpu, &cpu);

        let per_core = if self.plan.per_core {
            self.provider.begin_cpu_window();
            tokio::time::sleep(window).await;
            let cores = self.provider.cpu_per_core();
            self.track(SourceKind::CpuPerCore, &cores);
            Some(cores)
        } else {
            None
        };

        let memory = self.provider.memory();
        self.track(SourceKind::Memory, &memory);

        let disk = self.provider.disk(&self.plan.mount_point);
        self.track(SourceKind::Disk, &disk);

        let network = self.provider.network();
        self.track(SourceKind::Network, &network);

        let battery = self.provider.battery().await;
        self.track(SourceKind::Battery, &battery);

        let temperature = self.resolver.resolve(&mut self.provider).await;

        let timestamp = Local::now();

        let cpu = cpu.map_err(CaptureError::MetricsUnavailable)?;
        let per_core = per_core
            .transpose()
            .map_err(CaptureError::MetricsUnavailable)?
            .unwrap_or_default();
        let memory = memory.map_err(CaptureError::MetricsUnavailable)?;

        let snapshot = Snapshot {
            cpu_overall_percent: clamp_percent(cpu),
            cpu_per_core_percent: per_core.into_iter().map(clamp_percent).collect(),
            memory,
            disk: disk.ok(),
            network: network.ok(),
            battery: battery.ok().map(|mut b| {
                b.percent = clamp_percent(b.percent);
                b
            }),
            temperature: (!temperature.is_empty()).then_some(temperature),
            timestamp,
        };
        debug!(
            cpu = snapshot.cpu_overall_percent,
            memory = snapshot.memory.percent,
            cores = snapshot.cpu_per_core_percent.len(),
            "snapshot captured"
        );
        Ok(snapshot)
    }

    fn track<T>(&mut self, kind: SourceKind, result: &Result<T, SourceUnavailable>) {
        match result {
            Ok(_) => {
                if self.unavailable.remove(&kind) {
                    info!(source = kind.label(), "source available again");
                }
            }
            Err(err) => {
                if self.unavailable.insert(kind) {
                    warn!(source = kind.label(), reason = %err.reason, "source unavailable");
                }
            }
        }
    }
}
