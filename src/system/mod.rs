pub mod aggregator;
pub mod command;
pub mod fake;
pub mod platform;
pub mod provider;
pub mod snapshot;
pub mod temperature;

use thiserror::Error;

/// One metric category the provider can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Cpu,
    CpuPerCore,
    Memory,
    Disk,
    Network,
    Battery,
    Sensors,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Cpu => "cpu",
            SourceKind::CpuPerCore => "cpu per-core",
            SourceKind::Memory => "memory",
            SourceKind::Disk => "disk",
            SourceKind::Network => "network",
            SourceKind::Battery => "battery",
            SourceKind::Sensors => "sensors",
        }
    }
}

/// A source had nothing to report this tick. Expected for batteries and
/// sensors on many hosts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} unavailable: {reason}", .kind.label())]
pub struct SourceUnavailable {
    pub kind: SourceKind,
    pub reason: String,
}

impl SourceUnavailable {
    pub fn new(kind: SourceKind, reason: impl Into<String>) -> Self {
        SourceUnavailable {
            kind,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// CPU or memory could not be read; no partial snapshot is produced.
    #[error("metrics unavailable: {0}")]
    MetricsUnavailable(SourceUnavailable),
}
