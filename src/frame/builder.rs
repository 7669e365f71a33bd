use crate::format::{format_bytes, format_used_total};
use crate::severity::{self, MetricKind, SeverityBand};
use crate::system::snapshot::{BatteryReading, Snapshot, Temperatures, Usage};

use super::{Arrangement, Frame, Gauge, LayoutProfile, Panel, Row, Tone};

pub const BAR_WIDTH: u16 = 50;
pub const CONTROL_GAUGE_WIDTH: u16 = 50;
pub const CONTROL_DETAIL_GAUGE_WIDTH: u16 = 25;
pub const MAX_DISPLAYED_CORES: usize = 8;

const MONITOR_TITLE: &str = "SYSTEM MONITOR";
const CONTROL_TITLE: &str = "SYSTEM CONTROL PANEL";
const METRICS_PANEL: &str = "System Metrics";
const LEFT_PANEL: &str = "PROCESSORS & MEMORY";
const RIGHT_PANEL: &str = "NETWORK & POWER";
const EXIT_HINT: &str = "Press Ctrl+C to exit";
const NO_BATTERY: &str = "No battery detected";
const NOT_AVAILABLE: &str = "N/A";
const UNAVAILABLE: &str = "unavailable";

/// Turns snapshots into frames for one layout profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameBuilder {
    profile: LayoutProfile,
}

impl FrameBuilder {
    pub fn new(profile: LayoutProfile) -> Self {
        FrameBuilder { profile }
    }

    pub fn profile(&self) -> LayoutProfile {
        self.profile
    }

    pub fn build(&self, snapshot: &Snapshot) -> Frame {
        self.build_with(snapshot, severity::classify)
    }

    /// Same snapshot and classifier always give the same frame.
    pub fn build_with<F>(&self, snapshot: &Snapshot, classify: F) -> Frame
    where
        F: Fn(MetricKind, f64) -> SeverityBand,
    {
        let rows = RowFactory { classify: &classify };
        match self.profile {
            LayoutProfile::Plain => monitor_frame(self.profile, plain_rows(snapshot, &rows)),
            LayoutProfile::Bars => monitor_frame(self.profile, bar_rows(snapshot, &rows)),
            LayoutProfile::ControlPanel => control_frame(snapshot, &rows),
        }
    }

    /// Stand-in frame for a tick whose capture failed: same layout, every
    /// metric marked unavailable.
    pub fn degraded(&self, reason: &str) -> Frame {
        let unavailable = |label: &str| Row::new(label).with_text(UNAVAILABLE, Tone::Muted);
        let reason_row = Row::nested("Reason").with_text(reason, Tone::Muted);
        match self.profile {
            LayoutProfile::Plain | LayoutProfile::Bars => monitor_frame(
                self.profile,
                vec![
                    unavailable("CPU Usage"),
                    unavailable("RAM Usage"),
                    unavailable("Battery"),
                    Row::spacer(),
                    reason_row,
                ],
            ),
            LayoutProfile::ControlPanel => Frame {
                profile: self.profile,
                title: CONTROL_TITLE.to_string(),
                subtitle: None,
                arrangement: Arrangement::SideBySide,
                panels: vec![
                    Panel {
                        title: LEFT_PANEL.to_string(),
                        rows: vec![
                            unavailable("CPU Overall"),
                            unavailable("RAM Usage"),
                            unavailable("Disk Usage"),
                            Row::spacer(),
                            reason_row,
                        ],
                    },
                    Panel {
                        title: RIGHT_PANEL.to_string(),
                        rows: vec![
                            unavailable("Network I/O"),
                            unavailable("Battery"),
                            unavailable("Temperatures"),
                        ],
                    },
                ],
                footer: control_footer(),
            },
        }
    }
}

struct RowFactory<'a, F> {
    classify: &'a F,
}

impl<F> RowFactory<'_, F>
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    fn band(&self, kind: MetricKind, value: f32) -> SeverityBand {
        (self.classify)(kind, f64::from(value))
    }

    /// Value and status word, no bar.
    fn status(&self, label: &str, kind: MetricKind, value: f32, detail: Option<String>) -> Row {
        let band = self.band(kind, value);
        let mut text = format!("{value:5.1}% {}", band.label());
        if let Some(detail) = detail {
            text.push_str(&format!(" ({detail})"));
        }
        Row::new(label).with_text(text, Tone::Band(band))
    }

    fn gauge(&self, row: Row, kind: MetricKind, value: f32, width: u16) -> Row {
        let band = self.band(kind, value);
        row.with_gauge(Gauge { value, width, band })
            .with_text(format!("{value:5.1}%"), Tone::Band(band))
    }

    fn temperature(&self, label: &str, kind: MetricKind, celsius: Option<f32>) -> Row {
        match celsius {
            Some(c) => Row::nested(label).with_text(format!("{c:.1}°C"), Tone::Band(self.band(kind, c))),
            None => Row::nested(label).with_text(NOT_AVAILABLE, Tone::Muted),
        }
    }
}

fn monitor_frame(profile: LayoutProfile, rows: Vec<Row>) -> Frame {
    Frame {
        profile,
        title: MONITOR_TITLE.to_string(),
        subtitle: None,
        arrangement: Arrangement::Stacked,
        panels: vec![Panel {
            title: METRICS_PANEL.to_string(),
            rows,
        }],
        footer: EXIT_HINT.to_string(),
    }
}

fn control_footer() -> String {
    format!("System Monitor Active | {EXIT_HINT}")
}

fn memory_detail(memory: &Usage) -> String {
    format_used_total(memory.used_bytes, memory.total_bytes, 2)
}

fn charging_word(battery: &BatteryReading) -> &'static str {
    if battery.is_charging {
        "Charging"
    } else {
        "Discharging"
    }
}

fn plain_rows<F>(snapshot: &Snapshot, rows: &RowFactory<'_, F>) -> Vec<Row>
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    let battery = match &snapshot.battery {
        Some(b) => rows.status(
            "Battery",
            MetricKind::BatteryLevel,
            b.percent,
            Some(charging_word(b).to_string()),
        ),
        None => Row::new("Battery").with_text(format!("{NOT_AVAILABLE} ({NO_BATTERY})"), Tone::Muted),
    };
    vec![
        rows.status("CPU Usage", MetricKind::Cpu, snapshot.cpu_overall_percent, None),
        rows.status(
            "RAM Usage",
            MetricKind::Memory,
            snapshot.memory.percent,
            Some(memory_detail(&snapshot.memory)),
        ),
        battery,
    ]
}

fn bar_rows<F>(snapshot: &Snapshot, rows: &RowFactory<'_, F>) -> Vec<Row>
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    let mut out = vec![
        rows.gauge(
            Row::new("CPU Usage"),
            MetricKind::Cpu,
            snapshot.cpu_overall_percent,
            BAR_WIDTH,
        ),
        rows.gauge(
            Row::new("RAM Usage"),
            MetricKind::Memory,
            snapshot.memory.percent,
            BAR_WIDTH,
        ),
        Row::nested("Details").with_text(memory_detail(&snapshot.memory), Tone::Plain),
    ];
    match &snapshot.battery {
        Some(b) => {
            out.push(rows.gauge(
                Row::new("Battery"),
                MetricKind::BatteryLevel,
                b.percent,
                BAR_WIDTH,
            ));
            out.push(Row::nested("Status").with_text(charging_word(b), Tone::Status));
        }
        None => out.push(
            Row::new("Battery").with_text(format!("{NOT_AVAILABLE} - {NO_BATTERY}"), Tone::Muted),
        ),
    }
    out
}

fn control_frame<F>(snapshot: &Snapshot, rows: &RowFactory<'_, F>) -> Frame
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    Frame {
        profile: LayoutProfile::ControlPanel,
        title: CONTROL_TITLE.to_string(),
        subtitle: Some(snapshot.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
        arrangement: Arrangement::SideBySide,
        panels: vec![
            Panel {
                title: LEFT_PANEL.to_string(),
                rows: processor_rows(snapshot, rows),
            },
            Panel {
                title: RIGHT_PANEL.to_string(),
                rows: power_rows(snapshot, rows),
            },
        ],
        footer: control_footer(),
    }
}

fn processor_rows<F>(snapshot: &Snapshot, rows: &RowFactory<'_, F>) -> Vec<Row>
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    let mut out = vec![
        rows.gauge(
            Row::heading("CPU Overall"),
            MetricKind::Cpu,
            snapshot.cpu_overall_percent,
            CONTROL_GAUGE_WIDTH,
        ),
        Row::spacer(),
    ];

    let cores = &snapshot.cpu_per_core_percent;
    for (i, &core) in cores.iter().take(MAX_DISPLAYED_CORES).enumerate() {
        out.push(rows.gauge(
            Row::nested(format!("Core {}", i + 1)),
            MetricKind::Cpu,
            core,
            CONTROL_DETAIL_GAUGE_WIDTH,
        ));
    }
    if cores.len() > MAX_DISPLAYED_CORES {
        out.push(Row::nested("").with_text(
            format!("... and {} more cores", cores.len() - MAX_DISPLAYED_CORES),
            Tone::Muted,
        ));
    }
    out.push(Row::spacer());

    out.push(rows.gauge(
        Row::heading("RAM Usage"),
        MetricKind::Memory,
        snapshot.memory.percent,
        CONTROL_GAUGE_WIDTH,
    ));
    out.push(Row::nested("Details").with_text(memory_detail(&snapshot.memory), Tone::Plain));
    out.push(Row::spacer());

    match &snapshot.disk {
        Some(disk) => {
            out.push(rows.gauge(
                Row::heading("Disk Usage"),
                MetricKind::Disk,
                disk.percent,
                CONTROL_GAUGE_WIDTH,
            ));
            out.push(Row::nested("Details").with_text(
                format_used_total(disk.used_bytes, disk.total_bytes, 1),
                Tone::Plain,
            ));
        }
        None => out.push(Row::heading("Disk Usage").with_text(NOT_AVAILABLE, Tone::Muted)),
    }
    out
}

fn power_rows<F>(snapshot: &Snapshot, rows: &RowFactory<'_, F>) -> Vec<Row>
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    let mut out = vec![Row::heading("Network I/O")];
    match &snapshot.network {
        Some(net) => {
            out.push(Row::nested("Bytes Sent").with_text(format_bytes(net.bytes_sent), Tone::Sent));
            out.push(
                Row::nested("Bytes Recv").with_text(format_bytes(net.bytes_received), Tone::Received),
            );
        }
        None => {
            out.push(Row::nested("Bytes Sent").with_text(NOT_AVAILABLE, Tone::Muted));
            out.push(Row::nested("Bytes Recv").with_text(NOT_AVAILABLE, Tone::Muted));
        }
    }
    out.push(Row::spacer());

    out.push(Row::heading("Battery"));
    match &snapshot.battery {
        Some(b) => {
            out.push(rows.gauge(
                Row::nested("Level"),
                MetricKind::BatteryLevel,
                b.percent,
                CONTROL_DETAIL_GAUGE_WIDTH,
            ));
            let status = if b.is_charging { "CHARGING" } else { "ON BATTERY" };
            out.push(Row::nested("Status").with_text(status, Tone::Status));
        }
        None => out.push(Row::nested("Status").with_text(NO_BATTERY, Tone::Muted)),
    }
    out.push(Row::spacer());

    let temps = snapshot.temperature.unwrap_or_default();
    out.push(Row::heading("Temperatures"));
    out.extend(temperature_rows(&temps, rows));
    out
}

fn temperature_rows<F>(temps: &Temperatures, rows: &RowFactory<'_, F>) -> [Row; 2]
where
    F: Fn(MetricKind, f64) -> SeverityBand,
{
    [
        rows.temperature("CPU Temp", MetricKind::CpuTemperature, temps.cpu_celsius),
        rows.temperature(
            "Battery Temp",
            MetricKind::BatteryTemperature,
            temps.battery_celsius,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::system::snapshot::NetworkTotals;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn snapshot() -> Snapshot {
        Snapshot {
            cpu_overall_percent: 42.0,
            cpu_per_core_percent: vec![10.0, 90.0],
            memory: Usage::from_bytes(6 * GIB, 8 * GIB),
            disk: Some(Usage::from_bytes(50 * GIB, 100 * GIB)),
            network: Some(NetworkTotals {
                bytes_sent: 1536,
                bytes_received: 1024u64.pow(4),
            }),
            battery: Some(BatteryReading {
                percent: 15.0,
                is_charging: false,
            }),
            temperature: Some(Temperatures {
                cpu_celsius: Some(72.5),
                battery_celsius: None,
            }),
            timestamp: Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn plain_rows_carry_value_and_status_only() {
        let frame = FrameBuilder::new(LayoutProfile::Plain).build(&snapshot());
        assert_eq!(frame.panels.len(), 1);
        let cpu = frame.row("CPU Usage").unwrap();
        assert!(cpu.gauge.is_none());
        assert_eq!(cpu.text.as_ref().unwrap().content, " 42.0% OK");
        let ram = frame.row("RAM Usage").unwrap();
        assert_eq!(
            ram.text.as_ref().unwrap().content,
            " 75.0% WARNING (6.00GB / 8.00GB)"
        );
        let battery = frame.row("Battery").unwrap();
        assert_eq!(
            battery.text.as_ref().unwrap().tone,
            Tone::Band(SeverityBand::Critical)
        );
        assert!(frame.panels.iter().flat_map(|p| &p.rows).all(|r| r.gauge.is_none()));
    }

    #[test]
    fn bars_use_fifty_unit_gauges() {
        let frame = FrameBuilder::new(LayoutProfile::Bars).build(&snapshot());
        let cpu = frame.row("CPU Usage").unwrap().gauge.unwrap();
        assert_eq!(cpu.width, BAR_WIDTH);
        assert_eq!(cpu.filled_units(), 21);
        assert_eq!(cpu.band, SeverityBand::Normal);
        let status = frame.row("Status").unwrap();
        assert_eq!(status.text.as_ref().unwrap().content, "Discharging");
    }

    #[test]
    fn control_panel_splits_into_two_panels() {
        let frame = FrameBuilder::new(LayoutProfile::ControlPanel).build(&snapshot());
        assert_eq!(frame.arrangement, Arrangement::SideBySide);
        assert_eq!(frame.panels.len(), 2);
        assert_eq!(frame.subtitle.as_deref(), Some("2026-03-14 09:26:53"));
        assert_eq!(
            frame.row("Core 2").unwrap().gauge.unwrap().band,
            SeverityBand::Critical
        );
        assert_eq!(
            frame.row("Bytes Sent").unwrap().text.as_ref().unwrap().content,
            "1.50 KB"
        );
        assert_eq!(
            frame.row("Bytes Recv").unwrap().text.as_ref().unwrap().content,
            "1.00 TB"
        );
        assert_eq!(
            frame.row("Details").unwrap().text.as_ref().unwrap().content,
            "6.00GB / 8.00GB"
        );
        let cpu_temp = frame.row("CPU Temp").unwrap().text.clone().unwrap();
        assert_eq!(cpu_temp.content, "72.5°C");
        assert_eq!(cpu_temp.tone, Tone::Band(SeverityBand::Warning));
        let bat_temp = frame.row("Battery Temp").unwrap().text.clone().unwrap();
        assert_eq!(bat_temp.content, "N/A");
    }

    #[test]
    fn cores_beyond_eight_are_summarized() {
        let mut snap = snapshot();
        snap.cpu_per_core_percent = vec![5.0; 12];
        let frame = FrameBuilder::new(LayoutProfile::ControlPanel).build(&snap);
        assert!(frame.row("Core 8").is_some());
        assert!(frame.row("Core 9").is_none());
        let summary = frame.panels[0]
            .rows
            .iter()
            .filter_map(|r| r.text.as_ref())
            .find(|t| t.content.starts_with("..."))
            .unwrap();
        assert_eq!(summary.content, "... and 4 more cores");
        assert_eq!(summary.tone, Tone::Muted);
    }

    #[test]
    fn missing_disk_and_network_render_na() {
        let mut snap = snapshot();
        snap.disk = None;
        snap.network = None;
        let frame = FrameBuilder::new(LayoutProfile::ControlPanel).build(&snap);
        let disk = frame.row("Disk Usage").unwrap();
        assert!(disk.gauge.is_none());
        assert_eq!(disk.text.as_ref().unwrap().content, "N/A");
        assert_eq!(
            frame.row("Bytes Sent").unwrap().text.as_ref().unwrap().content,
            "N/A"
        );
    }

    #[test]
    fn build_is_deterministic() {
        let snap = snapshot();
        for profile in [
            LayoutProfile::Plain,
            LayoutProfile::Bars,
            LayoutProfile::ControlPanel,
        ] {
            let builder = FrameBuilder::new(profile);
            assert_eq!(builder.build(&snap), builder.build(&snap));
        }
    }

    #[test]
    fn custom_classifier_is_honored() {
        let frame = FrameBuilder::new(LayoutProfile::Bars)
            .build_with(&snapshot(), |_, _| SeverityBand::Critical);
        assert_eq!(
            frame.row("RAM Usage").unwrap().gauge.unwrap().band,
            SeverityBand::Critical
        );
    }

    #[test]
    fn degraded_frame_marks_every_metric() {
        let frame = FrameBuilder::new(LayoutProfile::ControlPanel).degraded("memory unavailable");
        for label in ["CPU Overall", "RAM Usage", "Battery", "Temperatures"] {
            let row = frame.row(label).unwrap();
            assert_eq!(row.text.as_ref().unwrap().content, "unavailable");
            assert!(row.gauge.is_none());
        }
        assert_eq!(
            frame.row("Reason").unwrap().text.as_ref().unwrap().content,
            "memory unavailable"
        );
    }
}
