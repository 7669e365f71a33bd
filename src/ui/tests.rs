use chrono::{Local, TimeZone};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Color;

use crate::frame::LayoutProfile;
use crate::frame::builder::FrameBuilder;
use crate::system::snapshot::{NetworkTotals, Snapshot, Usage};
use crate::ui::dashboard;
use crate::ui::theme::Theme;

const GIB: u64 = 1024 * 1024 * 1024;

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_buffer(
    width: u16,
    height: u16,
    profile: LayoutProfile,
    snap: &Snapshot,
) -> ratatui::buffer::Buffer {
    let plan = FrameBuilder::new(profile).build(snap);
    let theme = Theme::default();
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| dashboard::draw(frame, &plan, &theme))
        .unwrap();
    terminal.backend().buffer().clone()
}

fn snapshot(cpu: f32) -> Snapshot {
    Snapshot {
        cpu_overall_percent: cpu,
        cpu_per_core_percent: vec![80.0, 20.0],
        memory: Usage::from_bytes(8 * GIB, 16 * GIB),
        disk: Some(Usage::from_bytes(100 * GIB, 400 * GIB)),
        network: Some(NetworkTotals {
            bytes_sent: 2048,
            bytes_received: 5 * 1024 * 1024,
        }),
        battery: None,
        temperature: None,
        timestamp: Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    }
}

fn line_containing(buf: &ratatui::buffer::Buffer, needle: &str) -> Option<u16> {
    let text = buffer_to_string(buf);
    text.lines()
        .position(|line| line.contains(needle))
        .map(|y| y as u16)
}

#[test]
fn control_panel_cpu_gauge_is_critical_and_42_wide() {
    let buf = render_buffer(220, 30, LayoutProfile::ControlPanel, &snapshot(85.0));
    let y = line_containing(&buf, "CPU Overall").unwrap();

    let filled: Vec<_> = (0..buf.area.width)
        .filter_map(|x| buf.cell((x, y)))
        .filter(|cell| cell.symbol() == "\u{2593}")
        .collect();
    assert_eq!(filled.len(), 42);
    assert!(filled.iter().all(|cell| cell.fg == Color::Red));

    let rendered = buffer_to_string(&buf);
    assert!(rendered.contains("SYSTEM CONTROL PANEL"));
    assert!(rendered.contains("2026-01-02 03:04:05"));
    assert!(rendered.contains(" 85.0%"));
}

#[test]
fn control_panel_shows_missing_sources() {
    let buf = render_buffer(220, 30, LayoutProfile::ControlPanel, &snapshot(10.0));
    let rendered = buffer_to_string(&buf);
    assert!(rendered.contains("No battery detected"));

    let y = line_containing(&buf, "CPU Temp").unwrap();
    let line = rendered.lines().nth(usize::from(y)).unwrap();
    assert!(line.contains("N/A"));
    assert!(rendered.contains("Press Ctrl+C to exit"));
}

#[test]
fn panels_sit_side_by_side() {
    let buf = render_buffer(220, 30, LayoutProfile::ControlPanel, &snapshot(10.0));
    let left = line_containing(&buf, "PROCESSORS & MEMORY").unwrap();
    let right = line_containing(&buf, "NETWORK & POWER").unwrap();
    assert_eq!(left, right);
}

#[test]
fn plain_profile_has_no_gauges() {
    let buf = render_buffer(60, 12, LayoutProfile::Plain, &snapshot(42.0));
    let rendered = buffer_to_string(&buf);
    assert!(rendered.contains("SYSTEM MONITOR"));
    assert!(rendered.contains(" 42.0% OK"));
    assert!(rendered.contains(" 50.0% OK (8.00GB / 16.00GB)"));
    assert!(!rendered.contains('\u{2588}'));
}

#[test]
fn bars_profile_stacks_one_panel() {
    let buf = render_buffer(90, 16, LayoutProfile::Bars, &snapshot(50.0));
    let y = line_containing(&buf, "CPU Usage").unwrap();
    let filled = (0..buf.area.width)
        .filter_map(|x| buf.cell((x, y)))
        .filter(|cell| cell.symbol() == "\u{2588}")
        .count();
    assert_eq!(filled, 25);
    let rendered = buffer_to_string(&buf);
    assert!(rendered.contains("N/A - No battery detected"));
}

