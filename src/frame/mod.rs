//! Render plans. A [`Frame`] is rebuilt from scratch every tick and holds no
//! reference back to the snapshot it came from.

pub mod builder;

use crate::severity::SeverityBand;

pub use builder::FrameBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutProfile {
    Plain,
    Bars,
    #[default]
    ControlPanel,
}

impl LayoutProfile {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "plain" | "text" | "1" => LayoutProfile::Plain,
            "bars" | "dashboard" | "2" => LayoutProfile::Bars,
            _ => LayoutProfile::ControlPanel,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutProfile::Plain => "plain",
            LayoutProfile::Bars => "bars",
            LayoutProfile::ControlPanel => "control",
        }
    }

    pub fn needs_per_core(self) -> bool {
        matches!(self, LayoutProfile::ControlPanel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Stacked,
    SideBySide,
}

/// Proportional fill bar for a percent value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub value: f32,
    pub width: u16,
    pub band: SeverityBand,
}

impl Gauge {
    pub fn filled_units(&self) -> u16 {
        filled_units(self.value, self.width)
    }

    pub fn unfilled_units(&self) -> u16 {
        self.width - self.filled_units()
    }
}

/// `floor(value / 100 * width)`, clamped to the gauge.
pub fn filled_units(value: f32, width: u16) -> u16 {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) };
    let filled = (f64::from(value) * f64::from(width) / 100.0).floor();
    (filled as u16).min(width)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Band(SeverityBand),
    Sent,
    Received,
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub tone: Tone,
}

impl Text {
    pub fn new(content: impl Into<String>, tone: Tone) -> Self {
        Text {
            content: content.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub label: String,
    pub heading: bool,
    /// Detail row drawn indented under the row above it.
    pub nested: bool,
    pub gauge: Option<Gauge>,
    pub text: Option<Text>,
}

impl Row {
    pub fn new(label: impl Into<String>) -> Self {
        Row {
            label: label.into(),
            ..Row::default()
        }
    }

    pub fn heading(label: impl Into<String>) -> Self {
        Row {
            heading: true,
            ..Row::new(label)
        }
    }

    pub fn nested(label: impl Into<String>) -> Self {
        Row {
            nested: true,
            ..Row::new(label)
        }
    }

    pub fn spacer() -> Self {
        Row::default()
    }

    pub fn with_gauge(mut self, gauge: Gauge) -> Self {
        self.gauge = Some(gauge);
        self
    }

    pub fn with_text(mut self, content: impl Into<String>, tone: Tone) -> Self {
        self.text = Some(Text::new(content, tone));
        self
    }

    pub fn is_spacer(&self) -> bool {
        self.label.is_empty() && self.gauge.is_none() && self.text.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub rows: Vec<Row>,
}

impl Panel {
    /// First row with this exact label.
    pub fn row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.label == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub profile: LayoutProfile,
    pub title: String,
    pub subtitle: Option<String>,
    pub arrangement: Arrangement,
    pub panels: Vec<Panel>,
    pub footer: String,
}

impl Frame {
    /// First row with this label across all panels.
    pub fn row(&self, label: &str) -> Option<&Row> {
        self.panels.iter().find_map(|p| p.row(label))
    }
}
