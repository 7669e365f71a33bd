use std::io::Write;

use color_eyre::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::frame::{Frame, Row};
use crate::ui::Renderer;

const RULE_WIDTH: usize = 50;
const LABEL_WIDTH: usize = 14;

/// Plain line rendering of a frame: no colors, gauges drawn with block glyphs.
pub fn render_lines(plan: &Frame) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![rule.clone(), centered(&plan.title)];
    if let Some(subtitle) = &plan.subtitle {
        lines.push(centered(subtitle));
    }
    lines.push(rule.clone());
    lines.push(String::new());

    for panel in &plan.panels {
        lines.push(format!("-- {} --", panel.title));
        lines.extend(panel.rows.iter().map(row_line));
        lines.push(String::new());
    }

    lines.push(rule);
    lines.push(plan.footer.clone());
    lines
}

fn centered(text: &str) -> String {
    format!("{text:^RULE_WIDTH$}").trim_end().to_string()
}

fn row_line(row: &Row) -> String {
    if row.is_spacer() {
        return String::new();
    }
    let indent = if row.nested { "  " } else { "" };
    let label = if row.label.is_empty() {
        indent.to_string()
    } else {
        format!("{indent}{}:", row.label)
    };
    let mut line = format!("{label:<LABEL_WIDTH$}");
    if let Some(gauge) = &row.gauge {
        line.push_str(&"\u{2588}".repeat(usize::from(gauge.filled_units())));
        line.push_str(&"\u{2591}".repeat(usize::from(gauge.unfilled_units())));
        line.push(' ');
    }
    if let Some(text) = &row.text {
        line.push_str(&text.content);
    }
    // Without color the band word is the only severity cue.
    if let Some(gauge) = &row.gauge {
        if !line.ends_with(' ') {
            line.push(' ');
        }
        line.push_str(gauge.band.label());
    }
    line.trim_end().to_string()
}

/// Clears the screen and prints each frame as text.
pub struct TextRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer {
            out,
            clear_screen: true,
        }
    }

    /// Append frames instead of repainting in place.
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn draw(&mut self, plan: &Frame) -> Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in render_lines(plan) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "\n{message}")?;
        self.out.flush()?;
        Ok(())
    }
}
