use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::format::truncate_unicode;
use crate::frame::{Arrangement, Frame, LayoutProfile, Panel, Row};
use crate::ui::theme::Theme;

const LABEL_WIDTH: usize = 16;
const FOOTER_HEIGHT: u16 = 3;

/// Paint a render plan into a ratatui frame.
pub fn draw(frame: &mut ratatui::Frame, plan: &Frame, theme: &Theme) {
    let header_height = if plan.subtitle.is_some() { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], plan, theme);
    render_body(frame, chunks[1], plan, theme);
    render_footer(frame, chunks[2], plan, theme);
}

fn render_header(frame: &mut ratatui::Frame, area: Rect, plan: &Frame, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let mut lines = vec![Line::from(Span::styled(
        plan.title.as_str(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &plan.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.as_str(),
            Style::default().fg(theme.text_primary),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_body(frame: &mut ratatui::Frame, area: Rect, plan: &Frame, theme: &Theme) {
    if plan.panels.is_empty() {
        return;
    }
    let direction = match plan.arrangement {
        Arrangement::Stacked => Direction::Vertical,
        Arrangement::SideBySide => Direction::Horizontal,
    };
    let share = 100 / plan.panels.len() as u16;
    let constraints: Vec<Constraint> = plan
        .panels
        .iter()
        .map(|_| Constraint::Percentage(share))
        .collect();
    let areas = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);

    for (panel, panel_area) in plan.panels.iter().zip(areas.iter()) {
        render_panel(frame, *panel_area, panel, plan.profile, theme);
    }
}

fn render_panel(
    frame: &mut ratatui::Frame,
    area: Rect,
    panel: &Panel,
    profile: LayoutProfile,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {} ", panel.title),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));

    let lines: Vec<Line> = panel
        .rows
        .iter()
        .map(|row| row_line(row, profile, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn gauge_glyph(profile: LayoutProfile) -> &'static str {
    match profile {
        LayoutProfile::ControlPanel => "\u{2593}",
        LayoutProfile::Plain | LayoutProfile::Bars => "\u{2588}",
    }
}

fn row_line(row: &Row, profile: LayoutProfile, theme: &Theme) -> Line<'static> {
    if row.is_spacer() {
        return Line::default();
    }

    let indent = if row.nested { "  " } else { "" };
    let label = truncate_unicode(&format!("{indent}{}", row.label), LABEL_WIDTH - 1);
    let mut label_style = Style::default().fg(theme.accent);
    if row.heading || !row.nested {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }
    let mut spans = vec![Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style)];

    if let Some(gauge) = &row.gauge {
        let color = theme.band_color(gauge.band);
        spans.push(Span::styled(
            gauge_glyph(profile).repeat(usize::from(gauge.filled_units())),
            Style::default().fg(color),
        ));
        spans.push(Span::styled(
            "\u{2591}".repeat(usize::from(gauge.unfilled_units())),
            Style::default().fg(color),
        ));
        spans.push(Span::raw(" "));
    }

    if let Some(text) = &row.text {
        spans.push(Span::styled(
            text.content.clone(),
            Style::default().fg(theme.tone_color(text.tone)),
        ));
    }

    Line::from(spans)
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, plan: &Frame, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.text_muted));
    let line = Line::from(Span::styled(
        plan.footer.as_str(),
        Style::default().fg(theme.text_muted),
    ));
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
