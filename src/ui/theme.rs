use ratatui::style::Color;
use ratatui::widgets::BorderType;

use crate::frame::Tone;
use crate::severity::SeverityBand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Color,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mono" | "monochrome" | "none" => ColorSupport::Mono,
            "color" | "256" | "truecolor" | "24bit" => ColorSupport::Color,
            _ => ColorSupport::Auto,
        }
    }
}

/// `NO_COLOR` (any value) turns colors off; otherwise colors are on.
pub fn resolve_color_support(config: &str) -> ColorSupport {
    match ColorSupport::from_config_str(config) {
        ColorSupport::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                ColorSupport::Mono
            } else {
                ColorSupport::Color
            }
        }
        explicit => explicit,
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub normal: Color,
    pub warning: Color,
    pub critical: Color,
    pub accent: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub sent: Color,
    pub received: Color,
    pub status: Color,
    pub border: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            normal: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            accent: Color::Cyan,
            text_primary: Color::White,
            text_muted: Color::DarkGray,
            sent: Color::Green,
            received: Color::Blue,
            status: Color::Yellow,
            border: Color::Cyan,
            border_type: BorderType::Double,
        }
    }
}

impl Theme {
    pub fn mono() -> Self {
        Theme {
            normal: Color::Reset,
            warning: Color::Reset,
            critical: Color::Reset,
            accent: Color::Reset,
            text_primary: Color::Reset,
            text_muted: Color::Reset,
            sent: Color::Reset,
            received: Color::Reset,
            status: Color::Reset,
            border: Color::Reset,
            border_type: BorderType::Plain,
        }
    }

    pub fn for_support(support: ColorSupport) -> Self {
        match support {
            ColorSupport::Mono => Theme::mono(),
            ColorSupport::Auto | ColorSupport::Color => Theme::default(),
        }
    }

    pub fn band_color(&self, band: SeverityBand) -> Color {
        match band {
            SeverityBand::Normal => self.normal,
            SeverityBand::Warning => self.warning,
            SeverityBand::Critical => self.critical,
        }
    }

    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Plain => self.text_primary,
            Tone::Muted => self.text_muted,
            Tone::Band(band) => self.band_color(band),
            Tone::Sent => self.sent,
            Tone::Received => self.received,
            Tone::Status => self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_map_to_traffic_light() {
        let theme = Theme::default();
        assert_eq!(theme.band_color(SeverityBand::Normal), Color::Green);
        assert_eq!(theme.band_color(SeverityBand::Warning), Color::Yellow);
        assert_eq!(theme.band_color(SeverityBand::Critical), Color::Red);
        assert_eq!(theme.tone_color(Tone::Muted), Color::DarkGray);
    }

    #[test]
    fn mono_theme_has_no_colors() {
        let theme = Theme::for_support(ColorSupport::Mono);
        assert_eq!(theme.band_color(SeverityBand::Critical), Color::Reset);
    }

    #[test]
    fn color_support_from_config() {
        assert_eq!(ColorSupport::from_config_str("MONO"), ColorSupport::Mono);
        assert_eq!(ColorSupport::from_config_str("truecolor"), ColorSupport::Color);
        assert_eq!(ColorSupport::from_config_str(""), ColorSupport::Auto);
        assert_eq!(resolve_color_support("mono"), ColorSupport::Mono);
    }
}
