use color_eyre::Result;
use ratatui::DefaultTerminal;

use crate::frame::Frame;
use crate::ui::Renderer;
use crate::ui::dashboard;
use crate::ui::theme::Theme;

/// Full-screen ratatui renderer. Owns the terminal between `init` and
/// `finish`; dropping it unfinished still restores the terminal.
pub struct TerminalRenderer {
    terminal: DefaultTerminal,
    theme: Theme,
    restored: bool,
}

impl TerminalRenderer {
    pub fn init(theme: Theme) -> Self {
        TerminalRenderer {
            terminal: ratatui::init(),
            theme,
            restored: false,
        }
    }

    fn restore(&mut self) {
        if !self.restored {
            ratatui::restore();
            self.restored = true;
        }
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, plan: &Frame) -> Result<()> {
        let theme = &self.theme;
        self.terminal
            .draw(|frame| dashboard::draw(frame, plan, theme))?;
        Ok(())
    }

    fn finish(&mut self, message: &str) -> Result<()> {
        self.restore();
        println!("{message}");
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        self.restore();
    }
}
