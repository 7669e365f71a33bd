pub mod dashboard;
pub mod terminal;
pub mod text;
pub mod theme;

use color_eyre::Result;

use crate::frame::Frame;

/// Paints frames. Called once per tick from the refresh loop; a slow
/// renderer stalls the loop.
pub trait Renderer {
    fn draw(&mut self, plan: &Frame) -> Result<()>;

    /// One-shot message after the last frame.
    fn finish(&mut self, message: &str) -> Result<()>;
}

#[cfg(test)]
mod tests;
