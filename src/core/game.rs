/// Core game interface for the terminal engine
use crossterm::event::KeyEvent;

/// What the engine should do after a key has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main game trait that all games must implement
pub trait Game {
    /// Update state in response to a key press
    fn handle_key(&mut self, key: KeyEvent) -> Flow;

    /// Render the current state into the Ratatui Frame
    fn render(&self, frame: &mut ratatui::Frame);
}
