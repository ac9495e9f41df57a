/// Renderer trait for drawing a game's state using Ratatui
pub trait GameRenderer<State> {
    /// Pure rendering function - no game logic
    fn render(frame: &mut ratatui::Frame, state: &State);
}
