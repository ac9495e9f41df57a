use super::controller::{HigherLowerView, MSG_GAME_OVER};
use super::dice::Roll;
use super::model::{Prediction, RoundRecord};
use crate::core::renderer::GameRenderer;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    layout::{Alignment, Constraint, Direction, Layout},
};

#[derive(Debug)]
pub struct HigherLowerRenderer;

impl GameRenderer<HigherLowerView> for HigherLowerRenderer {
    fn render(frame: &mut Frame, state: &HigherLowerView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Dice
                Constraint::Length(5), // Balance, pick and bet
                Constraint::Length(3), // Messages
                Constraint::Min(4),    // History
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = Paragraph::new("HIGHER / LOWER")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let dice_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        frame.render_widget(Self::dice_panel("Dealer", state.dealer, state.dealer_total), dice_chunks[0]);
        frame.render_widget(Self::dice_panel("You", state.player, state.player_total), dice_chunks[1]);

        frame.render_widget(Self::controls(state), chunks[2]);
        frame.render_widget(Self::messages(state), chunks[3]);
        frame.render_widget(Self::history_table(&state.history), chunks[4]);

        let help = if state.game_over {
            "n new game | q quit"
        } else if state.can_roll_player {
            "d re-roll dealer | h/l pick | 0-9 bet | Enter roll | q quit"
        } else {
            "d roll dealer | h/l pick | 0-9 bet | q quit"
        };
        let footer = Paragraph::new(help)
            .block(Block::default().borders(Borders::ALL).title("Keys"))
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(footer, chunks[5]);
    }
}

impl HigherLowerRenderer {
    fn dice_panel(title: &str, roll: Option<Roll>, total: u8) -> Paragraph<'static> {
        let faces = match roll {
            Some(r) => format!("[ {} ] [ {} ]", r.dice[0], r.dice[1]),
            None => "[ - ] [ - ]".to_string(),
        };
        let lines = vec![
            Line::from(Span::styled(faces, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(format!("Total: {}", total)),
        ];
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .alignment(Alignment::Center)
    }

    fn controls(state: &HigherLowerView) -> Paragraph<'static> {
        let pick = |p: Prediction| {
            if p == state.prediction {
                Span::styled(format!("[{}]", p), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                Span::raw(format!(" {} ", p))
            }
        };
        let lines = vec![
            Line::from(vec![
                Span::raw("Balance: "),
                Span::styled(state.balance.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("   Round: {}", state.round_number)),
            ]),
            Line::from(vec![Span::raw("Pick: "), pick(Prediction::Higher), Span::raw(" "), pick(Prediction::Lower)]),
            Line::from(format!("Bet: {}_", state.bet_input)),
        ];
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Controls"))
    }

    fn messages(state: &HigherLowerView) -> Paragraph<'static> {
        let mut lines = Vec::new();
        if let Some(err) = &state.error {
            lines.push(Line::from(Span::styled(format!("! {}", err), Style::default().fg(Color::Red))));
        }
        if let Some(outcome) = &state.outcome {
            let color = if outcome.won { Color::Green } else { Color::Red };
            lines.push(Line::from(Span::styled(outcome.text.clone(), Style::default().fg(color))));
        }
        if state.game_over {
            lines.push(Line::from(Span::styled(
                MSG_GAME_OVER,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        Paragraph::new(lines)
    }

    fn history_table(history: &[RoundRecord]) -> Table<'static> {
        let count = history.len();
        let title = format!("History ({} {})", count, if count == 1 { "round" } else { "rounds" });

        let header = Row::new(vec!["#", "Dealer", "You", "Pick", "Result", "Balance"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = history.iter().enumerate().map(|(idx, record)| {
            let (mark, style) = if record.result.is_win() {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("✗", Style::default().fg(Color::Red))
            };
            let row = Row::new(vec![
                Cell::from(record.round_number.to_string()),
                Cell::from(record.dealer_total.to_string()),
                Cell::from(record.player_total.to_string()),
                Cell::from(record.prediction.to_string()),
                Cell::from(mark).style(style),
                Cell::from(record.balance_after.to_string()),
            ]);
            // newest round stands out
            if idx == 0 { row.style(Style::default().add_modifier(Modifier::BOLD)) } else { row }
        });

        Table::new(rows, [Constraint::Length(4), Constraint::Length(7), Constraint::Length(5),
                          Constraint::Length(7), Constraint::Length(7), Constraint::Length(8)])
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
    }
}
