//! Help dialog listing the keyboard shortcuts

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Keyboard shortcut reference
pub struct HelpDialog;

impl Default for HelpDialog {
    fn default() -> Self {
        Self
    }
}

fn shortcut(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<10}", key),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, 20);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            shortcut("Tab", "Switch between worksheet and recipients"),
            shortcut("r", "Re-fetch the worksheet from the backend"),
            shortcut("i", "Import a local CSV file"),
            Line::from(""),
            shortcut("h/l ←/→", "Move between columns"),
            shortcut("j/k ↑/↓", "Move between rows"),
            shortcut("[ / ]", "Previous / next page"),
            shortcut("Home/End", "First / last page"),
            shortcut("Enter", "Edit the focused cell (Enter saves, Esc cancels)"),
            Line::from(""),
            shortcut("e", "Type recipient emails (comma separated)"),
            shortcut("Space", "Toggle the highlighted recipient"),
            shortcut("x", "Remove the highlighted recipient"),
            shortcut("s", "Send the worksheet to selected recipients"),
            Line::from(""),
            shortcut("q", "Quit"),
            shortcut("Esc", "Close this dialog"),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
