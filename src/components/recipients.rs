//! Recipient panel - "Sheet It Out"
//!
//! Email entry, the recipient list with selection toggles, and the send
//! trigger. Registry mutations happen in the App via Actions; this
//! component owns only the input buffer and list cursor.

use crate::action::Action;
use crate::model::domain::DomainState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Recipient list panel
pub struct RecipientsComponent {
    /// Email input buffer
    pub input: String,
    /// Whether keystrokes go to the email input
    pub input_mode: bool,
    /// Highlighted recipient index
    pub cursor: usize,
}

impl Default for RecipientsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientsComponent {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            input_mode: false,
            cursor: 0,
        }
    }

    /// Keep the cursor on an existing entry after removals
    pub fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    fn highlighted_email(&self, domain: &DomainState) -> Option<String> {
        domain
            .recipients
            .all()
            .get(self.cursor)
            .map(|r| r.email.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent, domain: &DomainState) -> Option<Action> {
        if self.input_mode {
            return match key.code {
                KeyCode::Char(c) => {
                    self.input.push(c);
                    None
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    None
                }
                KeyCode::Enter => {
                    let text = std::mem::take(&mut self.input);
                    self.input_mode = false;
                    if text.trim().is_empty() {
                        None
                    } else {
                        Some(Action::AddRecipients(text))
                    }
                }
                KeyCode::Esc => {
                    self.input_mode = false;
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('e') | KeyCode::Char('/') => {
                self.input_mode = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < domain.recipients.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Char(' ') => self.highlighted_email(domain).map(Action::ToggleRecipient),
            KeyCode::Char('x') | KeyCode::Delete => {
                self.highlighted_email(domain).map(Action::RemoveRecipient)
            }
            KeyCode::Char('s') => Some(Action::SendWorksheet),
            _ => None,
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, domain: &DomainState, focused: bool) {
        let border_color = if focused { Color::Blue } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Sheet It Out ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();

        let input_display = if self.input_mode {
            Span::styled(
                format!("{}_", self.input),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else if self.input.is_empty() {
            Span::styled(
                "Emails, Comma Separated ('e')",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(self.input.clone())
        };
        lines.push(Line::from(vec![Span::raw(" ✉ "), input_display]));
        lines.push(Line::from(""));

        if domain.recipients.is_empty() {
            lines.push(Line::from(Span::styled(
                " No Recipients Added Yet",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                " Start adding recipients using",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                " the input above.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(" Added Recipients ({})", domain.recipients.len()),
                Style::default().fg(Color::Gray),
            )));
            for (i, recipient) in domain.recipients.all().iter().enumerate() {
                let marker = if recipient.selected { "[x]" } else { "[ ]" };
                let style = if focused && !self.input_mode && i == self.cursor {
                    Style::default().fg(Color::Black).bg(Color::Blue)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!(" {} {} <{}>", marker, recipient.name, recipient.email),
                    style,
                )));
            }
        }

        lines.push(Line::from(""));
        let selected_count = domain.recipients.selected().len();
        let send_line = if domain.sending {
            Span::styled(" Sending...", Style::default().fg(Color::Yellow))
        } else if selected_count == 0 {
            Span::styled(
                " Select recipients, then 's' to send",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::styled(
                format!(" 's' sends to {} recipient(s)", selected_count),
                Style::default().fg(Color::Green),
            )
        };
        lines.push(Line::from(send_line));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::domain::SessionContext;

    fn domain_with_recipients(emails: &str) -> DomainState {
        let mut domain = DomainState::new("ws-1".to_string(), SessionContext::default());
        domain.recipients.add_from_text(emails);
        domain
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_input_mode_collects_text_and_emits_add() {
        let domain = domain_with_recipients("");
        let mut panel = RecipientsComponent::new();

        panel.handle_key(key(KeyCode::Char('e')), &domain);
        assert!(panel.input_mode);

        for c in "a@x.com".chars() {
            panel.handle_key(key(KeyCode::Char(c)), &domain);
        }
        let action = panel.handle_key(key(KeyCode::Enter), &domain);

        assert_eq!(action, Some(Action::AddRecipients("a@x.com".to_string())));
        assert!(!panel.input_mode);
        assert!(panel.input.is_empty());
    }

    #[test]
    fn test_toggle_and_remove_target_highlighted_entry() {
        let domain = domain_with_recipients("a@x.com, b@y.org");
        let mut panel = RecipientsComponent::new();

        panel.handle_key(key(KeyCode::Down), &domain);
        assert_eq!(
            panel.handle_key(key(KeyCode::Char(' ')), &domain),
            Some(Action::ToggleRecipient("b@y.org".to_string()))
        );
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('x')), &domain),
            Some(Action::RemoveRecipient("b@y.org".to_string()))
        );
    }

    #[test]
    fn test_send_shortcut_outside_input_mode_only() {
        let domain = domain_with_recipients("a@x.com");
        let mut panel = RecipientsComponent::new();

        assert_eq!(
            panel.handle_key(key(KeyCode::Char('s')), &domain),
            Some(Action::SendWorksheet)
        );

        panel.handle_key(key(KeyCode::Char('e')), &domain);
        assert!(panel.handle_key(key(KeyCode::Char('s')), &domain).is_none());
        assert_eq!(panel.input, "s");
    }
}
