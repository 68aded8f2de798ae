//! Worksheet panel - paginated table with in-place cell editing
//!
//! Owns presentation state only (cursor position, edit buffer). The table
//! itself lives in `DomainState` and is mutated exclusively through
//! `Action::SetCell`.

use crate::action::Action;
use crate::model::domain::DomainState;
use crate::model::pagination::{PageEntry, PageView, PAGE_SIZE};
use crate::model::row::Field;
use chrono::{DateTime, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Maximum rendered width per column
const MAX_COL_WIDTH: usize = 28;

/// Worksheet table component
pub struct WorksheetComponent {
    /// Cursor row within the current page
    pub cursor_row: usize,
    /// Focused column
    pub cursor_field: Field,
    /// Edit buffer; `Some` while a cell is being edited
    edit_buffer: Option<String>,
}

impl Default for WorksheetComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl WorksheetComponent {
    pub fn new() -> Self {
        Self {
            cursor_row: 0,
            cursor_field: Field::Date,
            edit_buffer: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    /// Reset cursor and abort any edit, e.g. after a wholesale load
    pub fn reset(&mut self) {
        self.cursor_row = 0;
        self.cursor_field = Field::Date;
        self.edit_buffer = None;
    }

    /// Keep the cursor inside the rows visible on the current page
    pub fn clamp_to(&mut self, page_len: usize) {
        if page_len == 0 {
            self.cursor_row = 0;
        } else if self.cursor_row >= page_len {
            self.cursor_row = page_len - 1;
        }
    }

    /// Absolute row index of the cursor for a given 1-based page
    fn absolute_row(&self, current_page: usize) -> usize {
        current_page.saturating_sub(1) * PAGE_SIZE + self.cursor_row
    }

    pub fn handle_key(&mut self, key: KeyEvent, domain: &DomainState) -> Option<Action> {
        let view = PageView::build(domain.worksheet.rows(), domain.current_page);

        if let Some(buffer) = self.edit_buffer.as_mut() {
            return match key.code {
                KeyCode::Char(c) => {
                    buffer.push(c);
                    None
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    None
                }
                KeyCode::Enter => {
                    let value = self.edit_buffer.take().unwrap_or_default();
                    Some(Action::SetCell {
                        row: self.absolute_row(view.current_page),
                        field: self.cursor_field,
                        value,
                    })
                }
                KeyCode::Esc => {
                    self.edit_buffer = None;
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor_field = self.cursor_field.prev();
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor_field = self.cursor_field.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor_row + 1 < view.page_items.len() {
                    self.cursor_row += 1;
                }
                None
            }
            KeyCode::Char('[') | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char(']') | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Home => Some(Action::FirstPage),
            KeyCode::End => Some(Action::LastPage),
            KeyCode::Enter => {
                if let Some(row) = view.page_items.get(self.cursor_row) {
                    self.edit_buffer = Some(row.get(self.cursor_field).to_string());
                }
                None
            }
            _ => None,
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, domain: &DomainState, focused: bool) {
        let border_color = if focused { Color::Blue } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Worksheet ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if domain.loading {
            frame.render_widget(Paragraph::new("\n  Loading..."), inner);
            return;
        }

        if domain.worksheet.is_empty() {
            self.draw_empty_state(frame, inner, domain);
            return;
        }

        let view = PageView::build(domain.worksheet.rows(), domain.current_page);
        let mut lines = self.build_table_lines(&view, focused);
        lines.push(Line::from(""));
        lines.push(build_footer_line(&view, domain.worksheet.len()));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_empty_state(&self, frame: &mut Frame, area: Rect, domain: &DomainState) {
        let id_hint = if domain.worksheet_id.is_empty() {
            "No worksheet id configured.".to_string()
        } else {
            format!("Worksheet '{}' has no rows yet.", domain.worksheet_id)
        };

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Nothing here yet",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("  {}", id_hint)),
            Line::from(""),
            Line::from("  Press 'r' to fetch from the backend"),
            Line::from("  Press 'i' to import a local CSV file"),
        ];
        frame.render_widget(Paragraph::new(content), area);
    }

    fn build_table_lines(&self, view: &PageView<'_, crate::model::row::CanonicalRow>, focused: bool) -> Vec<Line<'static>> {
        // Column widths from titles and visible cell content, capped
        let mut widths: Vec<usize> = Field::ALL
            .iter()
            .map(|f| UnicodeWidthStr::width(f.title()))
            .collect();
        for row in view.page_items {
            for (i, field) in Field::ALL.into_iter().enumerate() {
                let text = cell_text(row.get(field), field);
                widths[i] = widths[i].max(UnicodeWidthStr::width(text.as_str()));
            }
        }
        for width in &mut widths {
            *width = (*width).min(MAX_COL_WIDTH);
        }

        let mut lines = Vec::new();

        let header_spans: Vec<Span> = Field::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, f)| {
                vec![
                    Span::styled(
                        pad_to(f.title(), widths[i]),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        for (row_idx, row) in view.page_items.iter().enumerate() {
            let row_spans: Vec<Span> = Field::ALL
                .into_iter()
                .enumerate()
                .flat_map(|(i, field)| {
                    let under_cursor = row_idx == self.cursor_row && field == self.cursor_field;
                    let text = if under_cursor {
                        match &self.edit_buffer {
                            Some(buffer) => format!("{}_", buffer),
                            None => cell_text(row.get(field), field),
                        }
                    } else {
                        cell_text(row.get(field), field)
                    };

                    let style = if under_cursor && focused {
                        if self.edit_buffer.is_some() {
                            Style::default().fg(Color::Black).bg(Color::Yellow)
                        } else {
                            Style::default().fg(Color::Black).bg(Color::Blue)
                        }
                    } else {
                        Style::default().fg(Color::White)
                    };

                    vec![
                        Span::styled(pad_to(&text, widths[i]), style),
                        Span::raw(" │ "),
                    ]
                })
                .collect();
            lines.push(Line::from(row_spans));
        }

        lines
    }
}

/// Cell content as rendered: the Time column gets the short date form
fn cell_text(raw: &str, field: Field) -> String {
    match field {
        Field::Date => display_date(raw),
        _ => raw.to_string(),
    }
}

/// Short "Nov 13" form for recognizable dates; anything else passes
/// through unchanged.
pub fn display_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%b %-d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d").to_string();
    }

    // "4/28/2025" style
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() == 3 {
        if let (Ok(month), Ok(day)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
            if let Some(date) = NaiveDate::from_ymd_opt(2000, month, 1) {
                return format!("{} {}", date.format("%b"), day);
            }
        }
    }

    raw.to_string()
}

fn build_footer_line<T>(view: &PageView<'_, T>, total_rows: usize) -> Line<'static> {
    let mut spans = vec![Span::styled("  ‹ ", Style::default().fg(Color::DarkGray))];

    for entry in &view.page_numbers {
        match entry {
            PageEntry::Page(page) => {
                let style = if *page == view.current_page {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                spans.push(Span::styled(format!(" {} ", page), style));
            }
            PageEntry::Ellipsis => {
                spans.push(Span::styled(" … ", Style::default().fg(Color::DarkGray)));
            }
        }
    }

    spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        format!(
            "  page {} of {} · {} rows",
            view.current_page, view.total_pages, total_rows
        ),
        Style::default().fg(Color::Yellow),
    ));

    Line::from(spans)
}

/// Pad or truncate to an exact display width
fn pad_to(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current <= width {
        return format!("{}{}", text, " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + char_width > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += char_width;
    }
    out.push('…');
    let final_width = UnicodeWidthStr::width(out.as_str());
    format!("{}{}", out, " ".repeat(width.saturating_sub(final_width)))
}
