//! Local CSV import dialog
//!
//! The path being typed lives in `Modal::ImportCsv`; the app routes key
//! input into it and this module only draws.

use crate::components::centered_popup;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the import dialog with the path typed so far
pub fn draw_import_dialog(frame: &mut Frame, area: Rect, path: &str) {
    let popup_area = centered_popup(area, 60, 7);
    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Path: "),
            Span::styled(
                format!("{}_", path),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Import  "),
            Span::styled(" Esc ", Style::default().fg(Color::Red)),
            Span::raw("Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Import CSV ")
            .title_style(
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(paragraph, popup_area);
}
