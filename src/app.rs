//! Root application component
//!
//! The App coordinates between components and processes Actions. It is
//! intentionally lean - business logic lives in `model/` and `services/`,
//! and the App wires Actions to them.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_import_dialog, HelpDialog, QuitDialog, RecipientsComponent,
    WorksheetComponent,
};
use crate::config::Config;
use crate::model::domain::{DomainState, SessionContext};
use crate::model::modal::{Modal, ModalStack};
use crate::model::pagination::{clamp_page, total_pages, PageView, PAGE_SIZE};
use crate::model::recipient::{AddOutcome, Recipient};
use crate::services;
use crate::services::dispatch::{DispatchAck, DispatchError};
use crate::services::fetch::FetchError;
use crate::services::runner::TaskRunner;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

/// Which panel receives worksheet/recipient keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Worksheet,
    Recipients,
}

/// Result of a background worksheet load
pub enum LoadResult {
    Fetched(Result<String, FetchError>),
    Imported(Result<String, std::io::Error>),
}

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Focused panel
    pub focus: Focus,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message shown in the bottom line
    pub status_message: Option<String>,

    /// Background loader for fetch and import; token-guarded so a stale
    /// response can never overwrite a newer load
    loader: TaskRunner<LoadResult>,

    /// Background dispatcher
    mailer: TaskRunner<Result<DispatchAck, DispatchError>>,

    /// Shared HTTP client
    client: reqwest::blocking::Client,

    /// Effective configuration
    pub config: Config,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub worksheet_panel: WorksheetComponent,
    pub recipients_panel: RecipientsComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(config: Config, worksheet_id: String) -> Result<App> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let session = SessionContext {
            user_name: config.user_name.clone(),
        };

        Ok(App {
            domain: DomainState::new(worksheet_id, session),
            modals: ModalStack::new(),
            focus: Focus::Worksheet,
            should_quit: false,
            status_message: None,
            loader: TaskRunner::new(),
            mailer: TaskRunner::new(),
            client,
            config,
            worksheet_panel: WorksheetComponent::new(),
            recipients_panel: RecipientsComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handling
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // The top modal captures all input
        if let Some(modal) = self.modals.top_mut() {
            return match modal {
                Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
                Modal::Help => self.help_dialog.handle_key_event(key),
                Modal::ImportCsv { path } => {
                    let action = match key.code {
                        KeyCode::Char(c) => {
                            path.push(c);
                            None
                        }
                        KeyCode::Backspace => {
                            path.pop();
                            None
                        }
                        KeyCode::Enter => {
                            let path = path.clone();
                            Some(Action::ImportWorksheet(path))
                        }
                        KeyCode::Esc => Some(Action::CloseModal),
                        _ => None,
                    };
                    Ok(action)
                }
            };
        }

        // While typing into a panel, keys belong to that panel alone
        if self.worksheet_panel.is_editing() {
            return Ok(self.worksheet_panel.handle_key(key, &self.domain));
        }
        if self.recipients_panel.input_mode {
            return Ok(self.recipients_panel.handle_key(key, &self.domain));
        }

        // Global shortcuts
        let global = match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Tab => Some(Action::FocusNextPanel),
            KeyCode::Char('r') => Some(Action::FetchWorksheet),
            KeyCode::Char('i') => Some(Action::OpenImportDialog),
            _ => None,
        };
        if global.is_some() {
            return Ok(global);
        }

        let action = match self.focus {
            Focus::Worksheet => self.worksheet_panel.handle_key(key, &self.domain),
            Focus::Recipients => self.recipients_panel.handle_key(key, &self.domain),
        };
        Ok(action)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action Processing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.poll_background();
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => self.modals.push(Modal::Help),
            Action::OpenImportDialog => self.modals.push(Modal::ImportCsv {
                path: String::new(),
            }),
            Action::CloseModal => {
                self.modals.pop();
            }

            Action::FocusNextPanel => {
                self.focus = match self.focus {
                    Focus::Worksheet => Focus::Recipients,
                    Focus::Recipients => Focus::Worksheet,
                };
            }

            Action::NextPage => self.change_page(|page| page.saturating_add(1)),
            Action::PrevPage => self.change_page(|page| page.saturating_sub(1)),
            Action::FirstPage => self.change_page(|_| 1),
            Action::LastPage => self.change_page(|_| usize::MAX),

            Action::SetCell { row, field, value } => {
                // Out of range here means pagination math and the store
                // disagree; that is a bug, so it propagates instead of
                // becoming a status message.
                self.domain.worksheet.set_cell(row, field, value)?;
            }

            Action::FetchWorksheet => self.start_fetch(),
            Action::ImportWorksheet(path) => {
                self.modals.pop();
                self.start_import(path);
            }

            Action::AddRecipients(text) => {
                let reports = self.domain.recipients.add_from_text(&text);
                self.status_message = Some(summarize_add(&reports));
                self.recipients_panel.clamp_cursor(self.domain.recipients.len());
            }
            Action::ToggleRecipient(email) => {
                self.domain.recipients.toggle_selected(&email);
            }
            Action::RemoveRecipient(email) => {
                self.domain.recipients.remove(&email);
                self.recipients_panel.clamp_cursor(self.domain.recipients.len());
            }
            Action::SendWorksheet => self.start_send(),
        }

        Ok(None)
    }

    fn change_page(&mut self, next: impl FnOnce(usize) -> usize) {
        let total = total_pages(self.domain.worksheet.len(), PAGE_SIZE);
        self.domain.current_page = clamp_page(next(self.domain.current_page), total);
        let view = PageView::build(self.domain.worksheet.rows(), self.domain.current_page);
        self.worksheet_panel.clamp_to(view.page_items.len());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background Work
    // ─────────────────────────────────────────────────────────────────────────

    fn start_fetch(&mut self) {
        if self.domain.worksheet_id.is_empty() {
            self.status_message =
                Some("No worksheet id; pass one on the command line".to_string());
            return;
        }

        self.domain.loading = true;
        self.status_message = Some(format!("Fetching worksheet '{}'...", self.domain.worksheet_id));

        let client = self.client.clone();
        let backend = self.config.backend_url.clone();
        let id = self.domain.worksheet_id.clone();
        self.loader
            .spawn(move || LoadResult::Fetched(services::fetch_csv(&client, &backend, &id)));
    }

    fn start_import(&mut self, path: String) {
        self.domain.loading = true;
        self.status_message = Some(format!("Importing '{}'...", path));

        self.loader
            .spawn(move || LoadResult::Imported(std::fs::read_to_string(&path)));
    }

    fn start_send(&mut self) {
        if self.domain.sending {
            self.status_message = Some("A send is already in flight".to_string());
            return;
        }

        // Precondition failures are user-correctable; surface them without
        // touching the network.
        let selected: Vec<Recipient> = self
            .domain
            .recipients
            .selected()
            .into_iter()
            .cloned()
            .collect();
        if selected.is_empty() {
            self.status_message = Some(DispatchError::NoRecipientsSelected.to_string());
            return;
        }
        if self.domain.worksheet.is_empty() {
            self.status_message = Some(DispatchError::EmptyWorksheet.to_string());
            return;
        }

        self.domain.sending = true;
        self.status_message = Some(format!("Sending to {} recipient(s)...", selected.len()));

        let client = self.client.clone();
        let backend = self.config.backend_url.clone();
        let worksheet = self.domain.worksheet.clone();
        self.mailer
            .spawn(move || services::send(&client, &backend, &worksheet, &selected));
    }

    fn poll_background(&mut self) {
        if let Some(result) = self.loader.poll() {
            self.apply_load_result(result);
        }
        if let Some(result) = self.mailer.poll() {
            self.apply_send_result(result);
        }
    }

    fn apply_load_result(&mut self, result: LoadResult) {
        self.domain.loading = false;

        let text = match result {
            LoadResult::Fetched(Ok(text)) | LoadResult::Imported(Ok(text)) => text,
            LoadResult::Fetched(Err(e)) => {
                // No data from the backend; show the empty state
                self.domain.worksheet.load(Vec::new());
                self.reset_view();
                self.status_message = Some(format!("Fetch failed: {}", e));
                return;
            }
            LoadResult::Imported(Err(e)) => {
                // The current table stays untouched on a failed import
                self.status_message = Some(format!("Import failed: {}", e));
                return;
            }
        };

        match services::normalize(&text) {
            Ok(rows) => {
                self.status_message = Some(format!("Loaded {} row(s)", rows.len()));
                self.domain.worksheet.load(rows);
                self.reset_view();
            }
            Err(e) => {
                self.domain.worksheet.load(Vec::new());
                self.reset_view();
                self.status_message = Some(format!("Could not parse CSV: {}", e));
            }
        }
    }

    fn apply_send_result(&mut self, result: Result<DispatchAck, DispatchError>) {
        self.domain.sending = false;
        self.status_message = Some(match result {
            Ok(DispatchAck::Json(body)) => format!("Worksheet sent ({})", body),
            Ok(DispatchAck::Accepted) => "Worksheet sent".to_string(),
            Err(e) => format!("Send failed: {} - press 's' to retry", e),
        });
    }

    fn reset_view(&mut self) {
        self.domain.current_page = 1;
        self.worksheet_panel.reset();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);

        self.draw_header(frame, layout.header);
        self.worksheet_panel.draw(
            frame,
            layout.worksheet,
            &self.domain,
            self.focus == Focus::Worksheet && self.modals.is_empty(),
        );
        self.recipients_panel.draw(
            frame,
            layout.recipients,
            &self.domain,
            self.focus == Focus::Recipients && self.modals.is_empty(),
        );
        self.draw_status(frame, layout.status);

        if let Some(modal) = self.modals.top() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
                Modal::ImportCsv { path } => {
                    let path = path.clone();
                    draw_import_dialog(frame, area, &path);
                }
            }
        }

        Ok(())
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" Welcome, {}", self.domain.session.user_name),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Track, manage and forecast your worklogs.",
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.domain.worksheet_id.is_empty() {
            spans.push(Span::styled(
                format!("  [{}]", self.domain.worksheet_id),
                Style::default().fg(Color::Yellow),
            ));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(paragraph, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let text = match &self.status_message {
            Some(message) => message.clone(),
            None => "Tab panels · r fetch · i import · ? help · q quit".to_string(),
        };
        let paragraph =
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(Color::Gray))));
        frame.render_widget(paragraph, area);
    }
}

fn summarize_add(reports: &[crate::model::recipient::AddReport]) -> String {
    let added = reports
        .iter()
        .filter(|r| r.outcome == AddOutcome::Added)
        .count();
    let duplicates = reports
        .iter()
        .filter(|r| r.outcome == AddOutcome::Duplicate)
        .count();
    let invalid = reports
        .iter()
        .filter(|r| r.outcome == AddOutcome::Invalid)
        .count();

    let mut parts = vec![format!("Added {} recipient(s)", added)];
    if duplicates > 0 {
        parts.push(format!("{} duplicate(s) skipped", duplicates));
    }
    if invalid > 0 {
        parts.push(format!("{} invalid skipped", invalid));
    }
    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::{CanonicalRow, Field};

    fn test_app() -> App {
        let config = Config {
            backend_url: "http://127.0.0.1:1".to_string(),
            user_name: "Tester".to_string(),
            default_worksheet_id: String::new(),
        };
        App::new(config, "ws-1".to_string()).expect("app builds")
    }

    fn rows(count: usize) -> Vec<CanonicalRow> {
        (0..count)
            .map(|i| CanonicalRow {
                description: format!("row {}", i),
                ..CanonicalRow::default()
            })
            .collect()
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(20)); // 3 pages

        app.update(Action::NextPage).unwrap();
        assert_eq!(app.domain.current_page, 2);
        app.update(Action::LastPage).unwrap();
        assert_eq!(app.domain.current_page, 3);
        app.update(Action::NextPage).unwrap();
        assert_eq!(app.domain.current_page, 3);
        app.update(Action::FirstPage).unwrap();
        assert_eq!(app.domain.current_page, 1);
        app.update(Action::PrevPage).unwrap();
        assert_eq!(app.domain.current_page, 1);
    }

    #[test]
    fn test_set_cell_action_mutates_table() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(3));

        app.update(Action::SetCell {
            row: 2,
            field: Field::TimeStamp,
            value: "2h".to_string(),
        })
        .unwrap();

        assert_eq!(app.domain.worksheet.rows()[2].time_stamp, "2h");
    }

    #[test]
    fn test_set_cell_out_of_range_is_an_error() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(1));

        let result = app.update(Action::SetCell {
            row: 5,
            field: Field::Date,
            value: "x".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_add_recipients_reports_partial_outcomes() {
        let mut app = test_app();
        app.update(Action::AddRecipients("a@x.com, a@x.com, junk".to_string()))
            .unwrap();

        assert_eq!(app.domain.recipients.len(), 1);
        let status = app.status_message.clone().unwrap_or_default();
        assert!(status.contains("Added 1"));
        assert!(status.contains("1 duplicate(s)"));
        assert!(status.contains("1 invalid"));
    }

    #[test]
    fn test_send_preconditions_block_without_network() {
        let mut app = test_app();

        // Worksheet has rows but nothing is selected
        app.domain.worksheet.load(rows(1));
        app.update(Action::SendWorksheet).unwrap();
        assert!(!app.domain.sending);
        assert_eq!(
            app.status_message.as_deref(),
            Some("no recipients selected")
        );

        // Recipient selected but worksheet empty
        app.domain.worksheet.load(Vec::new());
        app.update(Action::AddRecipients("a@x.com".to_string())).unwrap();
        app.update(Action::ToggleRecipient("a@x.com".to_string())).unwrap();
        app.update(Action::SendWorksheet).unwrap();
        assert!(!app.domain.sending);
        assert_eq!(
            app.status_message.as_deref(),
            Some("the worksheet is empty")
        );
    }

    #[test]
    fn test_successful_load_resets_pagination() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(20));
        app.domain.current_page = 3;

        app.apply_load_result(LoadResult::Fetched(Ok(
            "Date,Author Name,Commit Type,Scope,Description\n2025-04-28,Jane,feat,api,work\n"
                .to_string(),
        )));

        assert_eq!(app.domain.current_page, 1);
        assert_eq!(app.domain.worksheet.len(), 1);
        assert!(!app.domain.loading);
    }

    #[test]
    fn test_failed_fetch_clears_table() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(5));

        app.apply_load_result(LoadResult::Fetched(Err(FetchError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
        })));

        assert!(app.domain.worksheet.is_empty());
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Fetch failed"));
    }

    #[test]
    fn test_failed_import_keeps_table() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(5));

        app.apply_load_result(LoadResult::Imported(Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ))));

        assert_eq!(app.domain.worksheet.len(), 5);
    }

    #[test]
    fn test_unparseable_load_shows_empty_state() {
        let mut app = test_app();
        app.domain.worksheet.load(rows(5));

        app.apply_load_result(LoadResult::Fetched(Ok("   \n".to_string())));

        assert!(app.domain.worksheet.is_empty());
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Could not parse"));
    }
}
