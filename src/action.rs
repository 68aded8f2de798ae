//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::row::Field;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; background tasks are polled here
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open local CSV import dialog
    OpenImportDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Focus & Paging
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch focus between the worksheet and the recipient panel
    FocusNextPanel,
    /// Go to the next worksheet page
    NextPage,
    /// Go to the previous worksheet page
    PrevPage,
    /// Jump to the first worksheet page
    FirstPage,
    /// Jump to the last worksheet page
    LastPage,

    // ─────────────────────────────────────────────────────────────────────────
    // Worksheet
    // ─────────────────────────────────────────────────────────────────────────
    /// Write a value into one cell (absolute row index)
    SetCell {
        row: usize,
        field: Field,
        value: String,
    },
    /// Fetch the worksheet CSV from the backend
    FetchWorksheet,
    /// Import a local CSV file
    ImportWorksheet(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Recipients & Dispatch
    // ─────────────────────────────────────────────────────────────────────────
    /// Parse comma-separated email input into the recipient list
    AddRecipients(String),
    /// Flip a recipient's selection flag
    ToggleRecipient(String),
    /// Remove a recipient
    RemoveRecipient(String),
    /// Send the worksheet to the selected recipients
    SendWorksheet,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenImportDialog => write!(f, "OpenImportDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::FocusNextPanel => write!(f, "FocusNextPanel"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::SetCell { row, field, value } => {
                write!(f, "SetCell({}, {}, {})", row, field.header(), value)
            }
            Action::FetchWorksheet => write!(f, "FetchWorksheet"),
            Action::ImportWorksheet(path) => write!(f, "ImportWorksheet({})", path),
            Action::AddRecipients(text) => write!(f, "AddRecipients({})", text),
            Action::ToggleRecipient(email) => write!(f, "ToggleRecipient({})", email),
            Action::RemoveRecipient(email) => write!(f, "RemoveRecipient({})", email),
            Action::SendWorksheet => write!(f, "SendWorksheet"),
        }
    }
}
