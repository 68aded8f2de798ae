//! UI Components
//!
//! Each component encapsulates its own state, event handling, and
//! rendering logic. Components communicate through Actions rather than
//! direct state mutation.

pub mod help_dialog;
pub mod import_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod recipients;
pub mod worksheet;

pub use help_dialog::HelpDialog;
pub use import_dialog::draw_import_dialog;
pub use layout::{calculate_main_layout, centered_popup, MainLayout};
pub use quit_dialog::QuitDialog;
pub use recipients::RecipientsComponent;
pub use worksheet::WorksheetComponent;
