//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Business/data state (worksheet, recipients, paging)
//! - `Worksheet` - The canonical table and its single mutation path
//! - `ModalStack` - Modal overlay management

pub mod domain;
pub mod modal;
pub mod pagination;
pub mod recipient;
pub mod row;
pub mod table;

// Re-export commonly used types
pub use domain::{DomainState, SessionContext};
pub use modal::{Modal, ModalStack};
pub use pagination::{PageEntry, PageView, PAGE_SIZE};
pub use recipient::{AddOutcome, AddReport, Recipient, RecipientRegistry};
pub use row::{CanonicalRow, Field};
pub use table::{TableError, Worksheet};
