//! Domain state - business/data state separate from UI concerns

use crate::model::recipient::RecipientRegistry;
use crate::model::table::Worksheet;

/// Identity of the signed-in user, injected at construction rather than
/// read from ambient storage.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_name: String,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            user_name: "User".to_string(),
        }
    }
}

/// Domain state containing all business data
#[derive(Default)]
pub struct DomainState {
    /// The worksheet table
    pub worksheet: Worksheet,

    /// Recipient list for dispatch
    pub recipients: RecipientRegistry,

    /// Current 1-based worksheet page
    pub current_page: usize,

    /// Identifier of the worksheet on the backend
    pub worksheet_id: String,

    /// A worksheet load (fetch or import) is in flight
    pub loading: bool,

    /// A dispatch is in flight
    pub sending: bool,

    /// Who is signed in
    pub session: SessionContext,
}

impl DomainState {
    pub fn new(worksheet_id: String, session: SessionContext) -> Self {
        Self {
            worksheet: Worksheet::new(),
            recipients: RecipientRegistry::new(),
            current_page: 1,
            worksheet_id,
            loading: false,
            sending: false,
            session,
        }
    }
}
