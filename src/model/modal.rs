//! Modal stack for managing overlays
//!
//! An enum-based stack instead of one boolean flag per dialog. Modals are
//! rendered bottom to top; only the top modal receives input.

/// Overlays that can sit on top of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Local CSV import dialog with the path being typed
    ImportCsv { path: String },
    /// Keyboard shortcut reference
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::ImportCsv {
            path: String::new(),
        });

        if let Some(Modal::ImportCsv { path }) = stack.top_mut() {
            path.push_str("worklog.csv");
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::ImportCsv {
                path: "worklog.csv".to_string()
            })
        );
    }
}
