//! Recipient list - validated, deduplicated email recipients
//!
//! Emails are unique case-insensitively, enforced at insertion only.
//! Display names are derived from the email local part once, at insertion,
//! and never recomputed.

use regex::Regex;
use std::sync::LazyLock;

/// RFC-5322-lite validation: dotted-atom or quoted local part, domain with
/// at least one dot or a bracketed IPv4 literal.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is valid")
});

/// A single mail recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
    pub selected: bool,
}

/// Outcome of one entry in an `add_from_text` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
    Invalid,
}

/// Per-entry result of `add_from_text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub email: String,
    pub outcome: AddOutcome,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Derive a display name from the email local part: split on `.`,
/// capitalize each segment, join with spaces.
pub fn derive_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .split('.')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Insertion-ordered set of recipients
#[derive(Debug, Default)]
pub struct RecipientRegistry {
    recipients: Vec<Recipient>,
}

impl RecipientRegistry {
    pub fn new() -> Self {
        Self {
            recipients: Vec::new(),
        }
    }

    /// Parse comma-separated email input. Every non-blank entry gets a
    /// report; invalid and duplicate entries leave the registry untouched.
    pub fn add_from_text(&mut self, text: &str) -> Vec<AddReport> {
        let mut reports = Vec::new();

        for entry in text.split(',') {
            let email = entry.trim();
            if email.is_empty() {
                continue;
            }

            let outcome = if !is_valid_email(email) {
                AddOutcome::Invalid
            } else if self.contains(email) {
                AddOutcome::Duplicate
            } else {
                self.recipients.push(Recipient {
                    name: derive_name(email),
                    email: email.to_string(),
                    selected: false,
                });
                AddOutcome::Added
            };

            reports.push(AddReport {
                email: email.to_string(),
                outcome,
            });
        }

        reports
    }

    /// Remove the matching recipient, case-insensitively. No-op if absent.
    pub fn remove(&mut self, email: &str) {
        self.recipients
            .retain(|r| !r.email.eq_ignore_ascii_case(email));
    }

    /// Flip the selection flag on the matching recipient. No-op if absent.
    pub fn toggle_selected(&mut self, email: &str) {
        if let Some(recipient) = self
            .recipients
            .iter_mut()
            .find(|r| r.email.eq_ignore_ascii_case(email))
        {
            recipient.selected = !recipient.selected;
        }
    }

    /// Selected recipients in insertion order
    pub fn selected(&self) -> Vec<&Recipient> {
        self.recipients.iter().filter(|r| r.selected).collect()
    }

    pub fn all(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    fn contains(&self, email: &str) -> bool {
        self.recipients
            .iter()
            .any(|r| r.email.eq_ignore_ascii_case(email))
    }
}
