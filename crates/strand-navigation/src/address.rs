//! Address input state
//!
//! Forward projection shows the focused tab's address in the field;
//! while the user is editing, projection holds off so typing is never
//! overwritten. The reverse path validates the text as an absolute URL
//! and produces a whole-record update for the focused tab.

use serde::{Deserialize, Serialize};
use url::Url;

use strand_tabs::{AddressTranslator, Tab};

use crate::error::NavigationError;
use crate::Result;

/// Outcome of a successful address submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSubmission {
    /// The normalized absolute address.
    pub address: String,
    /// Display title until the page reports its own.
    pub title: String,
    /// Re-translated load target.
    pub load_target: String,
}

impl AddressSubmission {
    /// The focused tab, replaced whole with the submitted address. The
    /// content handle survives; the surface navigates in place.
    pub fn apply_to(&self, tab: &Tab) -> Tab {
        let mut next = tab.clone();
        next.address = Some(self.address.clone());
        next.title = self.title.clone();
        next.load_target = self.load_target.clone();
        next
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddressInput {
    text: String,
    editing: bool,
}

impl AddressInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The input took keyboard focus; projection pauses.
    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// The input lost keyboard focus; projection resumes.
    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Mirror the focused tab's address into the field. Held off while
    /// the user is editing; a tab without an address leaves the field
    /// alone.
    pub fn project(&mut self, focused: Option<&Tab>) {
        if self.editing {
            return;
        }

        if let Some(address) = focused.and_then(|tab| tab.address.as_deref()) {
            if self.text != address {
                self.text = address.to_string();
            }
        }
    }

    /// Validate the current text as an absolute address. On failure the
    /// typed text stays as typed and the caller surfaces the error; on
    /// success the returned submission carries everything a replace-by-key
    /// of the focused tab needs.
    pub fn submit(&self, translator: &dyn AddressTranslator) -> Result<AddressSubmission> {
        let parsed = Url::parse(self.text.trim())
            .map_err(|_| NavigationError::InvalidAddress(self.text.clone()))?;

        let address = parsed.to_string();
        tracing::debug!(address = %address, "Address submitted");

        Ok(AddressSubmission {
            title: address.clone(),
            load_target: translator.translate(&address),
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_tabs::{DirectTranslator, TabStrip};

    fn tab(address: &str) -> Tab {
        TabStrip::new().create_tab(address, &DirectTranslator).unwrap()
    }

    #[test]
    fn test_projection_follows_focused_tab() {
        let mut input = AddressInput::new();

        input.project(Some(&tab("https://example.com/")));
        assert_eq!(input.text(), "https://example.com/");

        input.project(Some(&tab("about:home")));
        assert_eq!(input.text(), "about:home");
    }

    #[test]
    fn test_projection_never_clobbers_editing() {
        let mut input = AddressInput::new();
        input.begin_edit();
        input.set_text("https://exa");
        assert!(input.is_editing());

        input.project(Some(&tab("https://example.com/")));
        assert_eq!(input.text(), "https://exa");

        input.end_edit();
        assert!(!input.is_editing());
        input.project(Some(&tab("https://example.com/")));
        assert_eq!(input.text(), "https://example.com/");
    }

    #[test]
    fn test_projection_skips_addressless_tab() {
        let mut input = AddressInput::new();
        input.set_text("https://example.com/");

        let mut internal = tab("about:home");
        internal.address = None;
        input.project(Some(&internal));

        assert_eq!(input.text(), "https://example.com/");
    }

    #[test]
    fn test_submit_normalizes_and_translates() {
        let mut input = AddressInput::new();
        input.set_text("https://example.com");

        let submission = input.submit(&DirectTranslator).unwrap();
        assert_eq!(submission.address, "https://example.com/");
        assert_eq!(submission.title, "https://example.com/");
        assert_eq!(submission.load_target, "https://example.com/");
    }

    #[test]
    fn test_submit_rejects_relative_text() {
        let mut input = AddressInput::new();
        input.set_text("not a url");

        let err = input.submit(&DirectTranslator).unwrap_err();
        assert!(matches!(err, NavigationError::InvalidAddress(text) if text == "not a url"));
        // The typed text stays as typed.
        assert_eq!(input.text(), "not a url");
    }

    #[test]
    fn test_apply_to_keeps_the_content_handle() {
        let base = tab("https://old.example/");
        let mut input = AddressInput::new();
        input.set_text("https://new.example/");

        let submission = input.submit(&DirectTranslator).unwrap();
        let next = submission.apply_to(&base);

        assert_eq!(next.key, base.key);
        assert_eq!(next.address.as_deref(), Some("https://new.example/"));
        assert_eq!(next.title, "https://new.example/");
        assert!(next.content.is_none());
        assert_eq!(next.is_loaded, base.is_loaded);
    }
}
