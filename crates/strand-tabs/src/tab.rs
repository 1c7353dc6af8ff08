//! Tab record
//!
//! A tab is mutated by whole-record replacement keyed on `key`, never by
//! partial in-place edits. [`Tab::same_as`] is the field-wise comparison
//! replace-by-key uses to skip redundant updates.

use serde::{Deserialize, Serialize};

use crate::content::{AddressTranslator, ContentHandle};

/// Identifier of a live tab: small, stable for the tab's lifetime, and
/// unique among tabs currently in the strip.
pub type TabKey = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identity among live tabs.
    pub key: TabKey,
    /// What the content loader fetches; translated from `address`.
    pub load_target: String,
    /// User-facing address. Internal pages may have none.
    pub address: Option<String>,
    /// Display name; defaults to the address.
    pub title: String,
    /// Favicon source locator, if the page advertised one.
    pub icon: Option<String>,
    /// True once the tab has been focused at least once. Its content
    /// surface is instantiated at that edge and never recreated.
    pub is_loaded: bool,
    /// One-shot request for the address input to take keyboard focus;
    /// cleared by an explicit consume once the host has complied.
    pub should_focus_input: bool,
    /// Back-reference to the content control surface, owned by the
    /// content loader.
    #[serde(skip)]
    pub content: Option<ContentHandle>,
}

impl Tab {
    /// Build a fresh record for `address` under `key`. New tabs are not
    /// loaded and do not request input focus; both follow from the first
    /// focus transition.
    pub fn new(key: TabKey, address: impl Into<String>, translator: &dyn AddressTranslator) -> Self {
        let address = address.into();

        Self {
            key,
            load_target: translator.translate(&address),
            title: address.clone(),
            address: Some(address),
            icon: None,
            is_loaded: false,
            should_focus_input: false,
            content: None,
        }
    }

    /// Field-wise equality, with the content handle compared by surface
    /// identity.
    pub fn same_as(&self, other: &Tab) -> bool {
        let content_same = match (&self.content, &other.content) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_surface(b),
            _ => false,
        };

        self.key == other.key
            && self.load_target == other.load_target
            && self.address == other.address
            && self.title == other.title
            && self.icon == other.icon
            && self.is_loaded == other.is_loaded
            && self.should_focus_input == other.should_focus_input
            && content_same
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_content(mut self, handle: ContentHandle) -> Self {
        self.content = Some(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::content::{ContentControl, DirectTranslator};

    struct NullControl;

    impl ContentControl for NullControl {
        fn back(&self) {}
        fn forward(&self) {}
        fn reload(&self) {}
    }

    #[test]
    fn test_new_tab_defaults() {
        let tab = Tab::new(0, "https://example.com/", &DirectTranslator);

        assert_eq!(tab.address.as_deref(), Some("https://example.com/"));
        assert_eq!(tab.title, "https://example.com/");
        assert_eq!(tab.load_target, "https://example.com/");
        assert!(!tab.is_loaded);
        assert!(!tab.should_focus_input);
        assert!(tab.content.is_none());
    }

    #[test]
    fn test_same_as_is_field_wise() {
        let tab = Tab::new(3, "about:home", &DirectTranslator);

        assert!(tab.same_as(&tab.clone()));
        assert!(!tab.same_as(&tab.clone().with_title("Home")));
        assert!(!tab.same_as(&tab.clone().with_icon(Some("/icon.png".into()))));
    }

    #[test]
    fn test_same_as_compares_content_by_surface() {
        let handle = ContentHandle::new(Arc::new(NullControl));
        let tab = Tab::new(0, "about:home", &DirectTranslator).with_content(handle.clone());

        assert!(tab.same_as(&tab.clone().with_content(handle)));

        let other = ContentHandle::new(Arc::new(NullControl));
        assert!(!tab.same_as(&tab.clone().with_content(other)));
    }
}
