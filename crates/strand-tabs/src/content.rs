//! Collaborator boundaries around tab content
//!
//! The strip never loads content itself. Addresses are translated into
//! loadable targets, content surfaces are produced by a loader, and the
//! resulting control handle is merely held by the tab record.

use std::fmt;
use std::sync::Arc;

/// Translates a user-facing address into the identifier the content
/// loader actually fetches. Pure and deterministic for a given address.
pub trait AddressTranslator: Send + Sync {
    fn translate(&self, address: &str) -> String;
}

/// Passthrough translator for hosts that load addresses directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTranslator;

impl AddressTranslator for DirectTranslator {
    fn translate(&self, address: &str) -> String {
        address.to_string()
    }
}

/// Navigation controls exposed by a tab's content surface.
pub trait ContentControl: Send + Sync {
    fn back(&self);
    fn forward(&self);
    fn reload(&self);
}

/// Produces content surfaces. Invoked exactly once per tab, at the moment
/// the tab first loads.
pub trait ContentLoader: Send + Sync {
    fn load(&self, target: &str) -> ContentHandle;
}

/// Opaque capability handle to a tab's content controls.
///
/// The content loader owns the surface behind it; the tab record only
/// holds the handle. Two handles compare equal when they point at the
/// same surface.
#[derive(Clone)]
pub struct ContentHandle {
    control: Arc<dyn ContentControl>,
}

impl ContentHandle {
    pub fn new(control: Arc<dyn ContentControl>) -> Self {
        Self { control }
    }

    pub fn back(&self) {
        self.control.back();
    }

    pub fn forward(&self) {
        self.control.forward();
    }

    pub fn reload(&self) {
        self.control.reload();
    }

    /// Pointer-identity comparison; the capability itself is opaque.
    pub fn same_surface(&self, other: &ContentHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.control), Arc::as_ptr(&other.control))
    }
}

impl fmt::Debug for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullControl;

    impl ContentControl for NullControl {
        fn back(&self) {}
        fn forward(&self) {}
        fn reload(&self) {}
    }

    #[test]
    fn test_handle_identity() {
        let a = ContentHandle::new(Arc::new(NullControl));
        let b = ContentHandle::new(Arc::new(NullControl));

        assert!(a.same_surface(&a.clone()));
        assert!(!a.same_surface(&b));
    }

    #[test]
    fn test_direct_translator_is_identity() {
        let translator = DirectTranslator;
        assert_eq!(translator.translate("about:home"), "about:home");
    }
}
