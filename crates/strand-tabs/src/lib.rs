//! Strand tab management
//!
//! Tabs carry small recycled integer keys and live in an ordered strip
//! that is the single source of truth for display order. Records are
//! replaced whole, never mutated in place, so change detection is a
//! field-wise comparison.

mod content;
mod error;
mod focus;
mod registry;
mod strip;
mod tab;

pub use content::{
    AddressTranslator, ContentControl, ContentHandle, ContentLoader, DirectTranslator,
};
pub use error::TabError;
pub use focus::FocusController;
pub use registry::{allocate_key, KEY_SPACE};
pub use strip::TabStrip;
pub use tab::{Tab, TabKey};

pub type Result<T> = std::result::Result<T, TabError>;
