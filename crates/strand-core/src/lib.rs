//! Strand Core
//!
//! Central coordination for the Strand tab strip. The shell owns all
//! state: the ordered strip, focus, the address input, drag routing and
//! icon jobs. Hosts feed it input events on one logical thread and
//! render from the strip it exposes.

mod config;
mod error;
mod event;
mod shell;

pub use config::Config;
pub use error::CoreError;
pub use event::InputEvent;
pub use shell::{LayoutProvider, Shell};

// Re-export member-crate surfaces.
pub use strand_gesture::{DragFrame, DragGesture, GestureConfig, Point, PointerSample, Rect};
pub use strand_icons::{
    FetchControl, HttpIconFetcher, IconError, IconEvent, IconFetcher, IconResolver, ResolvedIcon,
};
pub use strand_navigation::{AddressInput, AddressSubmission, NavigationError};
pub use strand_tabs::{
    AddressTranslator, ContentControl, ContentHandle, ContentLoader, DirectTranslator,
    FocusController, Tab, TabError, TabKey, TabStrip, KEY_SPACE,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
