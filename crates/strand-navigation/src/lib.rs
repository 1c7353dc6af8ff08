//! Strand navigation sync
//!
//! Keeps the address input mirrored to the focused tab without ever
//! clobbering what the user is typing, and validates submissions before
//! they touch the strip. Back/forward/reload are delegated verbatim to
//! the focused tab's content handle; nothing here navigates.

mod address;
mod error;

pub use address::{AddressInput, AddressSubmission};
pub use error::NavigationError;

pub type Result<T> = std::result::Result<T, NavigationError>;
