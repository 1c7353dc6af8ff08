//! Tab error types

use thiserror::Error;

use crate::tab::TabKey;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(TabKey),

    #[error("Tab key space exhausted at {0} live tabs")]
    KeysExhausted(usize),
}
