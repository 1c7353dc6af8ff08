//! Icon error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Fetch cancelled")]
    Cancelled,
}
