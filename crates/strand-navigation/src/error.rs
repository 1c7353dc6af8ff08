//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Not an absolute address: {0}")]
    InvalidAddress(String),

    #[error("No focused tab to navigate")]
    NoFocusedTab,
}
