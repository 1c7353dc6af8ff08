//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] strand_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] strand_navigation::NavigationError),

    #[error("Icon error: {0}")]
    Icon(#[from] strand_icons::IconError),

    #[error("Configuration error: {0}")]
    Config(String),
}
