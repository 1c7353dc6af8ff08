//! Strand icon resolution
//!
//! Favicons on the hosting origin are used as-is; anything cross-origin
//! is fetched as a cancellable background job. Starting a new fetch for
//! a tab cancels the previous one, and cancellation releases whatever
//! the job produced, on every exit path.

mod error;
mod fetcher;
mod resolver;

pub use error::IconError;
pub use fetcher::{FetchControl, HttpIconFetcher, IconFetcher};
pub use resolver::{IconEvent, IconResolver, ResolvedIcon};

pub type Result<T> = std::result::Result<T, IconError>;
