//! Tab key allocation
//!
//! Keys are the lowest unused integer in `[0, KEY_SPACE)`. A closed
//! tab's key becomes available again, but a live tab's key is never
//! handed out twice.

use crate::error::TabError;
use crate::tab::TabKey;
use crate::Result;

/// Exclusive upper bound of the key space. Realistic tab counts never
/// approach it; exhaustion is reported, not a panic.
pub const KEY_SPACE: TabKey = 1000;

/// Find the lowest key not present among `existing`.
pub fn allocate_key(existing: &[TabKey]) -> Result<TabKey> {
    for candidate in 0..KEY_SPACE {
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
    }

    Err(TabError::KeysExhausted(existing.len()))
}
