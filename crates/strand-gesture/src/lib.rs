//! Strand gesture tracking
//!
//! Turns a continuous pointer trajectory over one dragged tab into
//! discrete "move by N slots" commands, with a sensitivity radius so
//! clicks stay clicks and a hysteresis reference point so a lingering
//! pointer cannot thrash the order.

mod drag;
mod geometry;

pub use drag::{DragFrame, DragGesture, GestureConfig, PointerSample};
pub use geometry::{Point, Rect};
