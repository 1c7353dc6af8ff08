//! Input events
//!
//! Every state transition happens in response to one of these, and is
//! fully applied before the next is dispatched.

use strand_gesture::Point;
use strand_tabs::TabKey;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary-button press on a tab: select it and arm a possible drag.
    PointerDown { key: TabKey, pointer: Point },
    /// Pointer movement; routed to the drag gesture only while one is
    /// active.
    PointerMove { pointer: Point },
    /// Primary-button release; ends any active drag.
    PointerUp { pointer: Point },
    /// Middle-click on a tab destroys it.
    MiddleClick { key: TabKey },
    /// The "+" action.
    NewTab,
    /// The close button on a tab.
    CloseTab { key: TabKey },
    /// The address input gained or lost keyboard focus.
    AddressEditing { editing: bool },
    /// The address input's text changed.
    AddressTyped { text: String },
    /// The address form was submitted.
    AddressSubmitted,
    /// History and reload actions for the focused tab.
    Back,
    Forward,
    Reload,
}
