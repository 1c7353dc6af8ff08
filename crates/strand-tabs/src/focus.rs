//! Focus arbitration
//!
//! At most one tab is focused. Destroying the focused tab hands focus to
//! its nearest neighbor: the predecessor if one exists, else the
//! successor, else nothing.

use crate::strip::TabStrip;
use crate::tab::{Tab, TabKey};

#[derive(Debug, Clone, Default)]
pub struct FocusController {
    focused: Option<TabKey>,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_key(&self) -> Option<TabKey> {
        self.focused
    }

    pub fn is_focused(&self, key: TabKey) -> bool {
        self.focused == Some(key)
    }

    pub fn focused_tab<'a>(&self, strip: &'a TabStrip) -> Option<&'a Tab> {
        self.focused.and_then(|key| strip.by_key(key))
    }

    /// Focus the tab with `key`. The tab loads on its first focus and
    /// requests input focus every time; both are applied by replacing the
    /// record. An absent key leaves everything unchanged.
    pub fn focus(&mut self, strip: &TabStrip, key: TabKey) -> TabStrip {
        let Some(tab) = strip.by_key(key) else {
            return strip.clone();
        };

        self.focused = Some(key);

        let mut next = tab.clone();
        next.is_loaded = true;
        next.should_focus_input = true;

        tracing::debug!(tab_key = key, "Focused tab");

        strip.replace_by_key(key, next)
    }

    /// Drop focus entirely (the strip emptied).
    pub fn clear(&mut self) {
        self.focused = None;
        tracing::debug!("Cleared focus");
    }

    /// Pick the focus survivor for removing the tab at `removed_index`,
    /// given the strip as it stood before the removal. Deterministic in
    /// that pre-destruction order.
    pub fn resolve_removed(strip_before: &TabStrip, removed_index: usize) -> Option<TabKey> {
        let neighbor = if removed_index > 0 {
            strip_before.get(removed_index - 1)
        } else {
            strip_before.get(removed_index + 1)
        };

        neighbor.map(|tab| tab.key)
    }

    /// Clear the one-shot input-focus request once the host has performed
    /// the side effect. Idempotent.
    pub fn consume_focus_input(strip: &TabStrip, key: TabKey) -> TabStrip {
        let Some(tab) = strip.by_key(key) else {
            return strip.clone();
        };

        let mut next = tab.clone();
        next.should_focus_input = false;

        strip.replace_by_key(key, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DirectTranslator;

    fn strip_of(n: usize) -> TabStrip {
        let mut strip = TabStrip::new();
        for i in 0..n {
            let tab = strip
                .create_tab(format!("a:{i}"), &DirectTranslator)
                .unwrap();
            strip = strip.append(tab);
        }
        strip
    }

    #[test]
    fn test_focus_marks_loaded_and_input_request() {
        let strip = strip_of(2);
        let mut focus = FocusController::new();

        let next = focus.focus(&strip, 0);

        assert_eq!(focus.focused_key(), Some(0));
        let focused = next.by_key(0).unwrap();
        assert!(focused.is_loaded);
        assert!(focused.should_focus_input);
        // Only the focused tab changed.
        assert!(!next.by_key(1).unwrap().is_loaded);
        assert!(!next.by_key(1).unwrap().should_focus_input);
    }

    #[test]
    fn test_loaded_is_monotone_across_refocus() {
        let strip = strip_of(2);
        let mut focus = FocusController::new();

        let strip = focus.focus(&strip, 0);
        let strip = focus.focus(&strip, 1);

        // Tab 0 lost focus but stays loaded.
        assert!(strip.by_key(0).unwrap().is_loaded);
        assert!(strip.by_key(1).unwrap().is_loaded);
        assert_eq!(focus.focused_key(), Some(1));
    }

    #[test]
    fn test_survivor_prefers_predecessor() {
        let strip = strip_of(3);

        assert_eq!(FocusController::resolve_removed(&strip, 2), Some(1));
        assert_eq!(FocusController::resolve_removed(&strip, 1), Some(0));
    }

    #[test]
    fn test_survivor_falls_back_to_successor() {
        let strip = strip_of(3);

        assert_eq!(FocusController::resolve_removed(&strip, 0), Some(1));
    }

    #[test]
    fn test_no_survivor_when_strip_empties() {
        let strip = strip_of(1);

        assert_eq!(FocusController::resolve_removed(&strip, 0), None);
    }

    #[test]
    fn test_consume_clears_the_one_shot_flag() {
        let strip = strip_of(1);
        let mut focus = FocusController::new();

        let strip = focus.focus(&strip, 0);
        let strip = FocusController::consume_focus_input(&strip, 0);

        assert!(!strip.by_key(0).unwrap().should_focus_input);
        // A second consume is a no-op on the same sequence.
        let again = FocusController::consume_focus_input(&strip, 0);
        assert!(again.same_seq(&strip));
    }
}
