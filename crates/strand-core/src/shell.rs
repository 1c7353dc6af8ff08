//! The shell
//!
//! Owns the strip, focus, the address input, drag routing and icon jobs.
//! Every transition enters through [`Shell::handle_event`] (or the typed
//! operation it routes to) on one logical thread and is fully applied
//! before the call returns.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use url::Url;

use strand_gesture::{DragFrame, DragGesture, Point, PointerSample, Rect};
use strand_icons::{IconEvent, IconFetcher, IconResolver, ResolvedIcon};
use strand_navigation::{AddressInput, NavigationError};
use strand_tabs::{
    AddressTranslator, ContentHandle, ContentLoader, FocusController, TabError, TabKey, TabStrip,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::event::InputEvent;
use crate::Result;

/// Box measurements for the strip and its tabs, provided by the host.
/// `None` means not laid out yet; the drag engine skips that sample.
pub trait LayoutProvider: Send + Sync {
    fn tab_box(&self, key: TabKey) -> Option<Rect>;
    fn strip_box(&self) -> Option<Rect>;
}

struct ActiveDrag {
    key: TabKey,
    gesture: DragGesture,
}

pub struct Shell {
    config: Config,
    strip: Arc<RwLock<TabStrip>>,
    focus: Arc<RwLock<FocusController>>,
    address: Arc<RwLock<AddressInput>>,
    /// Present only while a drag is active; pointer moves are routed
    /// nowhere otherwise.
    drag: Arc<RwLock<Option<ActiveDrag>>>,
    icons: Arc<IconResolver>,
    icon_events: Arc<Mutex<mpsc::UnboundedReceiver<IconEvent>>>,
    translator: Arc<dyn AddressTranslator>,
    loader: Arc<dyn ContentLoader>,
    layout: Arc<dyn LayoutProvider>,
}

impl Shell {
    pub fn new(
        config: Config,
        translator: Arc<dyn AddressTranslator>,
        loader: Arc<dyn ContentLoader>,
        layout: Arc<dyn LayoutProvider>,
        icon_fetcher: Arc<dyn IconFetcher>,
    ) -> Result<Self> {
        let base = Url::parse(&config.base_origin)
            .map_err(|e| CoreError::Config(format!("invalid base origin: {e}")))?;
        let (icons, icon_events) = IconResolver::new(base, icon_fetcher);

        Ok(Self {
            config,
            strip: Arc::new(RwLock::new(TabStrip::new())),
            focus: Arc::new(RwLock::new(FocusController::new())),
            address: Arc::new(RwLock::new(AddressInput::new())),
            drag: Arc::new(RwLock::new(None)),
            icons: Arc::new(icons),
            icon_events: Arc::new(Mutex::new(icon_events)),
            translator,
            loader,
            layout,
        })
    }

    /// Open the configured initial tabs and focus the first.
    pub fn initialize(&self) -> Result<()> {
        let addresses = self.config.initial_tabs.clone();
        self.open_tabs(&addresses)
    }

    pub fn open_tabs(&self, addresses: &[String]) -> Result<()> {
        let mut strip = TabStrip::new();
        for address in addresses {
            let tab = strip.create_tab(address.as_str(), self.translator.as_ref())?;
            strip = strip.append(tab);
        }

        let first = strip.get(0).map(|tab| tab.key);
        *self.strip.write() = strip;
        tracing::info!(tab_count = addresses.len(), "Opened initial tabs");

        if let Some(key) = first {
            self.focus_tab(key)?;
        }

        Ok(())
    }

    /// Dispatch one input event. The transition is fully applied before
    /// this returns; there is no overlap between two events.
    pub fn handle_event(&self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerDown { key, pointer } => self.pointer_down(key, pointer),
            InputEvent::PointerMove { pointer } => {
                self.pointer_move(pointer);
                Ok(())
            }
            InputEvent::PointerUp { pointer } => {
                self.pointer_up(pointer);
                Ok(())
            }
            InputEvent::MiddleClick { key } | InputEvent::CloseTab { key } => self.close_tab(key),
            InputEvent::NewTab => self.new_tab().map(|_| ()),
            InputEvent::AddressEditing { editing } => {
                self.address_editing(editing);
                Ok(())
            }
            InputEvent::AddressTyped { text } => {
                self.address_typed(text);
                Ok(())
            }
            InputEvent::AddressSubmitted => self.submit_address(),
            InputEvent::Back => {
                self.back();
                Ok(())
            }
            InputEvent::Forward => {
                self.forward();
                Ok(())
            }
            InputEvent::Reload => {
                self.reload();
                Ok(())
            }
        }
    }

    // === Tab operations ===

    /// Open the homepage in a fresh tab at the end of the strip and
    /// focus it.
    pub fn new_tab(&self) -> Result<TabKey> {
        let strip = self.strip.read().clone();
        let tab = strip.create_tab(self.config.homepage.as_str(), self.translator.as_ref())?;
        let key = tab.key;

        *self.strip.write() = strip.append(tab);
        tracing::info!(tab_key = key, "Opened new tab");

        self.focus_tab(key)?;
        Ok(key)
    }

    pub fn select_tab(&self, key: TabKey) -> Result<()> {
        self.focus_tab(key)
    }

    /// Destroy the tab with `key`. Closing an unknown key is a no-op.
    /// When the focused tab dies, focus falls to its nearest neighbor.
    pub fn close_tab(&self, key: TabKey) -> Result<()> {
        let before = self.strip.read().clone();
        let (after, removed) = before.remove_by_key(key);
        let Some(index) = removed else {
            return Ok(());
        };

        {
            let mut drag = self.drag.write();
            if drag.as_ref().is_some_and(|active| active.key == key) {
                *drag = None;
            }
        }
        self.icons.cancel(key);

        let was_focused = self.focus.read().is_focused(key);
        *self.strip.write() = after;
        tracing::info!(tab_key = key, "Closed tab");

        if was_focused {
            match FocusController::resolve_removed(&before, index) {
                Some(survivor) => self.focus_tab(survivor)?,
                None => self.focus.write().clear(),
            }
        }

        Ok(())
    }

    fn focus_tab(&self, key: TabKey) -> Result<()> {
        let strip = self.strip.read().clone();
        let Some(tab) = strip.by_key(key) else {
            return Err(TabError::NotFound(key).into());
        };
        let newly_loaded = !tab.is_loaded;

        let mut next = self.focus.write().focus(&strip, key);

        if newly_loaded {
            // Content is instantiated at most once per tab, at its
            // first focus, never again on re-render.
            if let Some(tab) = next.by_key(key) {
                let handle = self.loader.load(&tab.load_target);
                let loaded = tab.clone().with_content(handle);
                next = next.replace_by_key(key, loaded);
                tracing::info!(tab_key = key, "Instantiated tab content");
            }
        }

        *self.strip.write() = next;
        self.project_address();
        Ok(())
    }

    /// The host performed the address-input focus side effect; clear the
    /// one-shot request on the focused tab.
    pub fn consume_focus_input(&self) {
        if let Some(key) = self.focus.read().focused_key() {
            let strip = self.strip.read().clone();
            *self.strip.write() = FocusController::consume_focus_input(&strip, key);
        }
    }

    // === Metadata reported by the content surface ===

    pub fn set_tab_title(&self, key: TabKey, title: impl Into<String>) -> Result<()> {
        let strip = self.strip.read().clone();
        let Some(tab) = strip.by_key(key) else {
            return Err(TabError::NotFound(key).into());
        };

        *self.strip.write() = strip.replace_by_key(key, tab.clone().with_title(title));
        Ok(())
    }

    pub fn set_tab_icon(&self, key: TabKey, icon: Option<String>) -> Result<()> {
        let strip = self.strip.read().clone();
        let Some(tab) = strip.by_key(key) else {
            return Err(TabError::NotFound(key).into());
        };

        *self.strip.write() = strip.replace_by_key(key, tab.clone().with_icon(icon.clone()));

        match icon {
            Some(src) => self.icons.resolve(key, &src),
            None => self.icons.cancel(key),
        }

        Ok(())
    }

    // === Address bar ===

    pub fn address_editing(&self, editing: bool) {
        if editing {
            self.address.write().begin_edit();
        } else {
            self.address.write().end_edit();
            self.project_address();
        }
    }

    pub fn address_typed(&self, text: impl Into<String>) {
        self.address.write().set_text(text);
    }

    /// Submit the address input against the focused tab. An invalid
    /// address surfaces as a validation error and changes nothing; the
    /// typed text stays in the field.
    pub fn submit_address(&self) -> Result<()> {
        let submission = self.address.read().submit(self.translator.as_ref())?;

        let strip = self.strip.read().clone();
        let key = self
            .focus
            .read()
            .focused_key()
            .ok_or(NavigationError::NoFocusedTab)?;
        let Some(tab) = strip.by_key(key) else {
            return Err(TabError::NotFound(key).into());
        };

        *self.strip.write() = strip.replace_by_key(key, submission.apply_to(tab));
        tracing::info!(tab_key = key, address = %submission.address, "Navigated focused tab");

        // Projection is held off while the field is still being edited;
        // the normalized form lands there on blur.
        self.project_address();
        Ok(())
    }

    // === History delegation ===

    pub fn back(&self) {
        self.with_focused_content(|content| content.back());
    }

    pub fn forward(&self) {
        self.with_focused_content(|content| content.forward());
    }

    pub fn reload(&self) {
        self.with_focused_content(|content| content.reload());
    }

    fn with_focused_content(&self, f: impl FnOnce(&ContentHandle)) {
        let strip = self.strip.read();
        let focus = self.focus.read();
        if let Some(handle) = focus
            .focused_tab(&strip)
            .and_then(|tab| tab.content.as_ref())
        {
            f(handle);
        }
    }

    // === Drag reordering ===

    /// Press on a tab: select it, then arm a drag. Pointer routing goes
    /// live with the drag and dies with it.
    pub fn pointer_down(&self, key: TabKey, pointer: Point) -> Result<()> {
        self.focus_tab(key)?;

        if let Some(tab_box) = self.layout.tab_box(key) {
            *self.drag.write() = Some(ActiveDrag {
                key,
                gesture: DragGesture::begin(self.config.gesture, pointer, tab_box.x),
            });
        }

        Ok(())
    }

    /// Route a pointer move to the active drag, if any. Accepted bumps
    /// reorder the strip; the returned frame carries the presentational
    /// transform for the dragged tab.
    pub fn pointer_move(&self, pointer: Point) -> Option<DragFrame> {
        let mut slot = self.drag.write();
        let active = slot.as_mut()?;
        let key = active.key;

        let sample = PointerSample {
            pointer,
            tab_box: self.layout.tab_box(key).unwrap_or(Rect::ZERO),
            strip_box: self.layout.strip_box().unwrap_or(Rect::ZERO),
        };

        let strip_cell = &self.strip;
        let frame = active.gesture.on_pointer_move(sample, |by| {
            let strip = strip_cell.read().clone();
            match strip.move_by(key, by as isize) {
                Some(next) => {
                    *strip_cell.write() = next;
                    true
                }
                None => false,
            }
        });

        Some(frame)
    }

    /// Release: the drag and its pointer routing are dropped and the
    /// presentational transform resets. The strip order stands.
    pub fn pointer_up(&self, _pointer: Point) -> Option<DragFrame> {
        let mut active = self.drag.write().take()?;
        Some(active.gesture.finish())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.read().is_some()
    }

    // === Icons ===

    /// Drain icon completions; called on the event thread.
    pub fn drain_icon_events(&self) -> Vec<IconEvent> {
        let mut receiver = self.icon_events.lock();
        let mut drained = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            drained.push(event);
        }
        drained
    }

    pub fn icon_for(&self, key: TabKey) -> Option<ResolvedIcon> {
        self.icons.icon_for(key)
    }

    // === Accessors ===

    pub fn tabs(&self) -> TabStrip {
        self.strip.read().clone()
    }

    pub fn focused_key(&self) -> Option<TabKey> {
        self.focus.read().focused_key()
    }

    pub fn address_text(&self) -> String {
        self.address.read().text().to_string()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Teardown: drop any active drag and cancel every icon job.
    pub fn shutdown(&self) {
        *self.drag.write() = None;
        self.icons.shutdown();
        tracing::info!("Shell shut down");
    }

    fn project_address(&self) {
        let strip = self.strip.read();
        let focus = self.focus.read();
        self.address.write().project(focus.focused_tab(&strip));
    }
}

impl Clone for Shell {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            strip: Arc::clone(&self.strip),
            focus: Arc::clone(&self.focus),
            address: Arc::clone(&self.address),
            drag: Arc::clone(&self.drag),
            icons: Arc::clone(&self.icons),
            icon_events: Arc::clone(&self.icon_events),
            translator: Arc::clone(&self.translator),
            loader: Arc::clone(&self.loader),
            layout: Arc::clone(&self.layout),
        }
    }
}
