//! Pointer events: the per-widget state machine and tree dispatch.
//!
//! The host translates raw input into [`PointerEvent`] samples and
//! feeds them to [`Ui::dispatch_pointer`]; all hit-testing happens
//! here. Each widget runs a small state machine (Idle, Hovered,
//! Pressed) that synthesizes Enter/Leave/Click from Move/Down/Up.
//!
//! Listener callbacks collected during the traversal fire after the
//! structural pass, in traversal order, with mutable access to the
//! context. A listener tearing down part of the tree cannot corrupt an
//! in-flight dispatch.

use std::rc::Rc;

use tracing::trace;

use crate::error::UiError;
use crate::tree::widget::PointerListener;
use crate::tree::{ListenerId, PointerCallback, WidgetId};
use crate::types::Point;
use crate::Ui;

// =============================================================================
// Event types
// =============================================================================

/// Pointer button associated with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    None,
    Left,
    Right,
}

/// What a pointer sample means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Leave,
    Move,
    Down,
    Up,
    Click,
}

impl PointerKind {
    /// Down/Up/Click are claimed by a single widget; the rest broadcast.
    pub(crate) const fn is_consuming(&self) -> bool {
        matches!(self, Self::Down | Self::Up | Self::Click)
    }
}

/// A pointer sample in root-absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Point,
    pub button: PointerButton,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub const fn new(kind: PointerKind, pos: Point, button: PointerButton) -> Self {
        Self { kind, pos, button }
    }

    /// Create a button-press event.
    pub const fn down(button: PointerButton, x: i32, y: i32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y), button)
    }

    /// Create a button-release event.
    pub const fn up(button: PointerButton, x: i32, y: i32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y), button)
    }

    /// Create a movement event.
    pub const fn move_to(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y), PointerButton::None)
    }
}

/// Listener invocations collected during one dispatch.
type FireQueue = Vec<(Rc<PointerCallback>, PointerEvent)>;

// =============================================================================
// Listener registry & dispatch
// =============================================================================

impl Ui {
    /// Register a pointer listener on a widget. Listeners fire in
    /// registration order for every event the widget broadcasts.
    ///
    /// Returns [`ListenerId::INVALID`] for stale widget ids.
    pub fn add_pointer_listener<F>(&mut self, id: WidgetId, callback: F) -> ListenerId
    where
        F: Fn(&mut Ui, &PointerEvent) + 'static,
    {
        let Some(widget) = self.widget_mut(id) else { return ListenerId::INVALID };
        let listener_id = ListenerId(widget.next_listener_id);
        widget.next_listener_id += 1;
        widget.listeners.push(PointerListener { id: listener_id, callback: Rc::new(callback) });
        listener_id
    }

    /// Unregister a listener. Unknown ids are ignored.
    pub fn remove_pointer_listener(&mut self, id: WidgetId, listener: ListenerId) {
        if let Some(widget) = self.widget_mut(id) {
            widget.listeners.retain(|l| l.id != listener);
        }
    }

    /// Feed one pointer sample into the tree.
    ///
    /// Returns whether any widget claimed the event. Fails only when no
    /// root exists to anchor the dispatch.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> Result<bool, UiError> {
        let root = self.root()?;
        let mut fired = FireQueue::new();
        let handled = self.feed(root, &event, true, &mut fired);
        trace!(
            kind = ?event.kind,
            x = event.pos.x,
            y = event.pos.y,
            handled,
            callbacks = fired.len(),
            "pointer dispatched"
        );
        for (callback, broadcast) in fired {
            callback(self, &broadcast);
        }
        Ok(handled)
    }

    /// Recursive feed: children topmost first, then the widget itself.
    ///
    /// Broadcast kinds reach every child so all hover states update.
    /// Consuming kinds stop at the first claimant, except that the root
    /// always gets its own chance.
    fn feed(&mut self, id: WidgetId, event: &PointerEvent, at_root: bool, fired: &mut FireQueue) -> bool {
        let Some(widget) = self.widget(id) else { return false };
        if !widget.displayed {
            return false;
        }
        let transparent = widget.pointer_transparent;
        let is_composite = widget.composite.is_some();
        let consuming = event.kind.is_consuming();

        let mut handled = false;
        if is_composite {
            let children = self.children_of(id);
            for &child in children.iter().rev() {
                if consuming {
                    if self.feed(child, event, false, fired) {
                        handled = true;
                        break;
                    }
                } else if self.feed(child, event, false, fired) {
                    handled = true;
                }
            }
        }

        if !transparent && (!consuming || !handled || at_root) {
            if self.run_machine(id, event, fired) {
                handled = true;
            }
        }
        handled
    }

    fn run_machine(&mut self, id: WidgetId, event: &PointerEvent, fired: &mut FireQueue) -> bool {
        match event.kind {
            PointerKind::Enter | PointerKind::Leave | PointerKind::Move => {
                self.machine_move(id, event, fired)
            }
            PointerKind::Down => self.machine_down(id, event, fired),
            PointerKind::Up | PointerKind::Click => self.machine_up(id, event, fired),
        }
    }

    /// Queue all of a widget's listeners for one broadcast event.
    fn broadcast(&self, id: WidgetId, kind: PointerKind, event: &PointerEvent, fired: &mut FireQueue) {
        let Some(widget) = self.widget(id) else { return };
        let out = PointerEvent::new(kind, event.pos, event.button);
        for listener in &widget.listeners {
            fired.push((Rc::clone(&listener.callback), out));
        }
    }

    /// Move also services host-fed Enter/Leave: hover is recomputed
    /// from the hit test either way.
    fn machine_move(&mut self, id: WidgetId, event: &PointerEvent, fired: &mut FireQueue) -> bool {
        let inside = self.point_in_widget(id, event.pos);
        let Some(widget) = self.widget_mut(id) else { return false };
        let was_hovered = widget.hovered;
        widget.hovered = inside;
        let pressed = widget.pressed;

        if inside && !was_hovered {
            self.broadcast(id, PointerKind::Enter, event, fired);
        }
        if !inside && was_hovered {
            self.broadcast(id, PointerKind::Leave, event, fired);
        }
        // A dragged widget keeps receiving Move outside its bounds
        if inside || pressed {
            self.broadcast(id, PointerKind::Move, event, fired);
        }
        // Hover movement is non-exclusive; only a drag claims the sample
        pressed
    }

    fn machine_down(&mut self, id: WidgetId, event: &PointerEvent, fired: &mut FireQueue) -> bool {
        let Some(widget) = self.widget(id) else { return false };
        if !widget.enabled {
            return false;
        }
        if !self.point_in_widget(id, event.pos) {
            return false;
        }
        if let Some(widget) = self.widget_mut(id) {
            widget.pressed = true;
            widget.press_started_inside = true;
        }
        self.broadcast(id, PointerKind::Down, event, fired);
        true
    }

    /// Up fires on the pressed widget wherever the pointer ended up, so
    /// a drag can legally finish outside. Click additionally requires
    /// the press to have started inside and the release to hit.
    fn machine_up(&mut self, id: WidgetId, event: &PointerEvent, fired: &mut FireQueue) -> bool {
        let Some(widget) = self.widget(id) else { return false };
        if !widget.enabled {
            return false;
        }
        let was_pressed = widget.pressed;
        let started_inside = widget.press_started_inside;
        if let Some(widget) = self.widget_mut(id) {
            widget.pressed = false;
            widget.press_started_inside = false;
        }
        if was_pressed {
            self.broadcast(id, PointerKind::Up, event, fired);
            if started_inside && self.point_in_widget(id, event.pos) {
                self.broadcast(id, PointerKind::Click, event, fired);
            }
        }
        was_pressed
    }
}

// =============================================================================
// Tests
// =============================================================================
