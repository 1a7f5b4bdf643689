//! The `Ui` context: arena ownership, tree membership, geometry state.
//!
//! `Ui` owns every widget record exclusively. Client code and host
//! integrations hold [`WidgetId`] handles and go through the context for
//! every read and mutation. One `Ui` means one root and one coordinate
//! origin; nothing here is global.
//!
//! Mutation calls never fail on stale or non-member arguments. They are
//! no-ops, logged at `warn` level where the call indicates a client bug.

use tracing::{debug, trace, warn};

use crate::error::UiError;
use crate::types::{Border, BorderSides, Color, Insets, Point, Rect, Size};

use super::widget::{Widget, WidgetId};

/// Root context for one widget tree.
///
/// Created once and threaded through tree construction, the pointer feed
/// and rendering.
pub struct Ui {
    slots: Vec<Option<Widget>>,
    free: Vec<usize>,
    root: Option<WidgetId>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    /// Create an empty context with no root.
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), root: None }
    }

    // =========================================================================
    // Arena
    // =========================================================================

    fn alloc(&mut self, widget: Widget) -> WidgetId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(widget);
                WidgetId(index)
            }
            None => {
                self.slots.push(Some(widget));
                WidgetId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub(crate) fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Check if an id refers to a live widget.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.widget(id).is_some()
    }

    /// Number of live widgets, root included.
    pub fn widget_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    // =========================================================================
    // Creation & destruction
    // =========================================================================

    /// Create a detached leaf widget.
    pub fn create_widget(&mut self) -> WidgetId {
        self.alloc(Widget::new_leaf())
    }

    /// Create a detached container widget.
    pub fn create_container(&mut self) -> WidgetId {
        self.alloc(Widget::new_container())
    }

    /// Create the single top-level container with fixed pixel bounds.
    ///
    /// Fails if a root already exists for this context.
    pub fn create_root(&mut self, width: i32, height: i32) -> Result<WidgetId, UiError> {
        if self.root.is_some() {
            return Err(UiError::RootAlreadyExists);
        }
        let mut widget = Widget::new_container();
        widget.rect = Rect::from_pos_size(0, 0, width, height);
        widget.effective_rect = widget.rect;
        widget.is_root = true;
        let id = self.alloc(widget);
        self.root = Some(id);
        debug!(root = id.0, width, height, "root created");
        Ok(id)
    }

    /// The root container.
    ///
    /// Fails until [`create_root`](Self::create_root) has been called.
    pub fn root(&self) -> Result<WidgetId, UiError> {
        self.root.ok_or(UiError::RootMissing)
    }

    /// Destroy a widget and its whole subtree, returning the slots to
    /// the free pool. Detaches from the parent first. Destroying the
    /// root is rejected; stale ids are ignored.
    pub fn destroy(&mut self, id: WidgetId) {
        let Some(widget) = self.widget(id) else { return };
        if widget.is_root {
            warn!(widget = id.0, "root cannot be destroyed");
            return;
        }
        let parent = widget.parent;
        if let Some(parent_id) = parent {
            if let Some(composite) =
                self.widget_mut(parent_id).and_then(|p| p.composite.as_mut())
            {
                composite.children.retain(|&c| c != id);
            }
        }
        self.free_subtree(id);
        if let Some(parent_id) = parent {
            self.invalidate_layout(parent_id);
        }
    }

    fn free_subtree(&mut self, id: WidgetId) {
        for child in self.children_of(id) {
            self.free_subtree(child);
        }
        if let Some(slot) = self.slots.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(id.0);
            }
        }
    }

    // =========================================================================
    // Tree membership
    // =========================================================================

    /// Append `child` to a container's child list (topmost paint slot).
    ///
    /// Ignored when either id is stale, the target is a leaf, the child
    /// is the root, the attachment would create a cycle, or the child is
    /// still attached elsewhere. Reattaching requires an explicit
    /// [`remove_child`](Self::remove_child) first.
    pub fn add_child(&mut self, container: WidgetId, child: WidgetId) {
        if container == child {
            warn!(widget = child.0, "widget cannot be its own child");
            return;
        }
        let Some(target) = self.widget(container) else { return };
        if target.composite.is_none() {
            warn!(widget = container.0, "add_child on a leaf widget");
            return;
        }
        let Some(added) = self.widget(child) else { return };
        if added.is_root {
            warn!(widget = child.0, "root cannot be reparented");
            return;
        }
        if added.parent.is_some() {
            warn!(widget = child.0, "widget already attached; remove it first");
            return;
        }
        // The container must not live inside the child's subtree.
        let mut ancestor = target.parent;
        while let Some(current) = ancestor {
            if current == child {
                warn!(widget = child.0, "attachment would create a cycle");
                return;
            }
            ancestor = self.widget(current).and_then(|w| w.parent);
        }

        if let Some(widget) = self.widget_mut(child) {
            widget.parent = Some(container);
        }
        if let Some(composite) = self.widget_mut(container).and_then(|w| w.composite.as_mut()) {
            composite.children.push(child);
        }
        self.update_effective_display(child);
        self.invalidate_layout(container);
    }

    /// Detach `child` from a container.
    ///
    /// Non-members and stale ids are ignored. Detachment clears the
    /// back-reference and resets the child's transient pointer state.
    pub fn remove_child(&mut self, container: WidgetId, child: WidgetId) {
        let Some(composite) = self.widget_mut(container).and_then(|w| w.composite.as_mut())
        else {
            return;
        };
        let before = composite.children.len();
        composite.children.retain(|&c| c != child);
        if composite.children.len() == before {
            return;
        }
        if let Some(widget) = self.widget_mut(child) {
            widget.parent = None;
            widget.reset_transient();
        }
        self.update_effective_display(child);
        self.invalidate_layout(container);
    }

    /// Detach every child of a container.
    pub fn remove_all_children(&mut self, container: WidgetId) {
        let children = self.children_of(container);
        if let Some(composite) = self.widget_mut(container).and_then(|w| w.composite.as_mut()) {
            composite.children.clear();
        }
        for child in children {
            if let Some(widget) = self.widget_mut(child) {
                widget.parent = None;
                widget.reset_transient();
            }
            self.update_effective_display(child);
        }
        self.invalidate_layout(container);
    }

    pub(crate) fn children_of(&self, id: WidgetId) -> Vec<WidgetId> {
        self.widget(id)
            .and_then(|w| w.composite.as_ref())
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    // =========================================================================
    // Logical geometry
    // =========================================================================

    /// Set the logical rectangle from edges.
    pub fn set_rect(&mut self, id: WidgetId, left: i32, top: i32, right: i32, bottom: i32) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.rect = Rect::new(left, top, right, bottom);
        self.invalidate_layout(id);
    }

    /// Move the widget without resizing it.
    ///
    /// A pure move only refreshes effective geometry; it does not force
    /// a relayout of the subtree.
    pub fn set_pos(&mut self, id: WidgetId, x: i32, y: i32) {
        let Some(widget) = self.widget_mut(id) else { return };
        let size = widget.rect.size();
        widget.rect = Rect::from_pos_size(x, y, size.width, size.height);
        self.refresh_position(id);
    }

    /// Resize the widget keeping its logical origin.
    pub fn set_size(&mut self, id: WidgetId, width: i32, height: i32) {
        let Some(widget) = self.widget_mut(id) else { return };
        let origin = widget.rect.origin();
        widget.rect = Rect::from_pos_size(origin.x, origin.y, width, height);
        self.invalidate_layout(id);
    }

    /// Set logical origin and size in one call.
    pub fn set_pos_size(&mut self, id: WidgetId, x: i32, y: i32, width: i32, height: i32) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.rect = Rect::from_pos_size(x, y, width, height);
        self.invalidate_layout(id);
    }

    /// Set the layout measurement hint. Not meant for direct client
    /// sizing; layouts and widget implementations feed it.
    pub fn set_preferred_size(&mut self, id: WidgetId, width: i32, height: i32) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.preferred = Size::new(width, height);
        self.invalidate_layout(id);
    }

    pub fn set_padding(&mut self, id: WidgetId, padding: Insets) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.padding = padding;
        self.invalidate_layout(id);
    }

    pub fn set_margin(&mut self, id: WidgetId, margin: Insets) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.margin = margin;
        self.invalidate_layout(id);
    }

    /// Configure a uniform border on the selected sides; unselected
    /// sides are cleared.
    pub fn set_border(&mut self, id: WidgetId, thickness: i32, color: Color, sides: BorderSides) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.border = Border::from_sides(thickness, color, sides);
        self.invalidate_layout(id);
    }

    pub fn set_background(&mut self, id: WidgetId, color: Color) {
        if let Some(widget) = self.widget_mut(id) {
            widget.background = color;
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// Set the own display flag and propagate the effective state
    /// through the subtree. Hidden widgets are skipped by painting and
    /// hit-test-inert; hiding resets transient pointer state.
    pub fn set_displayed(&mut self, id: WidgetId, displayed: bool) {
        let Some(widget) = self.widget_mut(id) else { return };
        if widget.displayed == displayed {
            return;
        }
        widget.displayed = displayed;
        self.update_effective_display(id);
    }

    /// Local-only visibility: suppresses painting, never propagates and
    /// never affects hit-testing.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        let Some(widget) = self.widget_mut(id) else { return };
        if widget.visible == visible {
            return;
        }
        widget.visible = visible;
        if !visible {
            widget.reset_transient();
        }
    }

    /// Disabled widgets ignore Down/Up; Enter/Leave/Move still flow.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if let Some(widget) = self.widget_mut(id) {
            widget.enabled = enabled;
        }
    }

    /// Opt this container into clipping its descendants' hit areas.
    pub fn set_clip_children(&mut self, id: WidgetId, clip: bool) {
        if let Some(widget) = self.widget_mut(id) {
            widget.clip_children = clip;
        }
    }

    /// Let pointer events fall through this widget to whatever is
    /// underneath; children still receive events.
    pub fn set_pointer_transparent(&mut self, id: WidgetId, transparent: bool) {
        if let Some(widget) = self.widget_mut(id) {
            widget.pointer_transparent = transparent;
        }
    }

    pub fn set_auto_width(&mut self, id: WidgetId, auto: bool) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.auto_width = auto;
        self.invalidate_layout(id);
    }

    pub fn set_auto_height(&mut self, id: WidgetId, auto: bool) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.auto_height = auto;
        self.invalidate_layout(id);
    }

    /// Request a share of leftover main-axis space from the parent's
    /// flex layout.
    pub fn set_grow(&mut self, id: WidgetId, grow: bool) {
        let Some(widget) = self.widget_mut(id) else { return };
        widget.grow = grow;
        self.invalidate_layout(id);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Logical rectangle as set by client code.
    pub fn logical_rect(&self, id: WidgetId) -> Option<Rect> {
        self.widget(id).map(|w| w.rect)
    }

    /// Effective rectangle in root-absolute coordinates.
    pub fn effective_rect(&self, id: WidgetId) -> Option<Rect> {
        self.widget(id).map(|w| w.effective_rect)
    }

    /// Effective rectangle minus border and padding: the content area.
    pub fn inner_rect(&self, id: WidgetId) -> Option<Rect> {
        self.widget(id)
            .map(|w| w.effective_rect.inset(&w.border.insets()).inset(&w.padding))
    }

    pub fn preferred_size(&self, id: WidgetId) -> Option<Size> {
        self.widget(id).map(|w| w.preferred)
    }

    /// The size layouts measure this widget at: the preferred hint
    /// where set, else the logical size, resolved per axis.
    pub fn layout_size(&self, id: WidgetId) -> Option<Size> {
        self.widget(id).map(|w| w.layout_size())
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widget(id).and_then(|w| w.parent)
    }

    /// Children in paint order (back to front). Empty for leaves.
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.children_of(id)
    }

    pub fn is_container(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.composite.is_some())
    }

    pub fn is_displayed(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.displayed)
    }

    pub fn is_effectively_displayed(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.effective_displayed)
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.visible)
    }

    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.enabled)
    }

    /// Hover state maintained by the pointer state machine. Leaf
    /// painters read this to select a hover appearance.
    pub fn is_hovered(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.hovered)
    }

    /// Press state maintained by the pointer state machine.
    pub fn is_pressed(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.pressed)
    }

    /// The outermost non-root ancestor: the top-level container a widget
    /// belongs to. None for the root itself and for detached tops.
    pub fn top_level_ancestor(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = id;
        loop {
            let parent = self.widget(current)?.parent?;
            if self.widget(parent)?.is_root {
                return Some(current);
            }
            current = parent;
        }
    }

    /// Hit test: the point must lie within the widget's effective
    /// rectangle and within the effective rectangle of every ancestor
    /// that clips its children.
    pub fn point_in_widget(&self, id: WidgetId, p: Point) -> bool {
        let Some(widget) = self.widget(id) else { return false };
        let mut clip = widget.effective_rect;
        let mut ancestor = widget.parent;
        while let Some(ancestor_id) = ancestor {
            let Some(a) = self.widget(ancestor_id) else { break };
            if a.clip_children {
                clip = clip.intersect(&a.effective_rect);
            }
            ancestor = a.parent;
        }
        clip.contains(p)
    }

    // =========================================================================
    // Effective geometry maintenance
    // =========================================================================

    /// Recompute the widget's effective rectangle from logical state.
    ///
    /// The extent resolves through the preferred hint (layouts record
    /// auto-sized content there), falling back to the logical size.
    /// No-op when the parent owns a layout; placed geometry is written
    /// only through the layout pass.
    pub(crate) fn refresh_effective(&mut self, id: WidgetId) {
        let Some(widget) = self.widget(id) else { return };
        let size = widget.layout_size();
        let effective = match widget.parent {
            Some(parent_id) => {
                let Some(parent) = self.widget(parent_id) else { return };
                if parent.has_layout() {
                    return;
                }
                let inner = parent.effective_rect.inset(&parent.border.insets()).inset(&parent.padding);
                let margin = widget.margin;
                let rect = widget.rect;
                Rect::from_pos_size(
                    inner.left + margin.left + rect.left,
                    inner.top + margin.top + rect.top,
                    size.width,
                    size.height,
                )
            }
            None => Rect::from_pos_size(widget.rect.left, widget.rect.top, size.width, size.height),
        };
        if let Some(widget) = self.widget_mut(id) {
            if widget.effective_rect != effective {
                trace!(widget = id.0, ?effective, "effective geometry refreshed");
            }
            widget.effective_rect = effective;
        }
    }

    /// Pure-move refresh: recompute this widget's effective origin and
    /// shift the whole subtree by the same delta.
    fn refresh_position(&mut self, id: WidgetId) {
        let Some(old) = self.widget(id).map(|w| w.effective_rect) else { return };
        self.refresh_effective(id);
        let Some(new) = self.widget(id).map(|w| w.effective_rect) else { return };
        let dx = new.left - old.left;
        let dy = new.top - old.top;
        if dx != 0 || dy != 0 {
            self.translate_children(id, dx, dy);
        }
    }

    fn translate_children(&mut self, id: WidgetId, dx: i32, dy: i32) {
        for child in self.children_of(id) {
            if let Some(widget) = self.widget_mut(child) {
                widget.effective_rect = widget.effective_rect.translate(dx, dy);
            }
            self.translate_children(child, dx, dy);
        }
    }

    /// Recompute `effective_displayed` for a subtree: own flag ∧ parent
    /// effective flag. Turning off resets transient pointer state.
    pub(crate) fn update_effective_display(&mut self, id: WidgetId) {
        let Some(widget) = self.widget(id) else { return };
        let parent_effective = widget
            .parent
            .and_then(|p| self.widget(p))
            .map(|p| p.effective_displayed)
            .unwrap_or(true);
        let effective = widget.displayed && parent_effective;
        if let Some(widget) = self.widget_mut(id) {
            widget.effective_displayed = effective;
            if !effective {
                widget.reset_transient();
            }
        }
        for child in self.children_of(id) {
            self.update_effective_display(child);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;

    #[test]
    fn test_root_lifecycle_errors() {
        let mut ui = Ui::new();
        assert_eq!(ui.root(), Err(UiError::RootMissing));

        let root = ui.create_root(800, 600).unwrap();
        assert_eq!(ui.root(), Ok(root));
        assert_eq!(ui.effective_rect(root), Some(Rect::new(0, 0, 800, 600)));

        assert_eq!(ui.create_root(100, 100), Err(UiError::RootAlreadyExists));

        // The root cannot be destroyed or reparented
        ui.destroy(root);
        assert!(ui.is_alive(root));
        let other = ui.create_container();
        ui.add_child(other, root);
        assert_eq!(ui.parent(root), None);
    }

    #[test]
    fn test_logical_rect_round_trip() {
        let mut ui = Ui::new();
        let w = ui.create_widget();
        ui.set_pos_size(w, 3, 4, 20, 10);
        assert_eq!(ui.logical_rect(w), Some(Rect::new(3, 4, 23, 14)));
    }

    #[test]
    fn test_add_remove_child() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let a = ui.create_widget();
        let b = ui.create_widget();

        ui.add_child(root, a);
        ui.add_child(root, b);
        assert_eq!(ui.children(root), vec![a, b]);
        assert_eq!(ui.parent(a), Some(root));

        // Removing a non-member is a no-op
        let stray = ui.create_widget();
        ui.remove_child(root, stray);
        assert_eq!(ui.children(root), vec![a, b]);

        ui.remove_child(root, a);
        assert_eq!(ui.children(root), vec![b]);
        assert_eq!(ui.parent(a), None);

        ui.remove_all_children(root);
        assert!(ui.children(root).is_empty());
        assert_eq!(ui.parent(b), None);
    }

    #[test]
    fn test_reparent_while_attached_is_rejected() {
        let mut ui = Ui::new();
        let first = ui.create_container();
        let second = ui.create_container();
        let child = ui.create_widget();

        ui.add_child(first, child);
        ui.add_child(second, child);

        assert_eq!(ui.parent(child), Some(first));
        assert!(ui.children(second).is_empty());

        // Explicit remove-then-add works
        ui.remove_child(first, child);
        ui.add_child(second, child);
        assert_eq!(ui.parent(child), Some(second));
    }

    #[test]
    fn test_add_child_rejects_cycles_and_leaves() {
        let mut ui = Ui::new();
        let outer = ui.create_container();
        let inner = ui.create_container();
        ui.add_child(outer, inner);

        // outer lives above inner; attaching it under inner would cycle
        ui.add_child(inner, outer);
        assert!(ui.children(inner).is_empty());

        // A leaf never accepts children
        let leaf = ui.create_widget();
        let orphan = ui.create_widget();
        ui.add_child(leaf, orphan);
        assert_eq!(ui.parent(orphan), None);

        // Self-attachment is ignored
        ui.add_child(outer, outer);
        assert_eq!(ui.children(outer), vec![inner]);
    }

    #[test]
    fn test_destroy_frees_subtree_and_reuses_slots() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let panel = ui.create_container();
        let leaf = ui.create_widget();
        ui.add_child(root, panel);
        ui.add_child(panel, leaf);

        assert_eq!(ui.widget_count(), 3);
        ui.destroy(panel);
        assert!(!ui.is_alive(panel));
        assert!(!ui.is_alive(leaf));
        assert!(ui.children(root).is_empty());
        assert_eq!(ui.widget_count(), 1);

        // Freed slots are reused
        let recycled = ui.create_widget();
        assert!(recycled == panel || recycled == leaf);
    }

    #[test]
    fn test_effective_display_propagation() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let panel = ui.create_container();
        let leaf = ui.create_widget();
        ui.add_child(root, panel);
        ui.add_child(panel, leaf);

        assert!(ui.is_effectively_displayed(leaf));

        ui.set_displayed(panel, false);
        assert!(!ui.is_effectively_displayed(panel));
        assert!(!ui.is_effectively_displayed(leaf));
        // The leaf's own flag is untouched
        assert!(ui.is_displayed(leaf));

        ui.set_displayed(panel, true);
        assert!(ui.is_effectively_displayed(leaf));
    }

    #[test]
    fn test_visible_is_local_only() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let panel = ui.create_container();
        let leaf = ui.create_widget();
        ui.add_child(root, panel);
        ui.add_child(panel, leaf);

        ui.set_visible(panel, false);
        assert!(!ui.is_visible(panel));
        assert!(ui.is_visible(leaf));
        assert!(ui.is_effectively_displayed(panel));
    }

    #[test]
    fn test_effective_geometry_follows_parent_inner_area() {
        let mut ui = Ui::new();
        let root = ui.create_root(200, 200).unwrap();
        let panel = ui.create_container();
        ui.add_child(root, panel);
        ui.set_pos_size(panel, 10, 10, 100, 100);
        ui.set_padding(panel, Insets::all(5));
        ui.set_border(panel, 2, Color::BLACK, BorderSides::ALL);

        let leaf = ui.create_widget();
        ui.add_child(panel, leaf);
        ui.set_pos_size(leaf, 1, 2, 30, 20);
        ui.set_margin(leaf, Insets::new(3, 0, 4, 0));

        // Panel inner area starts at 10 + 2 (border) + 5 (padding)
        assert_eq!(ui.inner_rect(panel), Some(Rect::new(17, 17, 103, 103)));
        // Leaf offset by margin + logical origin inside that area
        assert_eq!(
            ui.effective_rect(leaf),
            Some(Rect::from_pos_size(17 + 4 + 1, 17 + 3 + 2, 30, 20))
        );
    }

    #[test]
    fn test_set_pos_translates_subtree_without_relayout() {
        let mut ui = Ui::new();
        let root = ui.create_root(300, 300).unwrap();
        let panel = ui.create_container();
        let leaf = ui.create_widget();
        ui.add_child(root, panel);
        ui.add_child(panel, leaf);
        ui.set_pos_size(panel, 0, 0, 100, 100);
        ui.set_pos_size(leaf, 5, 5, 10, 10);

        let before = ui.effective_rect(leaf).unwrap();
        ui.set_pos(panel, 20, 30);
        let after = ui.effective_rect(leaf).unwrap();
        assert_eq!(after, before.translate(20, 30));
        assert_eq!(ui.effective_rect(panel).unwrap().origin(), Point::new(20, 30));
    }

    #[test]
    fn test_hit_test_respects_clipping_ancestors() {
        let mut ui = Ui::new();
        let root = ui.create_root(200, 200).unwrap();
        let clipper = ui.create_container();
        let leaf = ui.create_widget();
        ui.add_child(root, clipper);
        ui.add_child(clipper, leaf);
        ui.set_pos_size(clipper, 0, 0, 50, 50);
        // Leaf pokes out of the clipper on the right
        ui.set_pos_size(leaf, 30, 10, 40, 10);

        // Without clipping the overhang is hittable
        assert!(ui.point_in_widget(leaf, Point::new(60, 15)));

        ui.set_clip_children(clipper, true);
        assert!(ui.point_in_widget(leaf, Point::new(40, 15)));
        assert!(!ui.point_in_widget(leaf, Point::new(60, 15)));
    }

    #[test]
    fn test_top_level_ancestor() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let window = ui.create_container();
        let row = ui.create_container();
        let leaf = ui.create_widget();
        ui.add_child(root, window);
        ui.add_child(window, row);
        ui.add_child(row, leaf);

        assert_eq!(ui.top_level_ancestor(leaf), Some(window));
        assert_eq!(ui.top_level_ancestor(window), Some(window));
        assert_eq!(ui.top_level_ancestor(root), None);

        let detached = ui.create_widget();
        assert_eq!(ui.top_level_ancestor(detached), None);
    }

    #[test]
    fn test_detach_resets_transient_state() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let leaf = ui.create_widget();
        ui.add_child(root, leaf);
        ui.set_pos_size(leaf, 0, 0, 50, 50);

        // Force transient state through the arena
        if let Some(w) = ui.widget_mut(leaf) {
            w.hovered = true;
            w.pressed = true;
            w.press_started_inside = true;
        }
        ui.remove_child(root, leaf);
        assert!(!ui.is_hovered(leaf));
        assert!(!ui.is_pressed(leaf));
    }
}
