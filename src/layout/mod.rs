//! Layout: geometry-assignment strategies and the invalidation walk.
//!
//! A [`Layout`] repositions a container's children and may resize the
//! container itself. Computed geometry is written only through
//! [`LayoutPass`], the mutation capability handed to layout
//! implementations for the duration of one pass. Everywhere else the
//! effective rectangle is read-only.
//!
//! Invalidation is synchronous: a geometry mutation restarts layout at
//! the nearest ancestor owning a layout and recomputes that subtree
//! top-down before the mutating call returns.

mod flex;

pub use flex::FlexLayout;

use tracing::{trace, warn};

use crate::tree::WidgetId;
use crate::types::{Border, Insets, Rect, Size};
use crate::Ui;

/// Cap on restarts within one invalidation. Nested auto-sizing settles
/// in a handful of passes; hitting the cap indicates an oscillating
/// layout.
const MAX_LAYOUT_PASSES: usize = 32;

// =============================================================================
// Layout strategy
// =============================================================================

/// A pluggable geometry-assignment strategy bound to one container per
/// pass.
///
/// `inner` is the container's content area: its effective rectangle
/// minus border and padding, in root-absolute coordinates.
pub trait Layout {
    fn apply(&self, pass: &mut LayoutPass<'_>, container: WidgetId, inner: Rect);
}

// =============================================================================
// LayoutPass - the geometry-mutation capability
// =============================================================================

/// Read access to layout inputs plus the only writer of computed
/// rectangles. Handed exclusively to [`Layout::apply`].
pub struct LayoutPass<'a> {
    ui: &'a mut Ui,
}

impl LayoutPass<'_> {
    /// Children in layout order. Empty for stale ids and leaves.
    pub fn children(&self, container: WidgetId) -> Vec<WidgetId> {
        self.ui.children_of(container)
    }

    /// The size a child is measured at: preferred hint where set, else
    /// the logical size, resolved per axis.
    pub fn layout_size(&self, id: WidgetId) -> Size {
        self.ui.widget(id).map(|w| w.layout_size()).unwrap_or_default()
    }

    pub fn margin(&self, id: WidgetId) -> Insets {
        self.ui.widget(id).map(|w| w.margin).unwrap_or(Insets::ZERO)
    }

    pub fn padding(&self, id: WidgetId) -> Insets {
        self.ui.widget(id).map(|w| w.padding).unwrap_or(Insets::ZERO)
    }

    pub fn border(&self, id: WidgetId) -> Border {
        self.ui.widget(id).map(|w| w.border).unwrap_or(Border::NONE)
    }

    pub fn is_grow(&self, id: WidgetId) -> bool {
        self.ui.widget(id).is_some_and(|w| w.grow)
    }

    pub fn is_auto_width(&self, id: WidgetId) -> bool {
        self.ui.widget(id).is_some_and(|w| w.auto_width)
    }

    pub fn is_auto_height(&self, id: WidgetId) -> bool {
        self.ui.widget(id).is_some_and(|w| w.auto_height)
    }

    pub fn effective_rect(&self, id: WidgetId) -> Rect {
        self.ui.widget(id).map(|w| w.effective_rect).unwrap_or(Rect::ZERO)
    }

    pub fn preferred(&self, id: WidgetId) -> Size {
        self.ui.widget(id).map(|w| w.preferred).unwrap_or_default()
    }

    /// Write a placed rectangle, bypassing the logical-geometry setters.
    /// Layout-assigned geometry is not client intent.
    pub fn set_effective_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(widget) = self.ui.widget_mut(id) {
            widget.effective_rect = rect;
        }
    }

    /// Record a measured content size. Auto-sized containers publish
    /// their extent here so an enclosing layout measures the settled
    /// size on the next restart.
    pub fn set_preferred(&mut self, id: WidgetId, preferred: Size) {
        if let Some(widget) = self.ui.widget_mut(id) {
            widget.preferred = preferred;
        }
    }
}

// =============================================================================
// Invalidation & the top-down pass
// =============================================================================

impl Ui {
    /// Install a layout strategy on a container and relayout.
    pub fn set_layout(&mut self, container: WidgetId, layout: impl Layout + 'static) {
        let Some(composite) = self.widget_mut(container).and_then(|w| w.composite.as_mut())
        else {
            warn!(widget = container.0, "set_layout on a leaf or stale widget");
            return;
        };
        composite.layout = Some(Box::new(layout));
        self.invalidate_layout(container);
    }

    /// Restart layout at the nearest layout-owning ancestor and
    /// recompute its subtree top-down.
    ///
    /// A pass that changes an auto-sized container's measured extent
    /// triggers one restart: upward when the scope itself changed, in
    /// place when the change happened below it. The loop terminates at
    /// the measurement fixpoint.
    pub(crate) fn invalidate_layout(&mut self, id: WidgetId) {
        if self.widget(id).is_none() {
            return;
        }
        let mut scope = match self.parent(id) {
            Some(parent) => self.enclosing_layout_scope(parent),
            None => id,
        };
        let mut passes = 0;
        loop {
            passes += 1;
            if passes > MAX_LAYOUT_PASSES {
                warn!(scope = scope.0, "layout did not settle; giving up");
                break;
            }
            self.refresh_effective(scope);
            let scope_before = self.widget(scope).map(|w| w.preferred);
            let subtree_changed = self.perform_layout(scope);
            let scope_after = self.widget(scope).map(|w| w.preferred);
            if scope_before != scope_after {
                if let Some(parent) = self.parent(scope) {
                    scope = self.enclosing_layout_scope(parent);
                    continue;
                }
            }
            if subtree_changed {
                continue;
            }
            break;
        }
    }

    /// Nearest widget at or above `id` that owns a layout, else the
    /// topmost ancestor reached.
    fn enclosing_layout_scope(&self, id: WidgetId) -> WidgetId {
        let mut top = id;
        let mut current = Some(id);
        while let Some(widget_id) = current {
            if self.widget(widget_id).is_some_and(|w| w.has_layout()) {
                return widget_id;
            }
            top = widget_id;
            current = self.parent(widget_id);
        }
        top
    }

    /// One top-down pass over a subtree whose scope rectangle is
    /// already up to date.
    ///
    /// Returns whether any container's measured extent changed during
    /// its own layout application, which means an enclosing layout saw
    /// a stale size and must run again.
    pub(crate) fn perform_layout(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.widget(id) else { return false };
        if widget.composite.is_none() {
            return false;
        }
        let mut changed = false;
        if widget.has_layout() {
            let inner = widget
                .effective_rect
                .inset(&widget.border.insets())
                .inset(&widget.padding);
            // Take the strategy out so it can borrow the arena through the pass.
            let layout = self
                .widget_mut(id)
                .and_then(|w| w.composite.as_mut())
                .and_then(|c| c.layout.take());
            if let Some(layout) = layout {
                trace!(container = id.0, ?inner, "layout pass");
                let before = self.widget(id).map(|w| w.preferred);
                let mut pass = LayoutPass { ui: self };
                layout.apply(&mut pass, id, inner);
                let after = self.widget(id).map(|w| w.preferred);
                changed |= before != after;
                if let Some(composite) = self.widget_mut(id).and_then(|w| w.composite.as_mut()) {
                    composite.layout = Some(layout);
                }
            }
        } else {
            for child in self.children_of(id) {
                self.refresh_effective(child);
            }
        }
        for child in self.children_of(id) {
            changed |= self.perform_layout(child);
        }
        changed
    }
}
