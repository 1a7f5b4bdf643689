//! Per-widget state stored in the [`Ui`](crate::Ui) arena.
//!
//! A widget is not an object the client holds. It is a slot in the arena,
//! addressed by a [`WidgetId`]. Leaf and container widgets share one
//! record; the composite capability (children + layout) is a tagged
//! option, not a subclass.

use std::rc::Rc;

use crate::input::PointerEvent;
use crate::layout::Layout;
use crate::render::Surface;
use crate::types::{Border, Color, Insets, Rect, Size};
use crate::Ui;

// =============================================================================
// Handles
// =============================================================================

/// Handle to a widget slot inside a [`Ui`] arena.
///
/// Ids are plain indices. A destroyed widget's id goes back to a free
/// pool for reuse; every arena query tolerates stale ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub(crate) usize);

/// Identifier of a registered pointer listener.
///
/// Ids start at 1; 0 is reserved as the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Sentinel returned when registration targets a stale widget.
    pub const INVALID: Self = Self(0);

    /// Check if this id refers to a registered listener.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

// =============================================================================
// Callbacks
// =============================================================================

/// Paint callback: receives the opaque surface and the widget's
/// effective rectangle.
pub type PaintFn = dyn Fn(&mut dyn Surface, Rect);

/// Pointer callback: receives the context mutably so listeners can
/// mutate the tree, and the event being broadcast.
pub type PointerCallback = dyn Fn(&mut Ui, &PointerEvent);

pub(crate) struct PointerListener {
    pub(crate) id: ListenerId,
    pub(crate) callback: Rc<PointerCallback>,
}

// =============================================================================
// Composite capability
// =============================================================================

/// Ordered child list plus at most one layout strategy.
///
/// Child order is paint order, back to front.
pub(crate) struct Composite {
    pub(crate) children: Vec<WidgetId>,
    pub(crate) layout: Option<Box<dyn Layout>>,
}

impl Composite {
    pub(crate) fn new() -> Self {
        Self { children: Vec::new(), layout: None }
    }
}

// =============================================================================
// Widget record
// =============================================================================

pub(crate) struct Widget {
    /// Non-owning back-reference, valid only while attached.
    pub(crate) parent: Option<WidgetId>,

    /// Logical rectangle, as set by client code, relative to the parent's
    /// inner area.
    pub(crate) rect: Rect,
    /// Effective rectangle in root-absolute coordinates. Computed; never
    /// the source of truth.
    pub(crate) effective_rect: Rect,
    /// Measurement hint consumed by layouts. Zero means unset.
    pub(crate) preferred: Size,

    pub(crate) padding: Insets,
    pub(crate) margin: Insets,
    pub(crate) border: Border,
    pub(crate) background: Color,

    // Display state
    pub(crate) displayed: bool,
    /// Own flag ∧ every ancestor's effective flag.
    pub(crate) effective_displayed: bool,
    /// Local-only paint suppression; no propagation, no hit-test effect.
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) clip_children: bool,
    /// Skip the widget's own state machine so events fall through.
    pub(crate) pointer_transparent: bool,

    // Layout flags
    pub(crate) auto_width: bool,
    pub(crate) auto_height: bool,
    pub(crate) grow: bool,

    // Transient pointer state
    pub(crate) hovered: bool,
    pub(crate) pressed: bool,
    pub(crate) press_started_inside: bool,

    pub(crate) listeners: Vec<PointerListener>,
    pub(crate) next_listener_id: u64,

    pub(crate) paint: Option<Rc<PaintFn>>,

    /// Present on containers, absent on leaves.
    pub(crate) composite: Option<Composite>,
    pub(crate) is_root: bool,
}

impl Widget {
    pub(crate) fn new_leaf() -> Self {
        Self {
            parent: None,
            rect: Rect::ZERO,
            effective_rect: Rect::ZERO,
            preferred: Size::default(),
            padding: Insets::ZERO,
            margin: Insets::ZERO,
            border: Border::NONE,
            background: Color::TRANSPARENT,
            displayed: true,
            effective_displayed: true,
            visible: true,
            enabled: true,
            clip_children: false,
            pointer_transparent: false,
            auto_width: false,
            auto_height: false,
            grow: false,
            hovered: false,
            pressed: false,
            press_started_inside: false,
            listeners: Vec::new(),
            next_listener_id: 1,
            paint: None,
            composite: None,
            is_root: false,
        }
    }

    pub(crate) fn new_container() -> Self {
        let mut widget = Self::new_leaf();
        widget.composite = Some(Composite::new());
        widget
    }

    /// Clear hover/press tracking. Called on detach, on hide, and when
    /// the effective display state turns off.
    pub(crate) fn reset_transient(&mut self) {
        self.hovered = false;
        self.pressed = false;
        self.press_started_inside = false;
    }

    /// Size a layout measures the widget at: the preferred hint where
    /// set, else the logical size. Resolved per axis.
    pub(crate) fn layout_size(&self) -> Size {
        Size::new(
            if self.preferred.width > 0 { self.preferred.width } else { self.rect.width() },
            if self.preferred.height > 0 { self.preferred.height } else { self.rect.height() },
        )
    }

    pub(crate) fn has_layout(&self) -> bool {
        self.composite.as_ref().is_some_and(|c| c.layout.is_some())
    }
}
