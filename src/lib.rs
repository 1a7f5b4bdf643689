//! # glint-ui
//!
//! Retained-mode overlay UI toolkit for Rust.
//!
//! A tree of positionable, paintable widgets with a flex layout engine
//! and a pointer-event dispatcher, rendered onto a host-supplied
//! drawing surface. Built for embedding: the host owns the window and
//! the message loop, feeds raw pointer samples in, and hands an opaque
//! [`Surface`] over for painting.
//!
//! ## Architecture
//!
//! Widgets are slots in an arena owned by a [`Ui`] context, addressed
//! by copyable [`WidgetId`] handles:
//!
//! ```text
//! client mutation → invalidation → layout pass (top-down) → effective rects
//! pointer sample  → hit-test dispatch (topmost first) → Enter/Leave/Click
//! ```
//!
//! Every geometry mutation relayouts inline before the call returns;
//! there is no deferred or batched pass. Everything is single-threaded.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rect, Insets, Color, Border, flex enums)
//! - [`tree`] - The `Ui` arena, widget records, tree membership
//! - [`layout`] - Layout strategies and the invalidation walk
//! - [`input`] - Pointer events, state machine, dispatch
//! - [`render`] - Surface contract and the paint walk
//!
//! ## Example
//!
//! ```
//! use glint_ui::{FlexLayout, PointerButton, PointerEvent, Ui};
//!
//! let mut ui = Ui::new();
//! let root = ui.create_root(800, 600).unwrap();
//! ui.set_layout(root, FlexLayout::row().with_spacing(8));
//!
//! let button = ui.create_widget();
//! ui.set_size(button, 120, 32);
//! ui.add_child(root, button);
//! ui.add_pointer_listener(button, |_, event| {
//!     // react to event.kind here
//!     let _ = event;
//! });
//!
//! let handled = ui.dispatch_pointer(PointerEvent::down(PointerButton::Left, 10, 10)).unwrap();
//! assert!(handled);
//! ```

pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::UiError;

pub use input::{PointerButton, PointerEvent, PointerKind};

pub use layout::{FlexLayout, Layout, LayoutPass};

pub use render::{Surface, SurfaceStateScope};

pub use tree::{ListenerId, PaintFn, PointerCallback, Ui, WidgetId};
