//! Widget tree: arena storage, handles, tree membership.
//!
//! - [`Ui`] - the root context owning every widget record
//! - [`WidgetId`] - copyable arena handle
//! - Listener and paint callback types shared with input and rendering

pub(crate) mod widget;

mod ui;

pub use ui::Ui;
pub use widget::{ListenerId, PaintFn, PointerCallback, WidgetId};
