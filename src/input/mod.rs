//! Pointer input: event types, the widget state machine, dispatch.
//!
//! The host owns the message loop and raw-input translation; this
//! module owns everything after that, from hit-testing to Click
//! synthesis.

mod pointer;

pub use pointer::{PointerButton, PointerEvent, PointerKind};
