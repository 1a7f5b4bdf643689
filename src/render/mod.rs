//! Rendering: the drawing-surface contract and the paint walk.
//!
//! The toolkit never owns a framebuffer. The host hands an opaque
//! [`Surface`] to [`Ui::render`] and the tree paints itself onto it in
//! child order, back to front. Around every widget's painting the
//! surface state is saved and restored through a scope guard, so a
//! widget can never leak pen/brush/clip state into its siblings.

use tracing::trace;

use crate::error::UiError;
use crate::tree::WidgetId;
use crate::types::{Border, BorderEdge, Color, Point, Rect};
use crate::Ui;

// =============================================================================
// Surface contract
// =============================================================================

/// Host-supplied drawing surface.
///
/// `save`/`restore` bracket transient drawing state; the toolkit pairs
/// them for every widget it paints.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_line(&mut self, from: Point, to: Point, thickness: i32, color: Color);
    fn save(&mut self);
    fn restore(&mut self);
}

/// Scope guard pairing [`Surface::save`] with [`Surface::restore`].
///
/// Dropping the guard restores, including on early return.
pub struct SurfaceStateScope<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> SurfaceStateScope<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        self.surface
    }
}

impl Drop for SurfaceStateScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

// =============================================================================
// Paint walk
// =============================================================================

impl Ui {
    /// Paint the whole tree onto the surface.
    ///
    /// Fails only when no root exists.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), UiError> {
        let root = self.root()?;
        trace!("render pass");
        self.render_widget(root, surface);
        Ok(())
    }

    /// Template method for one widget: background, own paint, border,
    /// then children. Skips entirely unless the widget is effectively
    /// displayed and visible.
    fn render_widget(&self, id: WidgetId, surface: &mut dyn Surface) {
        let Some(widget) = self.widget(id) else { return };
        if !(widget.effective_displayed && widget.visible) {
            return;
        }
        let rect = widget.effective_rect;
        {
            let mut scope = SurfaceStateScope::new(surface);
            let surface = scope.surface();
            if !widget.background.is_transparent() {
                surface.fill_rect(rect, widget.background);
            }
            if let Some(paint) = &widget.paint {
                paint(surface, rect);
            }
            render_border(surface, &widget.border, rect);
        }
        for child in self.children_of(id) {
            self.render_widget(child, surface);
        }
    }

    /// Install the widget's paint callback, invoked between background
    /// and border with the effective rectangle.
    pub fn set_paint<F>(&mut self, id: WidgetId, paint: F)
    where
        F: Fn(&mut dyn Surface, Rect) + 'static,
    {
        if let Some(widget) = self.widget_mut(id) {
            widget.paint = Some(std::rc::Rc::new(paint));
        }
    }
}

/// Stroke the configured border edges along the inside of the rect.
fn render_border(surface: &mut dyn Surface, border: &Border, rect: Rect) {
    let edge = |surface: &mut dyn Surface, e: BorderEdge, from: Point, to: Point| {
        if e.thickness > 0 {
            surface.stroke_line(from, to, e.thickness, e.color);
        }
    };
    edge(
        surface,
        border.top,
        Point::new(rect.left, rect.top),
        Point::new(rect.right, rect.top),
    );
    edge(
        surface,
        border.bottom,
        Point::new(rect.left, rect.bottom - border.bottom.thickness),
        Point::new(rect.right, rect.bottom - border.bottom.thickness),
    );
    edge(
        surface,
        border.left,
        Point::new(rect.left, rect.top),
        Point::new(rect.left, rect.bottom),
    );
    edge(
        surface,
        border.right,
        Point::new(rect.right - border.right.thickness, rect.top),
        Point::new(rect.right - border.right.thickness, rect.bottom),
    );
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BorderSides;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Fill(Rect, Color),
        Line(Point, Point, i32, Color),
        Save,
        Restore,
    }

    /// Recording surface for asserting paint order and state scoping.
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Fill(rect, color));
        }
        fn stroke_line(&mut self, from: Point, to: Point, thickness: i32, color: Color) {
            self.ops.push(Op::Line(from, to, thickness, color));
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
    }

    #[test]
    fn test_render_requires_root() {
        let ui = Ui::new();
        let mut surface = Recorder::default();
        assert_eq!(ui.render(&mut surface), Err(UiError::RootMissing));
    }

    #[test]
    fn test_background_paint_border_order() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let panel = ui.create_widget();
        ui.set_pos_size(panel, 10, 10, 30, 20);
        ui.set_background(panel, Color::GRAY);
        ui.set_border(panel, 1, Color::BLACK, BorderSides::TOP);
        ui.add_child(root, panel);

        let marker = Rc::new(RefCell::new(None));
        let marker_clone = marker.clone();
        ui.set_paint(panel, move |surface, rect| {
            surface.fill_rect(rect, Color::WHITE);
            *marker_clone.borrow_mut() = Some(rect);
        });

        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();

        let rect = Rect::new(10, 10, 40, 30);
        assert_eq!(*marker.borrow(), Some(rect));
        assert_eq!(
            surface.ops,
            vec![
                // Root has nothing to draw beyond its scope
                Op::Save,
                Op::Restore,
                // Panel: background, own paint, border
                Op::Save,
                Op::Fill(rect, Color::GRAY),
                Op::Fill(rect, Color::WHITE),
                Op::Line(Point::new(10, 10), Point::new(40, 10), 1, Color::BLACK),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_state_scopes_balance_per_widget() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let a = ui.create_widget();
        let b = ui.create_widget();
        ui.add_child(root, a);
        ui.add_child(root, b);

        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();

        // One balanced save/restore pair per painted widget; no nesting
        // leaks between siblings
        let mut depth = 0;
        let mut pairs = 0;
        for op in &surface.ops {
            match op {
                Op::Save => depth += 1,
                Op::Restore => {
                    depth -= 1;
                    pairs += 1;
                }
                _ => {}
            }
            assert!(depth >= 0 && depth <= 1);
        }
        assert_eq!(depth, 0);
        assert_eq!(pairs, 3);
    }

    #[test]
    fn test_children_paint_back_to_front() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let below = ui.create_widget();
        let above = ui.create_widget();
        ui.set_pos_size(below, 0, 0, 50, 50);
        ui.set_pos_size(above, 0, 0, 50, 50);
        ui.set_background(below, Color::BLACK);
        ui.set_background(above, Color::WHITE);
        ui.add_child(root, below);
        ui.add_child(root, above);

        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();

        let fills: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(_, color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn test_render_gating() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let panel = ui.create_container();
        let leaf = ui.create_widget();
        ui.set_background(panel, Color::GRAY);
        ui.set_background(leaf, Color::WHITE);
        ui.add_child(root, panel);
        ui.add_child(panel, leaf);

        // Invisible container paints nothing, children included
        ui.set_visible(panel, false);
        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Fill(..))));

        // Visible again but not displayed: same outcome
        ui.set_visible(panel, true);
        ui.set_displayed(panel, false);
        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Fill(..))));

        ui.set_displayed(panel, true);
        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();
        let fills = surface.ops.iter().filter(|op| matches!(op, Op::Fill(..))).count();
        assert_eq!(fills, 2);
    }

    #[test]
    fn test_transparent_background_not_filled() {
        let mut ui = Ui::new();
        let root = ui.create_root(100, 100).unwrap();
        let leaf = ui.create_widget();
        ui.set_pos_size(leaf, 0, 0, 10, 10);
        ui.add_child(root, leaf);

        let mut surface = Recorder::default();
        ui.render(&mut surface).unwrap();
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Fill(..))));
    }
}
