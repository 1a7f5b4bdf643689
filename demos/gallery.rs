//! Gallery demo - a panel of buttons laid out with flex.
//!
//! This demo demonstrates the core pieces working together:
//! - Building a tree through the Ui context
//! - A column panel with spacing, padding and auto height
//! - Paint callbacks reading hover/press state
//! - Driving pointer samples through the dispatcher
//!
//! The surface just logs drawing calls, standing in for whatever the
//! host paints with.
//!
//! Run with: cargo run --example gallery

use std::cell::Cell;
use std::rc::Rc;

use glint_ui::{
    BorderSides, Color, FlexLayout, Insets, Point, PointerButton, PointerEvent, PointerKind, Rect,
    Surface, Ui,
};

/// Surface that prints every drawing call.
struct LogSurface;

impl Surface for LogSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        println!(
            "  fill   ({:4},{:4})-({:4},{:4}) argb({},{},{},{})",
            rect.left, rect.top, rect.right, rect.bottom, color.a, color.r, color.g, color.b
        );
    }
    fn stroke_line(&mut self, from: Point, to: Point, thickness: i32, color: Color) {
        println!(
            "  line   ({:4},{:4})-({:4},{:4}) w={} argb({},{},{},{})",
            from.x, from.y, to.x, to.y, thickness, color.a, color.r, color.g, color.b
        );
    }
    fn save(&mut self) {
        println!("  save");
    }
    fn restore(&mut self) {
        println!("  restore");
    }
}

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut ui = Ui::new();
    let root = ui.create_root(640, 480).unwrap();

    // Panel growing to its content, centered buttons
    let panel = ui.create_container();
    ui.set_pos_size(panel, 40, 40, 200, 0);
    ui.set_auto_height(panel, true);
    ui.set_padding(panel, Insets::all(8));
    ui.set_background(panel, Color::argb(230, 30, 30, 30));
    ui.set_border(panel, 1, Color::GRAY, BorderSides::ALL);
    ui.set_layout(panel, FlexLayout::column().with_spacing(6));
    ui.add_child(root, panel);

    let clicks = Rc::new(Cell::new(0u32));
    for label in ["Start", "Options", "Quit"] {
        let button = ui.create_widget();
        ui.set_size(button, 120, 28);
        ui.add_child(panel, button);

        ui.set_paint(button, move |surface, rect| {
            surface.fill_rect(rect, Color::rgb(60, 60, 60));
        });
        ui.set_border(button, 1, Color::WHITE, BorderSides::ALL);

        let clicks = clicks.clone();
        ui.add_pointer_listener(button, move |_, event| {
            if event.kind == PointerKind::Click {
                clicks.set(clicks.get() + 1);
                println!("clicked: {label}");
            }
        });
    }

    println!("panel rect: {:?}", ui.effective_rect(panel).unwrap());

    println!("\n-- render --");
    ui.render(&mut LogSurface).unwrap();

    println!("\n-- click the first button --");
    ui.dispatch_pointer(PointerEvent::move_to(100, 60)).unwrap();
    ui.dispatch_pointer(PointerEvent::down(PointerButton::Left, 100, 60)).unwrap();
    ui.dispatch_pointer(PointerEvent::up(PointerButton::Left, 100, 60)).unwrap();

    println!("\ntotal clicks: {}", clicks.get());
}
