//! Dropdown demo - a floating overlay hosted by the root.
//!
//! A dropdown list cannot live inside its owner's subtree: ancestor
//! clipping would cut it off and siblings painted later would cover
//! it. The pattern is to attach the popup directly to the root,
//! positioned under the trigger in root coordinates at open time, and
//! to close it from a root listener when a press lands outside.
//!
//! Run with: cargo run --example dropdown

use glint_ui::{
    AlignItems, BorderSides, Color, FlexLayout, PointerButton, PointerEvent, PointerKind, Ui,
    WidgetId,
};

fn open_popup(ui: &mut Ui, trigger: WidgetId) -> WidgetId {
    let popup = ui.create_container();
    ui.set_background(popup, Color::argb(240, 25, 25, 25));
    ui.set_border(popup, 1, Color::GRAY, BorderSides::ALL);
    ui.set_auto_height(popup, true);
    // Stretch rows to fill the popup width
    ui.set_layout(popup, FlexLayout::column().with_align(AlignItems::Stretch));

    for item in 0..3 {
        let row = ui.create_widget();
        ui.set_size(row, 0, 22);
        ui.add_child(popup, row);
        ui.add_pointer_listener(row, move |_, event| {
            if event.kind == PointerKind::Click {
                println!("selected item {item}");
            }
        });
    }

    // Position under the trigger, in root space, at the moment it opens
    let anchor = ui.effective_rect(trigger).unwrap();
    ui.set_pos_size(popup, anchor.left, anchor.bottom, anchor.width(), 0);

    let root = ui.root().unwrap();
    ui.add_child(root, popup);
    popup
}

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut ui = Ui::new();
    let root = ui.create_root(400, 300).unwrap();

    let select = ui.create_widget();
    ui.set_pos_size(select, 50, 30, 120, 24);
    ui.set_border(select, 1, Color::WHITE, BorderSides::ALL);
    ui.add_child(root, select);

    let popup = open_popup(&mut ui, select);
    println!("popup opened at {:?}", ui.effective_rect(popup).unwrap());

    // Close on any press that lands outside the popup
    ui.add_pointer_listener(root, move |ui, event| {
        if event.kind == PointerKind::Down && !ui.point_in_widget(popup, event.pos) {
            let Ok(root) = ui.root() else { return };
            ui.remove_child(root, popup);
            println!("popup closed");
        }
    });

    // Click the second item, then click elsewhere
    ui.dispatch_pointer(PointerEvent::down(PointerButton::Left, 60, 90)).unwrap();
    ui.dispatch_pointer(PointerEvent::up(PointerButton::Left, 60, 90)).unwrap();
    ui.dispatch_pointer(PointerEvent::down(PointerButton::Left, 300, 250)).unwrap();

    println!("popup attached: {}", ui.parent(popup).is_some());
}
