//! Single-axis flex layout.
//!
//! Two-pass algorithm over a container's children: measure fixed
//! lengths and count growers, then place along the main axis with a
//! justify-adjusted cursor and per-child cross alignment. A third step
//! resizes auto-sized containers to their content.

use crate::tree::WidgetId;
use crate::types::{AlignItems, FlexDirection, Insets, JustifyContent, Rect, Size};

use super::{Layout, LayoutPass};

/// Flexbox-style layout along one axis.
///
/// Configured at construction; install on a container with
/// [`Ui::set_layout`](crate::Ui::set_layout). Reinstalling with new
/// settings triggers a relayout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexLayout {
    direction: FlexDirection,
    spacing: i32,
    justify: JustifyContent,
    align: AlignItems,
}

impl FlexLayout {
    /// Create a layout along the given direction with no spacing.
    pub fn new(direction: FlexDirection) -> Self {
        Self {
            direction,
            spacing: 0,
            justify: JustifyContent::Start,
            align: AlignItems::Start,
        }
    }

    /// Horizontal layout.
    pub fn row() -> Self {
        Self::new(FlexDirection::Row)
    }

    /// Vertical layout.
    pub fn column() -> Self {
        Self::new(FlexDirection::Column)
    }

    /// Fixed gap between adjacent children.
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Main-axis distribution policy.
    pub fn with_justify(mut self, justify: JustifyContent) -> Self {
        self.justify = justify;
        self
    }

    /// Cross-axis placement policy.
    pub fn with_align(mut self, align: AlignItems) -> Self {
        self.align = align;
        self
    }

    pub fn direction(&self) -> FlexDirection {
        self.direction
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn justify(&self) -> JustifyContent {
        self.justify
    }

    pub fn align(&self) -> AlignItems {
        self.align
    }

    // =========================================================================
    // Axis helpers
    // =========================================================================

    fn main_start(&self, r: &Rect) -> i32 {
        if self.direction.is_row() { r.left } else { r.top }
    }

    fn cross_start(&self, r: &Rect) -> i32 {
        if self.direction.is_row() { r.top } else { r.left }
    }

    fn cross_end(&self, r: &Rect) -> i32 {
        if self.direction.is_row() { r.bottom } else { r.right }
    }

    fn main_length(&self, s: Size) -> i32 {
        if self.direction.is_row() { s.width } else { s.height }
    }

    fn cross_length(&self, s: Size) -> i32 {
        if self.direction.is_row() { s.height } else { s.width }
    }

    fn margin_main(&self, m: &Insets) -> i32 {
        if self.direction.is_row() { m.horizontal() } else { m.vertical() }
    }

    fn margin_cross(&self, m: &Insets) -> i32 {
        if self.direction.is_row() { m.vertical() } else { m.horizontal() }
    }

    fn margin_main_start(&self, m: &Insets) -> i32 {
        if self.direction.is_row() { m.left } else { m.top }
    }

    fn margin_main_end(&self, m: &Insets) -> i32 {
        if self.direction.is_row() { m.right } else { m.bottom }
    }

    fn margin_cross_start(&self, m: &Insets) -> i32 {
        if self.direction.is_row() { m.top } else { m.left }
    }

    fn margin_cross_end(&self, m: &Insets) -> i32 {
        if self.direction.is_row() { m.bottom } else { m.right }
    }

    fn main_is_auto(&self, auto_width: bool, auto_height: bool) -> bool {
        if self.direction.is_row() { auto_width } else { auto_height }
    }

    fn cross_is_auto(&self, auto_width: bool, auto_height: bool) -> bool {
        if self.direction.is_row() { auto_height } else { auto_width }
    }

    fn make_rect(&self, main_pos: i32, cross_pos: i32, main_len: i32, cross_len: i32) -> Rect {
        if self.direction.is_row() {
            Rect::new(main_pos, cross_pos, main_pos + main_len, cross_pos + cross_len)
        } else {
            Rect::new(cross_pos, main_pos, cross_pos + cross_len, main_pos + main_len)
        }
    }
}

impl Layout for FlexLayout {
    fn apply(&self, pass: &mut LayoutPass<'_>, container: WidgetId, inner: Rect) {
        let children = pass.children(container);
        if children.is_empty() {
            return;
        }

        let container_main = self.main_length(inner.size()).max(0);
        let container_cross = self.cross_length(inner.size()).max(0);

        // --- Pass 1: measure ---
        let mut fixed_total = 0;
        let mut growing = 0usize;
        let mut max_cross_extent = 0;

        for &child in &children {
            let size = pass.layout_size(child);
            let margin = pass.margin(child);
            let child_main = self.main_length(size).max(0);
            let child_cross = self.cross_length(size).max(0);

            if pass.is_grow(child) {
                growing += 1;
                fixed_total += self.margin_main(&margin); // margins still count
            } else {
                fixed_total += child_main + self.margin_main(&margin);
            }
            max_cross_extent = max_cross_extent.max(child_cross + self.margin_cross(&margin));
        }

        let count = children.len() as i32;
        let total_spacing = self.spacing * (count - 1).max(0);
        let mut remaining = (container_main - fixed_total - total_spacing).max(0);
        let mut remaining_growing = growing;

        // --- Pass 2: place ---
        let mut cursor = self.main_start(&inner);
        let mut effective_spacing = self.spacing;

        match self.justify {
            JustifyContent::Start => {}
            JustifyContent::Center => cursor += remaining / 2,
            JustifyContent::End => cursor += remaining,
            JustifyContent::SpaceBetween => {
                if count > 1 {
                    effective_spacing += remaining / (count - 1);
                }
            }
            JustifyContent::SpaceAround => {
                effective_spacing += remaining / count;
                cursor += effective_spacing / 2;
            }
            JustifyContent::SpaceEvenly => {
                effective_spacing += remaining / (count + 1);
                cursor += effective_spacing;
            }
        }

        for (i, &child) in children.iter().enumerate() {
            let size = pass.layout_size(child);
            let margin = pass.margin(child);

            let mut child_main = self.main_length(size).max(0);
            let mut child_cross = self.cross_length(size).max(0);

            let margin_main_start = self.margin_main_start(&margin);
            let margin_main_end = self.margin_main_end(&margin);
            let margin_cross_start = self.margin_cross_start(&margin);
            let margin_cross_end = self.margin_cross_end(&margin);

            // Growers split the leftover budget; the last one absorbs
            // integer-division remainder.
            if pass.is_grow(child) && remaining_growing > 0 {
                child_main = remaining / remaining_growing as i32;
                remaining_growing -= 1;
                remaining -= child_main;
            }

            let main_pos = cursor + margin_main_start;
            let cross_pos = match self.align {
                AlignItems::Start => self.cross_start(&inner) + margin_cross_start,
                AlignItems::Center => {
                    self.cross_start(&inner)
                        + (container_cross - child_cross - margin_cross_end - margin_cross_start) / 2
                        + margin_cross_start
                }
                AlignItems::End => self.cross_end(&inner) - child_cross - margin_cross_end,
                AlignItems::Stretch => {
                    child_cross = (container_cross - margin_cross_start - margin_cross_end).max(0);
                    self.cross_start(&inner) + margin_cross_start
                }
            };

            let placed = self.make_rect(main_pos, cross_pos, child_main, child_cross);
            pass.set_effective_rect(child, placed);

            cursor += child_main + margin_main_start + margin_main_end;
            if i + 1 < children.len() {
                cursor += effective_spacing;
            }
        }

        // --- Pass 3: container auto-size ---
        let auto_width = pass.is_auto_width(container);
        let auto_height = pass.is_auto_height(container);
        let padding = pass.padding(container);
        let border = pass.border(container).insets();

        // Stretch the main axis to the content, but only if at least one
        // child has a fixed length
        if self.main_is_auto(auto_width, auto_height) && growing < children.len() {
            let rect = pass.effective_rect(container);
            let resized = if self.direction.is_row() {
                Rect { right: cursor + padding.right + border.right, ..rect }
            } else {
                Rect { bottom: cursor + padding.bottom + border.bottom, ..rect }
            };
            pass.set_effective_rect(container, resized);
            let mut preferred = pass.preferred(container);
            if self.direction.is_row() {
                preferred.width = resized.width();
            } else {
                preferred.height = resized.height();
            }
            pass.set_preferred(container, preferred);
        }

        if self.cross_is_auto(auto_width, auto_height) {
            let rect = pass.effective_rect(container);
            let resized = if self.direction.is_row() {
                Rect { bottom: inner.top + max_cross_extent + padding.bottom + border.bottom, ..rect }
            } else {
                Rect { right: inner.left + max_cross_extent + padding.right + border.right, ..rect }
            };
            pass.set_effective_rect(container, resized);
            let mut preferred = pass.preferred(container);
            if self.direction.is_row() {
                preferred.height = resized.height();
            } else {
                preferred.width = resized.width();
            }
            pass.set_preferred(container, preferred);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
