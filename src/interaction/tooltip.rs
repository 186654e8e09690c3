//! Hover tooltip
//!
//! Placement is plain geometry on client-space rectangles so it can be computed
//! without a DOM. The tooltip sits above the hovered spine, flips below when it
//! would leave the top of the viewport, and is clamped horizontally.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Spacing rules for tooltip placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Distance between the spine and the tooltip
    pub gap: f64,
    /// Minimum distance from the viewport edges
    pub margin: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self { gap: 5.0, margin: 5.0 }
    }
}

/// Computed tooltip position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    /// Placed below the anchor instead of above
    pub below: bool,
}

/// Position a tooltip of `tip_width` x `tip_height` next to `anchor`
pub fn place_tooltip(
    anchor: Rect,
    tip_width: f64,
    tip_height: f64,
    viewport_width: f64,
    config: &TooltipConfig,
) -> TooltipPlacement {
    let above = anchor.top - tip_height - config.gap;
    let (top, below) = if above < config.margin {
        (anchor.bottom() + config.gap, true)
    } else {
        (above, false)
    };

    let max_left = viewport_width - tip_width - config.margin;
    let left = (anchor.center_x() - tip_width / 2.0)
        .min(max_left)
        .max(config.margin);

    TooltipPlacement { left, top, below }
}

/// What the tooltip currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub book_id: String,
    pub title: String,
    pub author: String,
}

/// Tooltip visibility
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    touch_primary: bool,
    current: Option<TooltipContent>,
}

impl TooltipState {
    /// `touch_primary` disables the tooltip for the whole session
    pub fn new(touch_primary: bool) -> Self {
        Self {
            touch_primary,
            current: None,
        }
    }

    pub fn is_touch_primary(&self) -> bool {
        self.touch_primary
    }

    /// Show `content` unless the device has no hover or a modal is open.
    /// Returns whether the tooltip is now visible.
    pub fn show(&mut self, content: TooltipContent, modal_open: bool) -> bool {
        if self.touch_primary || modal_open {
            self.current = None;
            return false;
        }
        self.current = Some(content);
        true
    }

    /// Hide when the pointer leaves `book_id`; leaving any other spine is ignored
    pub fn leave(&mut self, book_id: &str) -> bool {
        let hovering = self
            .current
            .as_ref()
            .is_some_and(|content| content.book_id == book_id);
        if hovering {
            self.current = None;
        }
        hovering
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&TooltipContent> {
        self.current.as_ref()
    }
}
