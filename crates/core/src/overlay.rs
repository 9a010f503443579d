//! Dismiss-on-outside-interaction controller for dropdowns and popovers.
//!
//! A single [`OverlayController`] tracks the one overlay that may be open
//! at a time. Pointer events are routed through it instead of each
//! dropdown carrying its own outside-click listener.
//!
//! This is the client-side controller for the admin console's dropdown
//! screens (field type pickers, status filters, row action menus). The
//! HTTP service never drives it; it lives in core so the web client and
//! any native shell share one tested implementation.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OpenOverlay {
    id: String,
    bounds: Rect,
    /// The trigger element; presses on it are left to its own toggle.
    anchor: Option<Rect>,
}

/// Tracks the currently open overlay and decides when to dismiss it.
#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    open: Option<OpenOverlay>,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `id`, replacing (and returning) any overlay that was open.
    pub fn open(
        &mut self,
        id: impl Into<String>,
        bounds: Rect,
        anchor: Option<Rect>,
    ) -> Option<String> {
        self.open
            .replace(OpenOverlay {
                id: id.into(),
                bounds,
                anchor,
            })
            .map(|o| o.id)
    }

    /// Id of the open overlay.
    pub fn current(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.id.as_str())
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.current() == Some(id)
    }

    /// Open `id` if closed, close it if open. Returns whether it is open
    /// afterwards.
    pub fn toggle(&mut self, id: &str, bounds: Rect, anchor: Option<Rect>) -> bool {
        if self.is_open(id) {
            self.open = None;
            false
        } else {
            self.open(id, bounds, anchor);
            true
        }
    }

    /// Route a pointer press. Returns the id of the overlay it dismissed.
    pub fn pointer_down(&mut self, at: Point) -> Option<String> {
        let open = self.open.as_ref()?;
        let inside = open.bounds.contains(at) || open.anchor.is_some_and(|a| a.contains(at));
        if inside {
            None
        } else {
            self.open.take().map(|o| o.id)
        }
    }

    /// Escape always dismisses.
    pub fn escape(&mut self) -> Option<String> {
        self.open.take().map(|o| o.id)
    }

    /// Close `id` if it is the open overlay.
    pub fn close(&mut self, id: &str) -> bool {
        if self.is_open(id) {
            self.open = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: Rect = Rect {
        x: 100.0,
        y: 100.0,
        width: 200.0,
        height: 150.0,
    };
    const BUTTON: Rect = Rect {
        x: 100.0,
        y: 70.0,
        width: 80.0,
        height: 24.0,
    };

    fn pt(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_click_inside_keeps_open() {
        let mut overlays = OverlayController::new();
        overlays.open("status-filter", MENU, None);
        assert_eq!(overlays.pointer_down(pt(150.0, 120.0)), None);
        assert!(overlays.is_open("status-filter"));
    }

    #[test]
    fn test_click_outside_dismisses() {
        let mut overlays = OverlayController::new();
        overlays.open("status-filter", MENU, None);
        assert_eq!(
            overlays.pointer_down(pt(10.0, 10.0)).as_deref(),
            Some("status-filter")
        );
        assert_eq!(overlays.current(), None);
    }

    #[test]
    fn test_click_on_anchor_is_not_outside() {
        let mut overlays = OverlayController::new();
        overlays.open("row-actions", MENU, Some(BUTTON));
        assert_eq!(overlays.pointer_down(pt(120.0, 80.0)), None);
        assert!(overlays.is_open("row-actions"));
    }

    #[test]
    fn test_opening_second_replaces_first() {
        let mut overlays = OverlayController::new();
        overlays.open("a", MENU, None);
        assert_eq!(overlays.open("b", MENU, None).as_deref(), Some("a"));
        assert!(overlays.is_open("b"));
        assert!(!overlays.is_open("a"));
    }

    #[test]
    fn test_toggle_and_escape() {
        let mut overlays = OverlayController::new();
        assert!(overlays.toggle("menu", MENU, None));
        assert!(!overlays.toggle("menu", MENU, None));
        overlays.open("menu", MENU, None);
        assert_eq!(overlays.escape().as_deref(), Some("menu"));
        assert_eq!(overlays.escape(), None);
    }

    #[test]
    fn test_pointer_down_with_nothing_open() {
        let mut overlays = OverlayController::new();
        assert_eq!(overlays.pointer_down(pt(0.0, 0.0)), None);
    }

    #[test]
    fn test_close_only_matching() {
        let mut overlays = OverlayController::new();
        overlays.open("a", MENU, None);
        assert!(!overlays.close("b"));
        assert!(overlays.close("a"));
    }
}
