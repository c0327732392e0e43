//! Touch classification for a shown overlay.
//!
//! The overlay covers the whole container, so every touch reaches it. The
//! router decides what a touch means; the controller carries it out.

use showcase_core::geometry::Point;

/// What the controller should do with a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// The touch landed on the target and a tap-inside handler exists. The
    /// handler runs, then the overlay dismisses without the dismiss handler.
    RunTapInsideHandler,
    /// A dismiss button is present; touches outside it do nothing.
    Ignore,
    /// Dismiss and run the dismiss handler.
    DismissWithHandler,
}

impl TouchAction {
    /// Returns `Some(run_handler)` when the action ends in a dismissal.
    pub fn dismissal(self) -> Option<bool> {
        match self {
            Self::RunTapInsideHandler => Some(false),
            Self::Ignore => None,
            Self::DismissWithHandler => Some(true),
        }
    }
}

/// Classifies a touch at `point`.
///
/// `inside_target` is only consulted when `has_tap_inside_handler` is true.
pub fn classify(
    point: Point,
    inside_target: impl FnOnce(Point) -> bool,
    has_tap_inside_handler: bool,
    has_dismiss_button: bool,
) -> TouchAction {
    if has_tap_inside_handler && inside_target(point) {
        TouchAction::RunTapInsideHandler
    } else if has_dismiss_button {
        TouchAction::Ignore
    } else {
        TouchAction::DismissWithHandler
    }
}
