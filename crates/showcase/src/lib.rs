//! Showcase - spotlight overlays that introduce a UI element to the user.
//!
//! An overlay dims the screen, highlights one target element with a glow and
//! places a title and message above or below it. The crate provides the pure
//! placement geometry, the lifecycle controller that keeps the overlay in sync
//! with a moving target, and an SVG exporter for previews. UI hosts plug in
//! through the traits in [`host`].
//!
//! # Examples
//!
//! ```
//! use showcase::{
//!     ShowcaseBuilder, ShowcaseState,
//!     host::{Host, headless::*},
//! };
//! use showcase_core::geometry::{Bounds, Point, Size};
//!
//! let host = Host::new(
//!     HeadlessContainer::new(Size::new(375.0, 812.0)),
//!     RecordingSurface::new(),
//!     ImmediateAnimator::new(),
//!     FixedTextMeasure::default(),
//! );
//!
//! let mut controller = ShowcaseBuilder::new("Compose", "Write a new message here")
//!     .build(host)
//!     .expect("default configuration is valid");
//!
//! let target = RectTarget::new(Bounds::new_from_top_left(
//!     Point::new(20.0, 700.0),
//!     Size::new(50.0, 50.0),
//! ));
//! controller.setup(Box::new(target), Point::default(), 4.0);
//! controller.show().expect("set up before showing");
//!
//! assert_eq!(controller.state(), ShowcaseState::Placed);
//! ```

pub mod config;
pub mod controller;
pub mod export;
pub mod host;
pub mod placement;
pub mod router;

mod error;

pub use showcase_core::{color, draw, geometry};

pub use controller::{
    ButtonFrame, ButtonId, ShowcaseBuilder, ShowcaseController, ShowcaseFrame, ShowcaseState,
    TargetSpec,
};
pub use error::ShowcaseError;
pub use router::TouchAction;
