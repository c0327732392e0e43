//! Collaborator traits supplied by the embedding UI host.
//!
//! The controller owns one boxed instance of each trait and never reaches into
//! the host any other way. [`headless`] has in-memory implementations used by
//! tests and the preview CLI.

pub mod headless;

use std::{fmt, time::Duration};

use showcase_core::{
    draw::{PersistentLayer, Text, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{config::StyleConfig, error::ShowcaseError};

/// The view that hosts the overlay.
pub trait Container: fmt::Debug {
    /// Bounds of the container in its own coordinate space.
    fn bounds(&self) -> Bounds;

    fn safe_area_insets(&self) -> Insets;

    /// Adds the full-size overlay on top of the container's content.
    fn attach_overlay(&mut self);

    fn detach_overlay(&mut self);
}

/// Drawing surface backing the overlay.
pub trait RenderSurface: fmt::Debug {
    /// Installs a layer that keeps animating between redraws.
    fn add_persistent_layer(&mut self, layer: PersistentLayer);

    /// Removes the installed layer. A no-op when none is installed.
    fn remove_persistent_layer(&mut self);

    fn request_redraw(&mut self);
}

/// Handle returned by [`TargetElement::subscribe_frame_changes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The UI element being highlighted.
pub trait TargetElement: fmt::Debug {
    /// Bounds in the element's own coordinate space.
    fn bounds_in_own_space(&self) -> Bounds;

    /// Converts a rectangle from the element's space to container space.
    fn convert_rect_to_container(&self, rect: Bounds) -> Bounds;

    /// Whether a container-space point hits the element.
    fn point_inside_hit_area(&self, point: Point) -> bool;

    /// Starts frame-change notifications. The host reports changes by calling
    /// [`ShowcaseController::on_target_frame_changed`](crate::ShowcaseController::on_target_frame_changed).
    fn subscribe_frame_changes(&mut self) -> SubscriptionId;

    fn unsubscribe_frame_changes(&mut self, id: SubscriptionId);
}

/// Key/value flag storage used to show an overlay at most once.
pub trait PersistenceStore: fmt::Debug {
    fn has_flag(&self, key: &str) -> bool;

    fn set_flag(&mut self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Opacity animation of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    direction: FadeDirection,
    duration: Duration,
}

impl Fade {
    pub fn new(direction: FadeDirection, duration: Duration) -> Self {
        Self {
            direction,
            duration,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Outcome of starting a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStatus {
    /// The fade completed synchronously.
    Finished,
    /// The host finishes later. For fade-outs it must then call
    /// [`ShowcaseController::finish_fade_out`](crate::ShowcaseController::finish_fade_out).
    InFlight,
}

pub trait Animator: fmt::Debug {
    fn fade(&mut self, fade: Fade) -> FadeStatus;
}

/// Kind of text being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Message,
    Button,
}

/// Measures wrapped text.
pub trait TextMeasure: fmt::Debug {
    /// Size of `text` wrapped to `max_width`.
    fn measure(&self, text: &str, role: TextRole, max_width: f32) -> Size;
}

/// [`TextMeasure`] backed by font shaping.
#[derive(Debug, Clone)]
pub struct FontTextMeasure {
    title: TextDefinition,
    message: TextDefinition,
    button: TextDefinition,
}

impl FontTextMeasure {
    /// Builds a measurer from the text styles in `style`.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Color`] if a text color is invalid.
    pub fn from_style(style: &StyleConfig) -> Result<Self, ShowcaseError> {
        Ok(Self {
            title: style.title().text_definition()?,
            message: style.message().text_definition()?,
            button: style.button().text_definition()?,
        })
    }

    /// Returns the text definition used for `role`.
    pub fn definition(&self, role: TextRole) -> &TextDefinition {
        match role {
            TextRole::Title => &self.title,
            TextRole::Message => &self.message,
            TextRole::Button => &self.button,
        }
    }
}

impl TextMeasure for FontTextMeasure {
    fn measure(&self, text: &str, role: TextRole, max_width: f32) -> Size {
        Text::new(self.definition(role), text).measure(max_width)
    }
}

/// The collaborators a controller drives.
#[derive(Debug)]
pub struct Host {
    pub(crate) container: Box<dyn Container>,
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) animator: Box<dyn Animator>,
    pub(crate) text_measure: Box<dyn TextMeasure>,
}

impl Host {
    pub fn new(
        container: impl Container + 'static,
        surface: impl RenderSurface + 'static,
        animator: impl Animator + 'static,
        text_measure: impl TextMeasure + 'static,
    ) -> Self {
        Self {
            container: Box::new(container),
            surface: Box::new(surface),
            animator: Box::new(animator),
            text_measure: Box::new(text_measure),
        }
    }
}
