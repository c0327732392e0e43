//! Drawable components for overlay rendering.
//!
//! Everything that ends up on screen (the dim layer, highlight glows, text
//! blocks) is emitted as SVG nodes grouped by [`RenderLayer`] inside a
//! [`LayeredOutput`].

mod highlight;
mod layer;
mod stroke;
mod text;

pub use highlight::{DynamicGlow, HighlightStrategy, PersistentLayer, Pulse, StaticGlow};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::StrokeDefinition;
pub use text::{Text, TextBlock, TextDefinition};

use crate::geometry::{Point, Size};

/// Common interface for elements that can render themselves into layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element with its top-left corner at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the space this element occupies.
    fn size(&self) -> Size;
}
