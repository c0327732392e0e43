//! Strokes for highlight outlines and glow rings.
//!
//! ```
//! use showcase_core::draw::StrokeDefinition;
//! use showcase_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("white").unwrap(), 2.0);
//! let rect = svg_element::Rectangle::new()
//!     .set("width", 100)
//!     .set("height", 50);
//!
//! let rect = showcase_core::apply_stroke!(rect, &stroke);
//! ```

use crate::color::Color;

/// A solid stroke hugging a highlighted rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Apply stroke color, opacity and width to an SVG element with no fill.
/// Corners are always rounded so rings follow the target smoothly.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {
        $element
            .set("fill", "none")
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linejoin", "round")
    };
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::new(Color::new("white").unwrap().with_alpha(0.4), 3.0);
        let rendered = crate::apply_stroke!(svg_element::Rectangle::new(), &stroke).to_string();

        assert!(rendered.contains(r#"stroke-width="3""#));
        assert!(rendered.contains(r#"stroke-opacity="0.4""#));
        assert!(rendered.contains(r#"stroke-linejoin="round""#));
        assert!(rendered.contains(r#"fill="none""#));
    }
}
