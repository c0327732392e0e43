//! Static glow: concentric rings that fade outward.

use svg::node::element as svg_element;

use super::{CORNER_RADIUS, HighlightStrategy, PersistentLayer};
use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Bounds,
};

/// Number of rings used to approximate the glow falloff.
const RING_COUNT: u8 = 4;

/// Fixed glow painted on every redraw. Has no time dimension and installs no
/// persistent layer.
#[derive(Debug, Clone)]
pub struct StaticGlow {
    color: Color,
    glow_size: f32,
}

impl StaticGlow {
    pub fn new(color: Color, glow_size: f32) -> Self {
        Self { color, glow_size }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn glow_size(&self) -> f32 {
        self.glow_size
    }
}

impl Default for StaticGlow {
    fn default() -> Self {
        Self::new(Color::new("white").expect("'white' is a valid CSS color"), 6.0)
    }
}

impl HighlightStrategy for StaticGlow {
    fn effect_region(&self, _target: Bounds) -> Option<PersistentLayer> {
        None
    }

    fn paint(&self, output: &mut LayeredOutput, target: Bounds) {
        let ring_width = self.glow_size / f32::from(RING_COUNT);
        let base_alpha = self.color.alpha();

        for ring in 0..RING_COUNT {
            let step = f32::from(ring);
            let alpha = base_alpha * (1.0 - step / f32::from(RING_COUNT));
            let stroke = StrokeDefinition::new(self.color.with_alpha(alpha), ring_width);
            let bounds = target.expand(ring_width * (step + 0.5));

            let rect = apply_stroke!(
                svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("rx", CORNER_RADIUS + ring_width * step),
                &stroke
            );
            output.add_to_layer(RenderLayer::Glow, Box::new(rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn target() -> Bounds {
        Bounds::new_from_top_left(Point::new(20.0, 700.0), Size::new(50.0, 50.0))
    }

    #[test]
    fn test_static_glow_has_no_persistent_layer() {
        assert!(StaticGlow::default().effect_region(target()).is_none());
    }

    #[test]
    fn test_static_glow_paints_rings() {
        let mut output = LayeredOutput::new();
        StaticGlow::default().paint(&mut output, target());

        assert_eq!(output.count_in_layer(RenderLayer::Glow), usize::from(RING_COUNT));
    }

    #[test]
    fn test_static_glow_is_deterministic() {
        let glow = StaticGlow::new(Color::new("gold").unwrap(), 8.0);

        let mut first = LayeredOutput::new();
        glow.paint(&mut first, target());
        let mut second = LayeredOutput::new();
        glow.paint(&mut second, target());

        let render = |output: LayeredOutput| -> String {
            output.render().iter().map(|n| n.to_string()).collect()
        };
        assert_eq!(render(first), render(second));
    }
}
