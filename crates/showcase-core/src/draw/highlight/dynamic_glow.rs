//! Dynamic glow: a thin outline plus a pulsing persistent layer.

use std::time::Duration;

use svg::node::element as svg_element;

use super::{CORNER_RADIUS, HighlightStrategy, PersistentLayer, Pulse};
use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Bounds,
};

const OUTLINE_WIDTH: f32 = 1.5;

/// Animated glow. The pulse lives in the persistent layer returned by
/// [`HighlightStrategy::effect_region`]; `paint` only draws the outline.
#[derive(Debug, Clone)]
pub struct DynamicGlow {
    color: Color,
    glow_size: f32,
    duration: Duration,
    max_offset: f32,
}

impl DynamicGlow {
    pub fn new(color: Color, glow_size: f32, duration: Duration, max_offset: f32) -> Self {
        Self {
            color,
            glow_size,
            duration,
            max_offset,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn glow_size(&self) -> f32 {
        self.glow_size
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }
}

impl Default for DynamicGlow {
    fn default() -> Self {
        Self::new(
            Color::new("white").expect("'white' is a valid CSS color"),
            6.0,
            Duration::from_millis(1500),
            10.0,
        )
    }
}

impl HighlightStrategy for DynamicGlow {
    fn effect_region(&self, target: Bounds) -> Option<PersistentLayer> {
        Some(
            PersistentLayer::new(target, self.color, self.glow_size)
                .with_pulse(Pulse::new(self.duration, self.max_offset)),
        )
    }

    fn paint(&self, output: &mut LayeredOutput, target: Bounds) {
        let stroke = StrokeDefinition::new(self.color, OUTLINE_WIDTH);
        let rect = apply_stroke!(
            svg_element::Rectangle::new()
                .set("x", target.min_x())
                .set("y", target.min_y())
                .set("width", target.width())
                .set("height", target.height())
                .set("rx", CORNER_RADIUS),
            &stroke
        );
        output.add_to_layer(RenderLayer::Outline, Box::new(rect));
    }
}
