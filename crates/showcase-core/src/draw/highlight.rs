//! Highlight strategies that paint the spotlight around a target.
//!
//! A [`HighlightStrategy`] is a pure function of the target rectangle and its
//! own configuration. Each redraw it paints into a [`LayeredOutput`], and it may
//! additionally describe a [`PersistentLayer`]: a visual that the rendering
//! surface keeps alive between redraws (for example a looping pulse).
//!
//! Two strategies are provided:
//!
//! - [`StaticGlow`] - concentric rings fading outward, no persistent layer
//! - [`DynamicGlow`] - a thin outline plus a pulsing persistent glow
//!
//! ```
//! # use showcase_core::draw::{DynamicGlow, HighlightStrategy, LayeredOutput, StaticGlow};
//! # use showcase_core::geometry::{Bounds, Point, Size};
//! let target = Bounds::new_from_top_left(Point::new(20.0, 700.0), Size::new(50.0, 50.0));
//!
//! let static_glow = StaticGlow::default();
//! assert!(static_glow.effect_region(target).is_none());
//!
//! let dynamic_glow = DynamicGlow::default();
//! let layer = dynamic_glow.effect_region(target).expect("dynamic glow pulses");
//! assert_eq!(layer.bounds(), target);
//!
//! let mut output = LayeredOutput::new();
//! static_glow.paint(&mut output, target);
//! assert!(!output.is_empty());
//! ```

mod dynamic_glow;
mod static_glow;

pub use dynamic_glow::DynamicGlow;
pub use static_glow::StaticGlow;

use std::{fmt, time::Duration};

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Bounds,
};

/// Corner radius shared by outlines and glow rings.
pub(crate) const CORNER_RADIUS: f32 = 6.0;

/// Visual effect drawn around the highlighted target.
pub trait HighlightStrategy: fmt::Debug {
    /// Describes the persistent layer for `target`, if this strategy has one.
    ///
    /// Every call returns an independent descriptor; the surface replaces any
    /// previously installed layer with it.
    fn effect_region(&self, target: Bounds) -> Option<PersistentLayer>;

    /// Paints the per-redraw part of the effect around `target`.
    fn paint(&self, output: &mut LayeredOutput, target: Bounds);
}

/// Looping pulse animation of a persistent layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    duration: Duration,
    max_offset: f32,
}

impl Pulse {
    pub fn new(duration: Duration, max_offset: f32) -> Self {
        Self {
            duration,
            max_offset,
        }
    }

    /// Duration of one full pulse cycle.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// How far the glow travels outward at the peak of the pulse.
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }
}

/// Descriptor of a visual layer the rendering surface keeps installed
/// between redraws.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentLayer {
    bounds: Bounds,
    color: Color,
    glow_size: f32,
    pulse: Option<Pulse>,
}

impl PersistentLayer {
    pub fn new(bounds: Bounds, color: Color, glow_size: f32) -> Self {
        Self {
            bounds,
            color,
            glow_size,
            pulse: None,
        }
    }

    /// Attaches a looping pulse to the layer.
    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulse = Some(pulse);
        self
    }

    /// The rectangle the layer surrounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn glow_size(&self) -> f32 {
        self.glow_size
    }

    pub fn pulse(&self) -> Option<Pulse> {
        self.pulse
    }

    /// Renders the layer as an SVG rectangle on the glow layer.
    ///
    /// A pulse becomes SMIL `<animate>` children that grow the ring by
    /// `max_offset` and fade it out over one cycle, repeating indefinitely.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let stroke = StrokeDefinition::new(self.color, self.glow_size);
        let ring = self.bounds.expand(self.glow_size / 2.0);

        let mut rect = apply_stroke!(
            svg_element::Rectangle::new()
                .set("x", ring.min_x())
                .set("y", ring.min_y())
                .set("width", ring.width())
                .set("height", ring.height())
                .set("rx", CORNER_RADIUS),
            &stroke
        );

        if let Some(pulse) = self.pulse {
            let dur = format!("{}ms", pulse.duration().as_millis());
            let offset = pulse.max_offset();
            let grown = ring.expand(offset);

            rect = rect
                .add(pulse_animation("x", ring.min_x(), grown.min_x(), &dur))
                .add(pulse_animation("y", ring.min_y(), grown.min_y(), &dur))
                .add(pulse_animation("width", ring.width(), grown.width(), &dur))
                .add(pulse_animation("height", ring.height(), grown.height(), &dur))
                .add(pulse_animation(
                    "stroke-opacity",
                    self.color.alpha(),
                    0.0,
                    &dur,
                ));
        }

        output.add_to_layer(RenderLayer::Glow, Box::new(rect));
        output
    }
}

fn pulse_animation(attribute: &str, from: f32, to: f32, dur: &str) -> svg_element::Animate {
    svg_element::Animate::new()
        .set("attributeName", attribute)
        .set("values", format!("{from};{to};{from}"))
        .set("dur", dur)
        .set("repeatCount", "indefinite")
}
