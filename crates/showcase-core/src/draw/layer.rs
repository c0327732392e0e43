//! Layer-based rendering system for SVG output.
//!
//! Drawables emit nodes tagged with the [`RenderLayer`] they belong to, so the
//! final document stacks the dim layer, glow, outline, text and controls in a
//! fixed order regardless of the order in which they were painted.
//!
//! # Example
//!
//! ```
//! # use showcase_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//!
//! let mut output = LayeredOutput::new();
//!
//! let text = svg::node::element::Text::new("Tap here");
//! output.add_to_layer(RenderLayer::Text, Box::new(text));
//!
//! let dim = Rectangle::new().set("fill", "black");
//! output.add_to_layer(RenderLayer::Dim, Box::new(dim));
//!
//! // Dim renders first even though it was added last
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers of a showcase overlay.
///
/// Layers are rendered bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Full-screen dim with the target cut out
    Dim,
    /// Soft glow around the target, static or animated
    Glow,
    /// Crisp outline hugging the target
    Outline,
    /// Title and message text
    Text,
    /// Dismiss and action buttons
    Controls,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dim => "dim",
            Self::Glow => "glow",
            Self::Outline => "outline",
            Self::Text => "text",
            Self::Controls => "controls",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// When rendered, nodes are emitted in layer order (bottom to top); nodes
/// within one layer keep their insertion order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes recorded on `layer`.
    pub fn count_in_layer(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g>` element with a `data-layer`
    /// attribute. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::Rectangle;

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_count_in_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Glow, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Glow, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Outline, Box::new(Rectangle::new()));

        assert_eq!(output.count_in_layer(RenderLayer::Glow), 2);
        assert_eq!(output.count_in_layer(RenderLayer::Outline), 1);
        assert_eq!(output.count_in_layer(RenderLayer::Dim), 0);
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        output1.merge(output2);

        assert_eq!(output1.render().len(), 1);
    }

    #[test]
    fn test_layered_output_render_orders_layers() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Controls, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Dim, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains(r#"data-layer="dim""#));
        assert!(rendered[1].contains(r#"data-layer="text""#));
        assert!(rendered[2].contains(r#"data-layer="controls""#));
    }
}
