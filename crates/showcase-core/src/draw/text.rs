//! Text measurement and rendering for overlay labels.
//!
//! Showcase text is laid out in a fixed-width column, so measurement answers
//! "how tall is this text when wrapped to `width`". Wrapping and measurement
//! use cosmic-text shaping with a shared [`FontSystem`].
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - Content paired with a definition, ready to be wrapped
//! - [`TextBlock`] - Wrapped lines with their measured size; renders as SVG
//!
//! ```
//! # use showcase_core::draw::{Text, TextDefinition};
//! let style = TextDefinition::new();
//! let block = Text::new(&style, "Tap the bell to see notifications").wrap(300.0);
//! assert!(block.size().height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Points to pixels at standard density.
const POINTS_TO_PIXELS: f32 = 1.33;

/// Line height as a multiple of the pixel font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Average glyph advance relative to the pixel font size, used when shaping
/// yields no layout runs.
const FALLBACK_ADVANCE_FACTOR: f32 = 0.55;

/// Visual style for overlay text.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `15` |
/// | Color | `None` (SVG default, typically black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family (e.g. "Helvetica", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` keeps the renderer default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    fn metrics(&self) -> Metrics {
        let font_size_px = f32::from(self.font_size) * POINTS_TO_PIXELS;
        Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_FACTOR)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 15,
            color: None,
        }
    }
}

/// Text content paired with the definition used to measure and draw it.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Wraps the text into lines no wider than `max_width`.
    pub fn wrap(&self, max_width: f32) -> TextBlock {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .wrap(self.content, self.definition, max_width)
    }

    /// Measures the size of the text when wrapped to `max_width`.
    pub fn measure(&self, max_width: f32) -> Size {
        self.wrap(max_width).size()
    }
}

/// Wrapped lines of text with their measured size.
///
/// Renders left-aligned with the first line at the top edge of the given
/// position.
#[derive(Debug, Clone)]
pub struct TextBlock {
    definition: TextDefinition,
    lines: Vec<String>,
    line_height: f32,
    size: Size,
}

impl TextBlock {
    /// Returns the wrapped lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the measured size of all lines.
    pub fn size(&self) -> Size {
        self.size
    }
}

impl Drawable for TextBlock {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.lines.is_empty() {
            return output;
        }

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("dominant-baseline", "text-before-edge")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (index, line) in self.lines.iter().enumerate() {
            let dy = if index == 0 { 0.0 } else { self.line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line.as_str()));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Owns the shared [`FontSystem`] used for shaping.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Shape `text` into lines constrained to `max_width`.
    ///
    /// Falls back to an estimated greedy word wrap when shaping produces no
    /// layout runs (for example when no fonts are installed).
    fn wrap(&self, text: &str, text_def: &TextDefinition, max_width: f32) -> TextBlock {
        let metrics = text_def.metrics();
        let mut block = TextBlock {
            definition: text_def.clone(),
            lines: Vec::new(),
            line_height: metrics.line_height,
            size: Size::default(),
        };

        if text.is_empty() {
            return block;
        }

        let mut font_system = match self.font_system.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("FontSystem lock was poisoned, reusing inner value");
                poisoned.into_inner()
            }
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(Some(max_width.max(0.0)), None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_line_width: f32 = 0.0;
        for run in buffer.layout_runs() {
            let line = match (
                run.glyphs.iter().map(|g| g.start).min(),
                run.glyphs.iter().map(|g| g.end).max(),
            ) {
                (Some(start), Some(end)) => run.text[start..end].trim_end().to_string(),
                _ => String::new(),
            };
            max_line_width = max_line_width.max(run.line_w);
            block.lines.push(line);
        }

        if block.lines.is_empty() {
            let advance = metrics.font_size * FALLBACK_ADVANCE_FACTOR;
            block.lines = estimate_wrap(text, advance, max_width);
            max_line_width = block
                .lines
                .iter()
                .map(|line| line.chars().count() as f32 * advance)
                .fold(0.0, f32::max);
        }

        block.size = Size::new(
            max_line_width.min(max_width.max(0.0)),
            block.lines.len() as f32 * metrics.line_height,
        );
        block
    }
}

/// Greedy word wrap assuming a fixed advance per character.
fn estimate_wrap(text: &str, advance: f32, max_width: f32) -> Vec<String> {
    let max_chars = if advance > 0.0 {
        ((max_width / advance).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 15);
        assert_eq!(def.font_family(), "sans-serif");
        assert!(def.color().is_none());
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_size(22);
        def.set_font_family("Helvetica");
        def.set_color(Some(Color::new("white").unwrap()));

        assert_eq!(def.font_size(), 22);
        assert_eq!(def.font_family(), "Helvetica");
        assert!(def.color().is_some());
    }

    #[test]
    fn test_wrap_empty_text() {
        let def = TextDefinition::new();
        let block = Text::new(&def, "").wrap(200.0);
        assert!(block.lines().is_empty());
        assert_approx_eq!(f32, block.size().height(), 0.0);
        assert!(block.render_to_layers(Point::default()).is_empty());
    }

    #[test]
    fn test_wrap_single_line_has_positive_height() {
        let def = TextDefinition::new();
        let size = Text::new(&def, "Hello").measure(400.0);
        assert!(size.height() > 0.0);
        assert!(size.width() <= 400.0);
    }

    #[test]
    fn test_wrap_explicit_newlines_are_taller() {
        let def = TextDefinition::new();
        let single = Text::new(&def, "Line 1").measure(400.0);
        let multi = Text::new(&def, "Line 1\nLine 2\nLine 3").measure(400.0);
        assert!(
            multi.height() > single.height(),
            "Multi-line text ({}) should be taller than single line ({})",
            multi.height(),
            single.height()
        );
    }

    #[test]
    fn test_wrap_narrow_column_is_taller() {
        let def = TextDefinition::new();
        let content = "Swipe left on any conversation to archive it quickly";
        let wide = Text::new(&def, content).measure(2000.0);
        let narrow = Text::new(&def, content).measure(80.0);
        assert!(narrow.height() > wide.height());
    }

    #[test]
    fn test_text_block_renders_tspans() {
        let mut def = TextDefinition::new();
        def.set_color(Some(Color::new("white").unwrap()));
        let block = Text::new(&def, "First\nSecond").wrap(400.0);

        let output = block.render_to_layers(Point::new(15.0, 40.0));
        assert_eq!(output.count_in_layer(RenderLayer::Text), 1);

        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(rendered.contains("First"));
        assert!(rendered.contains("Second"));
        assert!(rendered.contains(r#"fill="white""#));
    }

    #[test]
    fn test_estimate_wrap_breaks_on_words() {
        let lines = estimate_wrap("one two three four", 10.0, 80.0);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_estimate_wrap_keeps_long_words() {
        let lines = estimate_wrap("supercalifragilistic", 10.0, 30.0);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }
}
