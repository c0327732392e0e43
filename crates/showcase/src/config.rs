//! Configuration types for showcase overlays.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every field has a default, so partial documents work.
//!
//! # Overview
//!
//! - [`ShowcaseConfig`] - Top-level configuration combining the sections below.
//! - [`PlacementConfig`] - Margins, spacing and the visibility threshold used by
//!   the placement engine.
//! - [`HighlightConfig`] - Which highlight strategy to use and how it looks.
//! - [`StyleConfig`] - Dim color and text styles.
//! - [`AnimationConfig`] - Fade durations.
//!
//! # Example
//!
//! ```
//! # use showcase::config::ShowcaseConfig;
//! let config = ShowcaseConfig::default();
//! assert_eq!(config.placement().min_visible_ratio(), 0.75);
//! assert!(config.highlight().build_strategy().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use showcase_core::{
    color::Color,
    draw::{DynamicGlow, HighlightStrategy, StaticGlow, TextDefinition},
};

use crate::error::ShowcaseError;

/// Top-level showcase configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowcaseConfig {
    #[serde(default)]
    placement: PlacementConfig,

    #[serde(default)]
    highlight: HighlightConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    animation: AnimationConfig,
}

impl ShowcaseConfig {
    /// Creates a new [`ShowcaseConfig`] from its sections.
    pub fn new(
        placement: PlacementConfig,
        highlight: HighlightConfig,
        style: StyleConfig,
        animation: AnimationConfig,
    ) -> Self {
        Self {
            placement,
            highlight,
            style,
            animation,
        }
    }

    /// Returns a copy of this configuration using the `kind` highlight.
    pub fn with_highlight_kind(mut self, kind: HighlightKind) -> Self {
        self.highlight = self.highlight.with_kind(kind);
        self
    }

    /// Checks that the placement tunables are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Config`] if the visibility ratio is outside
    /// `0..=1` or a margin or spacing is negative.
    pub fn validate(&self) -> Result<(), ShowcaseError> {
        let placement = &self.placement;

        let ratio = placement.min_visible_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ShowcaseError::Config(format!(
                "min_visible_ratio must be between 0 and 1, got {ratio}"
            )));
        }

        for (name, value) in [
            ("horizontal_margin", placement.horizontal_margin),
            ("vertical_margin", placement.vertical_margin),
            ("block_spacing", placement.block_spacing),
        ] {
            if value < 0.0 {
                return Err(ShowcaseError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the highlight configuration.
    pub fn highlight(&self) -> &HighlightConfig {
        &self.highlight
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the animation configuration.
    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }
}

/// Geometry tunables for the placement engine.
///
/// | Field | Default |
/// |-------|---------|
/// | `horizontal_margin` | 15 |
/// | `vertical_margin` | 15 |
/// | `block_spacing` | 10 |
/// | `min_visible_ratio` | 0.75 |
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    horizontal_margin: f32,
    vertical_margin: f32,
    block_spacing: f32,
    min_visible_ratio: f32,
}

impl PlacementConfig {
    pub fn new(
        horizontal_margin: f32,
        vertical_margin: f32,
        block_spacing: f32,
        min_visible_ratio: f32,
    ) -> Self {
        Self {
            horizontal_margin,
            vertical_margin,
            block_spacing,
            min_visible_ratio,
        }
    }

    /// Base margin between the text column and the container's side edges.
    pub fn horizontal_margin(&self) -> f32 {
        self.horizontal_margin
    }

    /// Half the gap between the target and the text block.
    pub fn vertical_margin(&self) -> f32 {
        self.vertical_margin
    }

    /// Gap between title, message and button row.
    pub fn block_spacing(&self) -> f32 {
        self.block_spacing
    }

    /// Fraction of the target that must be inside the container.
    pub fn min_visible_ratio(&self) -> f32 {
        self.min_visible_ratio
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            horizontal_margin: 15.0,
            vertical_margin: 15.0,
            block_spacing: 10.0,
            min_visible_ratio: 0.75,
        }
    }
}

/// Highlight strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    #[default]
    Static,
    Dynamic,
}

/// Highlight appearance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    kind: HighlightKind,
    color: String,
    glow_size: f32,
    pulse_duration_ms: u64,
    max_offset: f32,
}

impl HighlightConfig {
    pub fn kind(&self) -> HighlightKind {
        self.kind
    }

    /// Returns a copy of this configuration using `kind`.
    pub fn with_kind(mut self, kind: HighlightKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builds the configured [`HighlightStrategy`].
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Color`] if the glow color cannot be parsed.
    pub fn build_strategy(&self) -> Result<Box<dyn HighlightStrategy>, ShowcaseError> {
        let color = Color::new(&self.color).map_err(ShowcaseError::Color)?;

        let strategy: Box<dyn HighlightStrategy> = match self.kind {
            HighlightKind::Static => Box::new(StaticGlow::new(color, self.glow_size)),
            HighlightKind::Dynamic => Box::new(DynamicGlow::new(
                color,
                self.glow_size,
                Duration::from_millis(self.pulse_duration_ms),
                self.max_offset,
            )),
        };
        Ok(strategy)
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            kind: HighlightKind::Static,
            color: "#ffffffcc".to_string(),
            glow_size: 6.0,
            pulse_duration_ms: 1500,
            max_offset: 10.0,
        }
    }
}

/// Text style for one kind of overlay text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextStyleConfig {
    font_family: String,
    font_size: u16,
    color: String,
}

impl TextStyleConfig {
    fn with_size(font_size: u16) -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size,
            color: "white".to_string(),
        }
    }

    /// Builds the [`TextDefinition`] for this style.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Color`] if the text color cannot be parsed.
    pub fn text_definition(&self) -> Result<TextDefinition, ShowcaseError> {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition.set_font_size(self.font_size);
        definition.set_color(Some(
            Color::new(&self.color).map_err(ShowcaseError::Color)?,
        ));
        Ok(definition)
    }
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        Self::with_size(15)
    }
}

/// Visual styling of the overlay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    dim_color: String,
    title: TextStyleConfig,
    message: TextStyleConfig,
    button: TextStyleConfig,
    button_background: String,
    button_padding: f32,
}

impl StyleConfig {
    /// Returns the parsed dim [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Color`] if the color string is invalid.
    pub fn dim_color(&self) -> Result<Color, ShowcaseError> {
        Color::new(&self.dim_color).map_err(ShowcaseError::Color)
    }

    /// Returns the parsed button background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Color`] if the color string is invalid.
    pub fn button_background(&self) -> Result<Color, ShowcaseError> {
        Color::new(&self.button_background).map_err(ShowcaseError::Color)
    }

    pub fn title(&self) -> &TextStyleConfig {
        &self.title
    }

    pub fn message(&self) -> &TextStyleConfig {
        &self.message
    }

    pub fn button(&self) -> &TextStyleConfig {
        &self.button
    }

    /// Padding added around a button title on each side.
    pub fn button_padding(&self) -> f32 {
        self.button_padding
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            dim_color: "#000000b3".to_string(),
            title: TextStyleConfig::with_size(20),
            message: TextStyleConfig::with_size(15),
            button: TextStyleConfig::with_size(15),
            button_background: "#ffffff33".to_string(),
            button_padding: 8.0,
        }
    }
}

/// Fade durations handed to the animator.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    fade_in_ms: u64,
    fade_out_ms: u64,
}

impl AnimationConfig {
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 300,
            fade_out_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_placement_constants() {
        let placement = PlacementConfig::default();
        assert_approx_eq!(f32, placement.horizontal_margin(), 15.0);
        assert_approx_eq!(f32, placement.vertical_margin(), 15.0);
        assert_approx_eq!(f32, placement.block_spacing(), 10.0);
        assert_approx_eq!(f32, placement.min_visible_ratio(), 0.75);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ShowcaseConfig = toml::from_str("").unwrap();
        assert_eq!(config.highlight().kind(), HighlightKind::Static);
        assert_eq!(config.animation().fade_in(), Duration::from_millis(300));
        assert!(config.style().dim_color().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: ShowcaseConfig = toml::from_str(
            r#"
            [placement]
            vertical_margin = 20.0

            [highlight]
            kind = "dynamic"
            pulse_duration_ms = 800
            "#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.placement().vertical_margin(), 20.0);
        assert_approx_eq!(f32, config.placement().horizontal_margin(), 15.0);
        assert_eq!(config.highlight().kind(), HighlightKind::Dynamic);
        assert_eq!(config.highlight().pulse_duration_ms, 800);
    }

    #[test]
    fn test_unknown_highlight_kind_is_rejected() {
        let result: Result<ShowcaseConfig, _> = toml::from_str(
            r#"
            [highlight]
            kind = "sparkly"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_strategy_variants() {
        let static_strategy = HighlightConfig::default().build_strategy().unwrap();
        let dynamic_strategy = HighlightConfig::default()
            .with_kind(HighlightKind::Dynamic)
            .build_strategy()
            .unwrap();

        let target = showcase_core::geometry::Bounds::default();
        assert!(static_strategy.effect_region(target).is_none());
        assert!(dynamic_strategy.effect_region(target).is_some());
    }

    #[test]
    fn test_invalid_colors_are_reported() {
        let config: ShowcaseConfig = toml::from_str(
            r#"
            [style]
            dim_color = "nope"

            [highlight]
            color = "also-nope"
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.style().dim_color(),
            Err(ShowcaseError::Color(_))
        ));
        assert!(matches!(
            config.highlight().build_strategy(),
            Err(ShowcaseError::Color(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_placement() {
        let ratio = ShowcaseConfig::new(
            PlacementConfig::new(15.0, 15.0, 10.0, 1.5),
            HighlightConfig::default(),
            StyleConfig::default(),
            AnimationConfig::default(),
        );
        let margin = ShowcaseConfig::new(
            PlacementConfig::new(-1.0, 15.0, 10.0, 0.75),
            HighlightConfig::default(),
            StyleConfig::default(),
            AnimationConfig::default(),
        );

        assert!(ShowcaseConfig::default().validate().is_ok());
        assert!(matches!(ratio.validate(), Err(ShowcaseError::Config(_))));
        assert!(matches!(margin.validate(), Err(ShowcaseError::Config(_))));
    }

    #[test]
    fn test_text_definition_from_style() {
        let style = StyleConfig::default();
        let title = style.title().text_definition().unwrap();
        assert_eq!(title.font_size(), 20);
        assert!(title.color().is_some());
    }
}
