//! Preview scenarios.
//!
//! A scenario describes one screen: the container, the target element, the
//! texts and the buttons to add.
//!
//! ```toml
//! title = "Search"
//! message = "Find anything from here"
//! highlight = "dynamic"
//!
//! [container]
//! width = 375
//! height = 812
//! safe_left = 0
//!
//! [target]
//! x = 300
//! y = 40
//! width = 44
//! height = 44
//! margin = 6
//!
//! [[buttons]]
//! title = "Got it"
//! ```

use std::{fs, io, ops::Range, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use showcase::{
    config::HighlightKind,
    geometry::{Bounds, Insets, Point, Size},
};

/// Errors raised while reading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid scenario syntax: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Invalid scenario: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContainerSpec {
    width: f32,
    height: f32,
    #[serde(default)]
    safe_top: f32,
    #[serde(default)]
    safe_right: f32,
    #[serde(default)]
    safe_bottom: f32,
    #[serde(default)]
    safe_left: f32,
}

impl ContainerSpec {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn safe_area(&self) -> Insets {
        Insets::new(
            self.safe_top,
            self.safe_right,
            self.safe_bottom,
            self.safe_left,
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TargetRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    offset_x: f32,
    #[serde(default)]
    offset_y: f32,
    #[serde(default)]
    margin: f32,
}

impl TargetRect {
    /// Frame of the target in container space.
    pub fn frame(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKindSpec {
    #[default]
    Dismiss,
    Action,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ButtonSpec {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    kind: ButtonKindSpec,
}

impl ButtonSpec {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn kind(&self) -> ButtonKindSpec {
        self.kind
    }
}

/// One preview scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    title: String,
    message: String,
    #[serde(default)]
    highlight: Option<HighlightKind>,
    container: ContainerSpec,
    target: TargetRect,
    #[serde(default)]
    buttons: Vec<ButtonSpec>,
}

impl Scenario {
    /// Reads and validates a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if the file cannot be read, parsed or
    /// validated.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScenarioError> {
        let path = path.into();
        let src = fs::read_to_string(&path).map_err(|source| ScenarioError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(src)
    }

    /// Parses and validates scenario text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] with the offending span for TOML or
    /// schema errors and [`ScenarioError::Invalid`] for impossible geometry.
    pub fn parse(src: String) -> Result<Self, ScenarioError> {
        let scenario: Self = match toml::from_str(&src) {
            Ok(scenario) => scenario,
            Err(err) => {
                return Err(ScenarioError::Parse {
                    message: err.message().to_string(),
                    span: err.span(),
                    src,
                });
            }
        };

        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.container.width <= 0.0 || self.container.height <= 0.0 {
            return Err(ScenarioError::Invalid(format!(
                "container must have a positive size, got {}x{}",
                self.container.width, self.container.height
            )));
        }
        if self.target.width < 0.0 || self.target.height < 0.0 {
            return Err(ScenarioError::Invalid(
                "target width and height must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Highlight kind overriding the configuration, if any.
    pub fn highlight(&self) -> Option<HighlightKind> {
        self.highlight
    }

    pub fn container(&self) -> &ContainerSpec {
        &self.container
    }

    pub fn target(&self) -> &TargetRect {
        &self.target
    }

    pub fn buttons(&self) -> &[ButtonSpec] {
        &self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        title = "Title"
        message = "Message"

        [container]
        width = 375
        height = 812

        [target]
        x = 20
        y = 700
        width = 50
        height = 50
    "#;

    #[test]
    fn test_minimal_scenario_defaults() {
        let scenario = Scenario::parse(MINIMAL.to_string()).unwrap();

        assert_eq!(scenario.container().size(), Size::new(375.0, 812.0));
        assert_eq!(scenario.container().safe_area(), Insets::default());
        assert_eq!(scenario.target().offset(), Point::default());
        assert_eq!(scenario.target().margin(), 0.0);
        assert!(scenario.buttons().is_empty());
        assert!(scenario.highlight().is_none());
    }

    #[test]
    fn test_buttons_and_highlight() {
        let src = format!(
            r#"highlight = "dynamic"
            {MINIMAL}
            [[buttons]]
            title = "Try it"
            kind = "action"

            [[buttons]]
            "#
        );
        let scenario = Scenario::parse(src).unwrap();

        assert_eq!(scenario.highlight(), Some(HighlightKind::Dynamic));
        assert_eq!(scenario.buttons().len(), 2);
        assert_eq!(scenario.buttons()[0].kind(), ButtonKindSpec::Action);
        assert_eq!(scenario.buttons()[1].kind(), ButtonKindSpec::Dismiss);
        assert_eq!(scenario.buttons()[1].title(), None);
    }

    #[test]
    fn test_parse_error_keeps_span() {
        let src = "title = \"Title\"\nmessage = 42\n".to_string();
        let err = Scenario::parse(src).unwrap_err();

        match err {
            ScenarioError::Parse { span, src, .. } => {
                let span = span.expect("toml reports a span");
                assert!(src[span].contains("42"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_container_is_invalid() {
        let src = MINIMAL.replace("width = 375", "width = 0");
        let err = Scenario::parse(src).unwrap_err();
        assert!(matches!(err, ScenarioError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::load("no/such/scenario.toml").unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }
}
