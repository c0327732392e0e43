//! SVG preview of a placed overlay.
//!
//! The preview draws a neutral backdrop standing in for the host's content,
//! a placeholder for the target, and then the overlay itself through the
//! layered output: dim with cutout, highlight, persistent layer (a SMIL pulse
//! for dynamic glows), wrapped title and message, and buttons.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use showcase_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, Text, TextDefinition},
    geometry::Bounds,
};

use crate::{
    config::StyleConfig,
    controller::{ButtonFrame, ShowcaseFrame},
    error::ShowcaseError,
    export::Exporter,
};

const BACKDROP_COLOR: &str = "#f2f2f7";
const TARGET_PLACEHOLDER_COLOR: &str = "#c7c7cc";
const BUTTON_CORNER_RADIUS: f32 = 8.0;

/// Renders frames to SVG files.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    file_name: String,
    title: TextDefinition,
    message: TextDefinition,
    button: TextDefinition,
    button_background: Color,
}

impl SvgExporter {
    /// Creates an exporter writing to `file_name` with the text styles in
    /// `style`.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Color`] if a configured color is invalid.
    pub fn new(file_name: &str, style: &StyleConfig) -> Result<Self, ShowcaseError> {
        Ok(Self {
            file_name: file_name.to_string(),
            title: style.title().text_definition()?,
            message: style.message().text_definition()?,
            button: style.button().text_definition()?,
            button_background: style.button_background()?,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Renders `frame` and its per-redraw `paint` to a document sized to the
    /// container.
    pub fn render_frame(&self, frame: &ShowcaseFrame, paint: LayeredOutput) -> Document {
        let container = frame.container();

        let doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    container.min_x(),
                    container.min_y(),
                    container.width(),
                    container.height()
                ),
            )
            .set("width", container.width())
            .set("height", container.height())
            .add(filled_rect(container, BACKDROP_COLOR))
            .add(filled_rect(frame.target(), TARGET_PLACEHOLDER_COLOR));

        let mut output = paint;
        if let Some(layer) = frame.persistent_layer() {
            output.merge(layer.render_to_layers());
        }

        let layout = frame.layout();
        output.merge(
            Text::new(&self.title, frame.title())
                .wrap(layout.title().width())
                .render_to_layers(layout.title().min_point()),
        );
        output.merge(
            Text::new(&self.message, frame.message())
                .wrap(layout.message().width())
                .render_to_layers(layout.message().min_point()),
        );
        for button in frame.buttons() {
            output.add_to_layer(RenderLayer::Controls, Box::new(self.render_button(button)));
        }

        debug!(buttons = frame.buttons().len(); "Rendered overlay layers");
        output
            .render()
            .into_iter()
            .fold(doc, |doc, node| doc.add(node))
    }

    fn render_button(&self, button: &ButtonFrame) -> svg_element::Group {
        let bounds = button.bounds();
        let background = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", BUTTON_CORNER_RADIUS)
            .set("fill", self.button_background.to_string())
            .set("fill-opacity", self.button_background.alpha());

        let mut label = svg_element::Text::new(button.title())
            .set("x", bounds.min_x() + bounds.width() / 2.0)
            .set("y", bounds.min_y() + bounds.height() / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.button.font_family())
            .set("font-size", self.button.font_size());
        if let Some(color) = self.button.color() {
            label = label
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        svg_element::Group::new()
            .set("data-button", button.id().index().to_string())
            .add(background)
            .add(label)
    }

    /// Writes `doc` to the exporter's file.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Io`] if the file cannot be created or written.
    pub fn write_document(&self, doc: &Document) -> Result<(), ShowcaseError> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut file = File::create(&self.file_name).map_err(|err| {
            error!(file_name = self.file_name, err:err; "Failed to create SVG file");
            ShowcaseError::Io(err)
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            ShowcaseError::Io(err)
        })
    }
}

impl Exporter for SvgExporter {
    fn export_frame(
        &self,
        frame: &ShowcaseFrame,
        paint: LayeredOutput,
    ) -> Result<(), ShowcaseError> {
        let doc = self.render_frame(frame, paint);
        debug!("SVG document rendered");
        self.write_document(&doc)
    }
}

fn filled_rect(bounds: Bounds, fill: &str) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", fill)
}
