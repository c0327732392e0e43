//! Exporters that turn a placed overlay into an artifact.

pub mod svg;

use showcase_core::draw::LayeredOutput;

use crate::{controller::ShowcaseFrame, error::ShowcaseError};

/// Writes a frame snapshot and its per-redraw paint somewhere.
pub trait Exporter {
    /// Exports `frame`, with `paint` produced by
    /// [`ShowcaseController::paint`](crate::ShowcaseController::paint).
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Io`] if the output cannot be written.
    fn export_frame(
        &self,
        frame: &ShowcaseFrame,
        paint: LayeredOutput,
    ) -> Result<(), ShowcaseError>;
}
