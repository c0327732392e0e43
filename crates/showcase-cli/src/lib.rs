//! Showcase previewer library
//!
//! Drives a headless showcase controller through a scenario and writes the
//! resulting overlay as an SVG file.

pub mod error_adapter;
pub mod scenario;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use log::{debug, info, warn};

use showcase::{
    ShowcaseBuilder, ShowcaseError, ShowcaseState,
    export::{Exporter, svg::SvgExporter},
    host::{
        FontTextMeasure, Host,
        headless::{HeadlessContainer, ImmediateAnimator, RecordingSurface, RectTarget},
    },
};

use scenario::{ButtonKindSpec, Scenario};

/// What a preview run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The SVG was written to the output path.
    Rendered,
    /// Too little of the target was visible; nothing was written.
    AutoDismissed,
}

/// Run the previewer.
///
/// # Errors
///
/// Returns [`CliError`] for configuration, scenario, style or I/O errors.
pub fn run(args: &Args) -> Result<RunOutcome, CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scenario"
    );

    let mut config = config::load_config(args.config.as_ref())?;
    let scenario = Scenario::load(&args.input)?;

    if let Some(kind) = scenario.highlight() {
        config = config.with_highlight_kind(kind);
    }

    let container = scenario.container();
    let host = Host::new(
        HeadlessContainer::new(container.size()).with_safe_area(container.safe_area()),
        RecordingSurface::new(),
        ImmediateAnimator::new(),
        FontTextMeasure::from_style(config.style())?,
    );
    let exporter = SvgExporter::new(&args.output, config.style())?;

    let mut controller = ShowcaseBuilder::new(scenario.title(), scenario.message())
        .with_config(config)
        .build(host)?;

    for button in scenario.buttons() {
        match button.kind() {
            ButtonKindSpec::Dismiss => {
                controller.add_dismiss_button(button.title());
            }
            ButtonKindSpec::Action => {
                let title = button.title().unwrap_or("Try it").to_string();
                let label = title.clone();
                controller.add_action_button(title, move || {
                    debug!(button = label.as_str(); "Action button pressed");
                });
            }
        }
    }

    let target = scenario.target();
    controller.setup(
        Box::new(RectTarget::new(target.frame())),
        target.offset(),
        target.margin(),
    );

    if controller.state() != ShowcaseState::Placed {
        warn!(state:? = controller.state(); "Target not visible enough, showcase auto-dismissed");
        return Ok(RunOutcome::AutoDismissed);
    }

    controller.show()?;

    let frame = controller.frame().ok_or(ShowcaseError::NotSetUp)?;
    exporter.export_frame(&frame, controller.paint())?;

    info!(output_file = args.output; "SVG exported successfully");
    Ok(RunOutcome::Rendered)
}
