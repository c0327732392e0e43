//! Error adapter for rendering [`CliError`] with miette.
//!
//! Scenario syntax errors carry the scenario text and the offending span, so
//! they render with a source snippet. Everything else renders as a plain
//! message with an error code.

use std::{error::Error as StdError, fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use showcase::ShowcaseError;

use crate::{config::ConfigError, error::CliError, scenario::ScenarioError};

/// Adapter for a scenario syntax error with source location.
pub struct ScenarioDiagnostic<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl fmt::Debug for ScenarioDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioDiagnostic")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for ScenarioDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid scenario syntax: {}", self.message)
    }
}

impl StdError for ScenarioDiagnostic<'_> {}

impl MietteDiagnostic for ScenarioDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("showcase::scenario::syntax"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "scenarios need `title`, `message`, a [container] and a [target] table",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_primary_with_span(
            Some(self.message.to_string()),
            SourceSpan::new(span.start.into(), span.len()),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for errors without source information.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(ConfigError::Parse(_)) => "showcase::config::syntax",
            CliError::Config(ConfigError::Validation(_)) => "showcase::config::invalid",
            CliError::Config(_) => "showcase::config::io",
            CliError::Scenario(ScenarioError::Invalid(_)) => "showcase::scenario::invalid",
            CliError::Scenario(_) => "showcase::scenario::io",
            CliError::Showcase(ShowcaseError::Io(_)) => "showcase::io",
            CliError::Showcase(ShowcaseError::Color(_) | ShowcaseError::Config(_)) => {
                "showcase::style"
            }
            CliError::Showcase(_) => "showcase::controller",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A scenario syntax error with a source snippet.
    Scenario(ScenarioDiagnostic<'a>),
    /// A plain error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Scenario(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl StdError for Reportable<'_> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Reportable::Scenario(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scenario(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scenario(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Scenario(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Scenario(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into something miette can render.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Scenario(ScenarioError::Parse { message, span, src }) => {
            Reportable::Scenario(ScenarioDiagnostic {
                message,
                span: span.as_ref(),
                src,
            })
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_has_label() {
        let err = CliError::Scenario(ScenarioError::Parse {
            message: "invalid type".to_string(),
            span: Some(4..6),
            src: "x = 42".to_string(),
        });

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Scenario(_)));

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].len(), 2);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_parse_error_without_span() {
        let err = CliError::Scenario(ScenarioError::Parse {
            message: "missing field `title`".to_string(),
            span: None,
            src: String::new(),
        });

        assert!(to_reportable(&err).labels().is_none());
    }

    #[test]
    fn test_plain_errors_have_codes() {
        let err = CliError::Showcase(ShowcaseError::NotSetUp);
        let reportable = to_reportable(&err);

        assert!(matches!(reportable, Reportable::Error(_)));
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "showcase::controller"
        );
        assert_eq!(
            reportable.to_string(),
            "Showcase has not been set up with a target"
        );
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = CliError::Config(ConfigError::Validation("bad ratio".to_string()));
        let reportable = to_reportable(&err);

        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &reportable)
            .unwrap();
        assert!(out.contains("bad ratio"));
    }
}
