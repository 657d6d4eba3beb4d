// file: src/cli/parser.rs
// version: 1.0.0
// guid: 8055c858-1bcf-470b-ad02-10fad5a0b194

//! Turns the raw argument vector into an [`Invocation`]

use clap::{CommandFactory, Parser};

use super::args::{ChownArgs, BIN_NAME};
use crate::error::ParseError;
use crate::ownership::Ownership;
use crate::request::ChownRequest;

/// Outcome of parsing one argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `-h`/`--help` was given; nothing else was validated
    HelpRequested,
    ValidRequest(ChownRequest),
    ParseError(ParseError),
}

impl Invocation {
    pub fn is_help(&self) -> bool {
        matches!(self, Invocation::HelpRequested)
    }
}

/// Parse arguments, excluding the program name.
///
/// Pure: never touches the filesystem.
pub fn parse<I, S>(args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    if requests_help(&args) {
        return Invocation::HelpRequested;
    }

    match validate(args) {
        Ok(request) => Invocation::ValidRequest(request),
        Err(err) => Invocation::ParseError(err),
    }
}

/// Rendered usage text
pub fn usage() -> String {
    ChownArgs::command().render_help().to_string()
}

/// Help wins over every other token, valid or not, up to a `--` terminator.
fn requests_help(args: &[String]) -> bool {
    args.iter()
        .take_while(|arg| arg.as_str() != "--")
        .any(|arg| {
            arg == "--help"
                || (arg.starts_with('-') && !arg.starts_with("--") && arg[1..].contains('h'))
        })
}

fn validate(args: Vec<String>) -> Result<ChownRequest, ParseError> {
    let parsed = ChownArgs::try_parse_from(std::iter::once(BIN_NAME.to_string()).chain(args))
        .map_err(usage_error)?;

    let spec = parsed.owner.ok_or(ParseError::MissingOwnership)?;
    let ownership: Ownership = spec.parse()?;

    if parsed.paths.is_empty() {
        return Err(ParseError::MissingPaths(spec));
    }
    if parsed.paths.iter().any(String::is_empty) {
        return Err(ParseError::EmptyPath);
    }

    Ok(ChownRequest::new(ownership, parsed.recursive, parsed.paths))
}

fn usage_error(err: clap::Error) -> ParseError {
    let rendered = err.render().to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    ParseError::Usage(first_line.trim_start_matches("error: ").trim().to_string())
}
