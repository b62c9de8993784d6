//! Command-line argument parsing.
//!
//! Flags are parsed by hand; the surface is small enough that a parser
//! crate would add more than it saves.

use thiserror::Error;

/// Options for an interactive run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Text to place in the composer at startup
    pub initial_draft: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the terminal client (default)
    Run(LaunchOptions),
}

/// Invalid command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

pub const USAGE: &str = "\
Usage: feedline [OPTIONS]

Options:
  --post <TEXT>   Start with TEXT in the composer
  --open <URL>    Start with the `post` query parameter of URL in the composer
  -V, --version   Print version
  -h, --help      Print help

Environment:
  FEEDLINE_HANDLE, FEEDLINE_APP_PASSWORD   Account credentials (required)
  FEEDLINE_SERVICE                         Service URL (default https://bsky.social)
  FEEDLINE_POLL_SECS                       Refresh period in seconds (default 30)
  FEEDLINE_LOG                             Log filter (default feedline=info)";

/// Parse command-line arguments, program name included.
///
/// # Examples
///
/// ```
/// use feedline::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["feedline".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = LaunchOptions::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--post" => {
                let text = args.next().ok_or(CliError::MissingValue("--post"))?;
                options.initial_draft = Some(text);
            }
            "--open" => {
                let url = args.next().ok_or(CliError::MissingValue("--open"))?;
                options.initial_draft = initial_draft_from_url(&url);
            }
            other => return Err(CliError::UnknownArgument(other.to_string())),
        }
    }

    Ok(CliCommand::Run(options))
}

/// Extract the `post` query parameter of a launch URL, percent-decoded.
///
/// Returns None when the parameter is absent or empty.
pub fn initial_draft_from_url(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "post")
        .map(|(_, value)| decode_component(value))
        .filter(|value| !value.is_empty())
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
