//! Command-line interface.
//!
//! The dispatcher runs early in main(), before the terminal is taken over:
//!
//! ```ignore
//! use feedline::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let Some(options) = run_cli_command(command) else {
//!     return Ok(());
//! };
//! // start the UI with `options`
//! ```

pub mod args;
pub mod version;

pub use args::{initial_draft_from_url, parse_args, CliCommand, CliError, LaunchOptions, USAGE};
pub use version::{version_line, VERSION};

/// Handle commands that print and exit.
///
/// Returns the launch options when the command is an interactive run.
pub fn run_cli_command(command: CliCommand) -> Option<LaunchOptions> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            None
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            None
        }
        CliCommand::Run(options) => Some(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_returns_options() {
        let options = LaunchOptions {
            initial_draft: Some("hi".to_string()),
        };
        assert_eq!(run_cli_command(CliCommand::Run(options.clone())), Some(options));
    }

    #[test]
    fn test_version_returns_none() {
        assert!(run_cli_command(CliCommand::Version).is_none());
    }
}
