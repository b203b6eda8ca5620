//! Release build invocation.
//!
//! The release archive is only assembled after a full optimised build. The
//! build is run through [`CommandExecutor`] so tests can substitute a stub.

use super::error::DistError;
use log::info;
use std::process::{Command, ExitStatus};

/// Command line used to produce a release build.
pub const DEFAULT_BUILD_COMMAND: [&str; 2] = ["scons", "release=1"];

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Run `program` with `args`, inheriting stdio, and return its status.
    ///
    /// # Errors
    ///
    /// Returns [`DistError::CommandSpawn`] if the process cannot be started.
    fn run(&self, program: &str, args: &[String]) -> Result<ExitStatus, DistError>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<ExitStatus, DistError> {
        Command::new(program)
            .args(args)
            .status()
            .map_err(|source| DistError::CommandSpawn {
                command: render_command(program, args),
                source,
            })
    }
}

/// Run the release build described by `command` (program followed by its
/// arguments).
///
/// # Errors
///
/// Returns [`DistError::EmptyCommand`] for an empty command line,
/// [`DistError::CommandSpawn`] if it cannot be started and
/// [`DistError::CommandFailed`] if it exits unsuccessfully.
///
/// # Examples
///
/// ```no_run
/// use gonstruct_installer::dist::release::{
///     DEFAULT_BUILD_COMMAND, SystemCommandExecutor, run_release_build,
/// };
///
/// let command: Vec<String> = DEFAULT_BUILD_COMMAND.iter().map(|s| (*s).to_owned()).collect();
/// run_release_build(&SystemCommandExecutor, &command)?;
/// # Ok::<(), gonstruct_installer::dist::error::DistError>(())
/// ```
pub fn run_release_build(
    executor: &dyn CommandExecutor,
    command: &[String],
) -> Result<(), DistError> {
    let (program, args) = command.split_first().ok_or(DistError::EmptyCommand)?;
    let rendered = render_command(program, args);
    info!("running {rendered}");

    let status = executor.run(program, args)?;
    if status.success() {
        Ok(())
    } else {
        Err(DistError::CommandFailed {
            command: rendered,
            status: status.to_string(),
        })
    }
}

fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
