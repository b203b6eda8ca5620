//! gonstruct installer CLI entrypoint.
//!
//! This binary resolves the installation directories from `NAME=VALUE`
//! overrides, registers the requested programs and data files, and installs
//! them, optionally beneath a staging root.

use clap::Parser;
use gonstruct_installer::args::ResolvedArgs;
use gonstruct_installer::cli::Cli;
use gonstruct_installer::error::Result;
use gonstruct_installer::installer::{INSTALL_ALIAS, Installer};
use gonstruct_installer::logging;
use gonstruct_installer::option::{OPTION_SCHEMA, register_options};
use gonstruct_installer::option_set::OptionSet;
use gonstruct_installer::output::{DryRunInfo, config_summary, success_message};
use gonstruct_installer::staging::StagingEnvironment;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if logging::init(cli.verbosity, cli.quiet).is_err() {
        write_stderr_line(&mut stderr, "warning: logger already initialised");
    }
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let mut options = OptionSet::new();
    register_options(&mut options, &OPTION_SCHEMA);

    if cli.show_options {
        write_stderr_line(stderr, options.help_text().trim_end());
        return Ok(());
    }

    let args = resolve_args(cli, &options)?;
    let staging = cli
        .destdir
        .clone()
        .map_or_else(StagingEnvironment::new, StagingEnvironment::with_destdir);

    let mut installer = Installer::new(staging, &args);
    for program in &cli.program {
        installer.add_program(program.clone());
    }
    for datafile in &cli.data {
        installer.add_data(datafile.clone());
    }

    let config = installer.config();
    let env = installer.into_environment();
    let registered = env.alias_targets(INSTALL_ALIAS).is_some();

    if cli.dry_run {
        let operations = if registered {
            env.plan(INSTALL_ALIAS)?
        } else {
            Vec::new()
        };
        let info = DryRunInfo {
            config: &config,
            destdir: env.destdir(),
            operations: &operations,
        };
        write_stderr_line(stderr, info.display_text());
        return Ok(());
    }

    if !cli.quiet {
        write_stderr_line(stderr, "Installation directories:");
        write_stderr_line(stderr, config_summary(&config));
    }

    if !registered {
        if !cli.quiet {
            write_stderr_line(stderr, "Nothing to install.");
        }
        return Ok(());
    }

    let written = env.run_alias(INSTALL_ALIAS)?;
    if !cli.quiet {
        write_stderr_line(stderr, success_message(written.len(), env.destdir()));
    }
    Ok(())
}

/// Layers command-line overrides over the options file, then optionally
/// expands the schema defaults.
fn resolve_args(cli: &Cli, options: &OptionSet) -> Result<ResolvedArgs> {
    let file_args = cli
        .options_file
        .as_deref()
        .map_or_else(|| Ok(ResolvedArgs::new()), ResolvedArgs::from_options_file)?;
    let overrides = file_args.merged_with(&ResolvedArgs::parse_overrides(&cli.overrides)?);

    if cli.schema_defaults {
        options.resolve(&overrides)
    } else {
        Ok(overrides)
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            if let Some(source) = std::error::Error::source(&err) {
                write_stderr_line(stderr, format!("  caused by: {source}"));
            }
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
