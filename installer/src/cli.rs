//! CLI argument definitions for the gonstruct installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Install gonstruct into configurable directories.
#[derive(Parser, Debug, Default)]
#[command(name = "gonstruct-install")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install gonstruct into configurable directories.\n\n",
    "Installation paths are controlled by four options given as NAME=VALUE ",
    "arguments: prefix, eprefix, bindir and datadir. Unset options fall back to ",
    "/usr/local, the resolved prefix, <eprefix>/bin and <prefix>/share/gonstruct.\n\n",
    "Executables given with --program are installed into bindir with mode 0755; ",
    "files given with --data are installed into datadir with mode 0644.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install into /usr/local:\n",
    "    $ gonstruct-install --program dist/gonstruct --data dist/readme.html\n\n",
    "  Install under /opt with a separate executable directory:\n",
    "    $ gonstruct-install prefix=/opt/gonstruct bindir=/opt/bin --program dist/gonstruct\n\n",
    "  Assemble a package tree without touching the live prefix:\n",
    "    $ gonstruct-install --destdir pkg --program dist/gonstruct\n\n",
    "  Show the option defaults:\n",
    "    $ gonstruct-install --show-options",
))]
pub struct Cli {
    /// Option overrides of the form NAME=VALUE.
    #[arg(value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,

    /// TOML file with an [install] table of option overrides.
    #[arg(long, value_name = "FILE")]
    pub options_file: Option<Utf8PathBuf>,

    /// Resolve option defaults declared by the schema (`${name}` expansion)
    /// instead of the installer's fallbacks.
    #[arg(long)]
    pub schema_defaults: bool,

    /// Staging root prepended to every destination.
    #[arg(long, value_name = "DIR", env = "DESTDIR")]
    pub destdir: Option<Utf8PathBuf>,

    /// Executable to install into bindir (can be repeated).
    #[arg(long, value_name = "FILE")]
    pub program: Vec<Utf8PathBuf>,

    /// Data file to install into datadir (can be repeated).
    #[arg(long, value_name = "FILE")]
    pub data: Vec<Utf8PathBuf>,

    /// Show the planned operations and exit without installing.
    #[arg(long)]
    pub dry_run: bool,

    /// List the installation options with their defaults and exit.
    #[arg(long)]
    pub show_options: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
