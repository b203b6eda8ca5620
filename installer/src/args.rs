//! User overrides for the installation options.
//!
//! [`ResolvedArgs`] is the option-name to value mapping handed to the
//! [`crate::installer::Installer`]. It may be partial; missing entries fall
//! back to the installer's own defaults. Values come from `NAME=VALUE`
//! command-line arguments, an options file, or [`crate::option_set::OptionSet`]
//! resolution.

use crate::error::{InstallerError, Result};
use crate::option::OptionName;
use camino::Utf8Path;
use serde::Deserialize;
use std::collections::BTreeMap;

/// An immutable mapping from option name to override value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedArgs {
    values: BTreeMap<OptionName, String>,
}

/// On-disk layout of an options file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    #[serde(default)]
    install: InstallTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstallTable {
    prefix: Option<String>,
    eprefix: Option<String>,
    bindir: Option<String>,
    datadir: Option<String>,
}

impl ResolvedArgs {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this mapping with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: OptionName, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    /// Look up the value supplied for `name`, if any.
    #[must_use]
    pub fn get(&self, name: OptionName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    /// Look up `name`, computing a fallback when it was not supplied.
    ///
    /// The fallback is only evaluated when the value is absent.
    #[must_use]
    pub fn get_or_else(&self, name: OptionName, fallback: impl FnOnce() -> String) -> String {
        self.get(name).map_or_else(fallback, str::to_owned)
    }

    /// Return `true` when no option was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the supplied options in dependency order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Parse `NAME=VALUE` overrides as given on the command line.
    ///
    /// Later arguments win over earlier ones for the same option.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::MalformedOverride`] when an argument has no
    /// `=`, and [`InstallerError::UnknownOption`] when the name is not one of
    /// the recognised options.
    ///
    /// # Examples
    ///
    /// ```
    /// use gonstruct_installer::args::ResolvedArgs;
    /// use gonstruct_installer::option::OptionName;
    ///
    /// let args = ResolvedArgs::parse_overrides(["prefix=/opt/gonstruct"])?;
    /// assert_eq!(args.get(OptionName::Prefix), Some("/opt/gonstruct"));
    /// # Ok::<(), gonstruct_installer::error::InstallerError>(())
    /// ```
    pub fn parse_overrides<I, S>(arguments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = BTreeMap::new();
        for raw in arguments {
            let argument = raw.as_ref();
            let (name, value) =
                argument
                    .split_once('=')
                    .ok_or_else(|| InstallerError::MalformedOverride {
                        argument: argument.to_owned(),
                    })?;
            values.insert(name.trim().parse::<OptionName>()?, value.to_owned());
        }
        Ok(Self { values })
    }

    /// Load overrides from the `[install]` table of a TOML options file.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Io`] when the file cannot be read and
    /// [`InstallerError::InvalidOptionsFile`] when it is not valid TOML or
    /// contains keys other than the recognised options.
    pub fn from_options_file(path: &Utf8Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_options_file(&contents).map_err(|reason| InstallerError::InvalidOptionsFile {
            path: path.to_owned(),
            reason,
        })
    }

    fn parse_options_file(contents: &str) -> std::result::Result<Self, String> {
        let file: OptionsFile = toml::from_str(contents).map_err(|e| e.to_string())?;
        let InstallTable {
            prefix,
            eprefix,
            bindir,
            datadir,
        } = file.install;

        let values = [
            (OptionName::Prefix, prefix),
            (OptionName::Eprefix, eprefix),
            (OptionName::Bindir, bindir),
            (OptionName::Datadir, datadir),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();
        Ok(Self { values })
    }

    /// Layer `overrides` on top of `self`; entries in `overrides` win.
    #[must_use]
    pub fn merged_with(mut self, overrides: &Self) -> Self {
        for (name, value) in overrides.iter() {
            self.values.insert(name, value.to_owned());
        }
        self
    }
}
