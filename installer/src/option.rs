//! Installation-path option schema.
//!
//! Declares the four recognised installation options and their default
//! expressions. A default may embed another option as `${name}`; the
//! substitution is left to whoever consumes the registrations (see
//! [`crate::option_set::OptionSet`]).

use crate::error::InstallerError;
use std::fmt;
use std::str::FromStr;

/// The fixed name of the distributed product.
pub const PRODUCT_NAME: &str = "gonstruct";

/// Name of one of the recognised installation options.
///
/// The set is closed: parsing any other string fails rather than creating a
/// new option, so a misspelt override is reported instead of ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionName {
    /// Root directory for architecture-independent files.
    Prefix,
    /// Root directory for architecture-dependent files.
    Eprefix,
    /// Directory of executables.
    Bindir,
    /// Directory of data files.
    Datadir,
}

impl OptionName {
    /// All option names in dependency order.
    pub const ALL: [Self; 4] = [Self::Prefix, Self::Eprefix, Self::Bindir, Self::Datadir];

    /// Return the identifier used on the command line and in option files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Eprefix => "eprefix",
            Self::Bindir => "bindir",
            Self::Datadir => "datadir",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionName {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| InstallerError::UnknownOption { name: s.to_owned() })
    }
}

/// A declared option: name, human-readable description, default expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// The option identifier.
    pub name: OptionName,
    /// Help text shown to users.
    pub description: &'static str,
    /// Default expression, possibly containing `${name}` references.
    pub default: &'static str,
}

/// The option table registered by [`register_options`].
///
/// Entries are in dependency order: each default only references options
/// declared before it.
pub const OPTION_SCHEMA: [OptionSpec; 4] = [
    OptionSpec {
        name: OptionName::Prefix,
        description: "Directory of architecture independent files.",
        default: "/usr",
    },
    OptionSpec {
        name: OptionName::Eprefix,
        description: "Directory of architecture dependent files.",
        default: "${prefix}",
    },
    OptionSpec {
        name: OptionName::Bindir,
        description: "Directory of executables.",
        default: "${eprefix}/bin",
    },
    OptionSpec {
        name: OptionName::Datadir,
        description: "Directory of data files.",
        default: "${prefix}/share/gonstruct",
    },
];

/// A sink that accepts option declarations.
#[cfg_attr(test, mockall::automock)]
pub trait OptionSink {
    /// Declare an option with its description and default expression.
    fn add(&mut self, name: OptionName, description: &str, default: &str);
}

/// Register every option of `schema` with `sink`, in table order.
///
/// # Examples
///
/// ```
/// use gonstruct_installer::option::{OPTION_SCHEMA, register_options};
/// use gonstruct_installer::option_set::OptionSet;
///
/// let mut options = OptionSet::new();
/// register_options(&mut options, &OPTION_SCHEMA);
/// assert_eq!(options.specs().len(), 4);
/// ```
pub fn register_options(sink: &mut dyn OptionSink, schema: &[OptionSpec]) {
    for spec in schema {
        sink.add(spec.name, spec.description, spec.default);
    }
}
