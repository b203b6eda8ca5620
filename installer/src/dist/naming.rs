//! Release naming policy.
//!
//! Release archives are named `<product>-<version>-<arch>.tar.gz`, and every
//! entry inside them sits under a top-level directory named
//! `<product>-<version>-<arch>`.

use crate::option::PRODUCT_NAME;
use std::fmt;

/// Architecture tag used when none is given.
pub const DEFAULT_ARCH: &str = "lin64";

/// The fixed file extension for release archives.
const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// The name of a release: product, version and architecture tag.
///
/// # Examples
///
/// ```
/// use gonstruct_installer::dist::naming::ReleaseName;
///
/// let name = ReleaseName::new("0.4.1", "lin64");
/// assert_eq!(name.to_string(), "gonstruct-0.4.1-lin64");
/// assert_eq!(name.archive_filename(), "gonstruct-0.4.1-lin64.tar.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseName {
    product: String,
    version: String,
    arch: String,
}

impl ReleaseName {
    /// Name a gonstruct release.
    #[must_use]
    pub fn new(version: impl Into<String>, arch: impl Into<String>) -> Self {
        Self::for_product(PRODUCT_NAME, version, arch)
    }

    /// Name a release of an arbitrary product.
    #[must_use]
    pub fn for_product(
        product: impl Into<String>,
        version: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            arch: arch.into(),
        }
    }

    /// Return the product component.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the architecture component.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Return the archive filename, e.g. `gonstruct-0.4.1-lin64.tar.gz`.
    #[must_use]
    pub fn archive_filename(&self) -> String {
        format!("{self}{ARCHIVE_EXTENSION}")
    }
}

impl fmt::Display for ReleaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.product, self.version, self.arch)
    }
}
