//! Version scraping from the build script.
//!
//! The release version lives in the build script as an assignment of the form
//! `VERSION = '1.2.3'` or `VERSION = "1.2.3"`. The first such assignment wins.

use super::error::DistError;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Default name of the build script holding the version.
pub const VERSION_FILE: &str = "SConstruct";

/// `VERSION = '<value>'` with matching quotes; the value holds no quotes or
/// whitespace.
static VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(version_pattern);

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal exercised by the unit tests"
)]
fn version_pattern() -> Regex {
    Regex::new(r#"VERSION = (?:'([^'"\s]+)'|"([^'"\s]+)")"#).expect("valid VERSION pattern")
}

/// Return the version from the first `VERSION = '<value>'` assignment.
///
/// Both quote styles are accepted but must match, and the value may not
/// contain quotes or whitespace.
///
/// # Examples
///
/// ```
/// use gonstruct_installer::dist::version::scrape_version;
///
/// let script = "env = Environment()\nVERSION = '0.4.1'\n";
/// assert_eq!(scrape_version(script), Some("0.4.1"));
/// assert_eq!(scrape_version("VERSION = '0.4.1\""), None);
/// ```
#[must_use]
pub fn scrape_version(script: &str) -> Option<&str> {
    let captures = VERSION_ASSIGNMENT.captures(script)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str())
}

/// Read `path` and scrape its version.
///
/// # Errors
///
/// Returns [`DistError::Io`] if the file cannot be read and
/// [`DistError::VersionNotFound`] if it holds no version assignment.
pub fn read_version(path: &Path) -> Result<String, DistError> {
    let script = fs::read_to_string(path)?;
    scrape_version(&script)
        .map(str::to_owned)
        .ok_or_else(|| DistError::VersionNotFound(path.to_path_buf()))
}
