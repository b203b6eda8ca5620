//! Output formatting for the installer CLI.
//!
//! Renders the resolved configuration, the option help listing and dry-run
//! plans as plain text for stderr.

use crate::option::OptionName;
use crate::staging::Operation;
use camino::Utf8Path;
use std::collections::BTreeMap;

/// Format the resolved installation directories, one per line.
///
/// # Example
///
/// ```
/// use gonstruct_installer::option::OptionName;
/// use gonstruct_installer::output::config_summary;
/// use std::collections::BTreeMap;
///
/// let config = BTreeMap::from([(OptionName::Prefix, "/usr/local".to_owned())]);
/// assert_eq!(config_summary(&config), "  prefix   /usr/local");
/// ```
#[must_use]
pub fn config_summary(config: &BTreeMap<OptionName, String>) -> String {
    config
        .iter()
        .map(|(name, value)| format!("  {:<8} {value}", name.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a success message after installation.
#[must_use]
pub fn success_message(count: usize, destdir: Option<&Utf8Path>) -> String {
    let plural = if count == 1 { "file" } else { "files" };
    destdir.map_or_else(
        || format!("Successfully installed {count} {plural}"),
        |root| format!("Successfully staged {count} {plural} under {root}"),
    )
}

/// Dry-run information: resolved directories and the planned operations.
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Resolved directories keyed by option name.
    pub config: &'a BTreeMap<OptionName, String>,
    /// Staging root, if any.
    pub destdir: Option<&'a Utf8Path>,
    /// Operations the install would perform.
    pub operations: &'a [Operation],
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            "Installation directories:".to_owned(),
            config_summary(self.config),
        ];

        if let Some(root) = self.destdir {
            lines.push(format!("Staging root: {root}"));
        }

        lines.push(String::new());
        if self.operations.is_empty() {
            lines.push("Nothing to install.".to_owned());
        } else {
            lines.push("Planned operations:".to_owned());
            for operation in self.operations {
                lines.push(format!("  - {operation}"));
            }
        }

        lines.join("\n")
    }
}
