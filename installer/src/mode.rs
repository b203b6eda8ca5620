//! Symbolic Unix permission modes.
//!
//! Installed files receive a mode through a scheduled post action. Modes are
//! spelled as owner/group/other access sets rather than bare integers, so a
//! decimal `755` can never be mistaken for the octal `0o755`.

use std::fmt;

/// Read, write and execute bits for one class of user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Access {
    /// Read permission.
    pub read: bool,
    /// Write permission.
    pub write: bool,
    /// Execute (or search, for directories) permission.
    pub execute: bool,
}

impl Access {
    /// No access.
    pub const NONE: Self = Self::new(false, false, false);
    /// Read only.
    pub const READ: Self = Self::new(true, false, false);
    /// Read and write.
    pub const READ_WRITE: Self = Self::new(true, true, false);
    /// Read and execute.
    pub const READ_EXECUTE: Self = Self::new(true, false, true);
    /// Read, write and execute.
    pub const ALL: Self = Self::new(true, true, true);

    const fn new(read: bool, write: bool, execute: bool) -> Self {
        Self {
            read,
            write,
            execute,
        }
    }

    const fn bits(self) -> u32 {
        (self.read as u32) << 2 | (self.write as u32) << 1 | self.execute as u32
    }

    const fn from_bits(bits: u32) -> Self {
        Self::new(bits & 0o4 != 0, bits & 0o2 != 0, bits & 0o1 != 0)
    }

    const fn symbolic(self) -> [char; 3] {
        [
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.execute { 'x' } else { '-' },
        ]
    }
}

/// A permission mode for an installed file.
///
/// # Examples
///
/// ```
/// use gonstruct_installer::mode::{Access, FileMode};
///
/// let mode = FileMode::new(Access::ALL, Access::READ_EXECUTE, Access::READ_EXECUTE);
/// assert_eq!(mode, FileMode::PROGRAM);
/// assert_eq!(mode.bits(), 0o755);
/// assert_eq!(mode.to_string(), "0755");
/// assert_eq!(mode.symbolic(), "rwxr-xr-x");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode {
    owner: Access,
    group: Access,
    other: Access,
}

impl FileMode {
    /// `rwxr-xr-x`: executables.
    pub const PROGRAM: Self = Self::new(Access::ALL, Access::READ_EXECUTE, Access::READ_EXECUTE);

    /// `rw-r--r--`: non-executable data files.
    pub const DATA: Self = Self::new(Access::READ_WRITE, Access::READ, Access::READ);

    /// Build a mode from per-class access sets.
    #[must_use]
    pub const fn new(owner: Access, group: Access, other: Access) -> Self {
        Self {
            owner,
            group,
            other,
        }
    }

    /// Build a mode from the low nine permission bits; higher bits are
    /// discarded.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self::new(
            Access::from_bits(bits >> 6),
            Access::from_bits(bits >> 3),
            Access::from_bits(bits),
        )
    }

    /// Return the numeric mode, e.g. `0o644`.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.owner.bits() << 6 | self.group.bits() << 3 | self.other.bits()
    }

    /// Return the owner access set.
    #[must_use]
    pub const fn owner(self) -> Access {
        self.owner
    }

    /// Return the group access set.
    #[must_use]
    pub const fn group(self) -> Access {
        self.group
    }

    /// Return the access set for all other users.
    #[must_use]
    pub const fn other(self) -> Access {
        self.other
    }

    /// Return `true` if any class may execute the file.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        self.owner.execute || self.group.execute || self.other.execute
    }

    /// Render as `ls -l` style text, e.g. `rw-r--r--`.
    #[must_use]
    pub fn symbolic(self) -> String {
        [self.owner, self.group, self.other]
            .into_iter()
            .flat_map(Access::symbolic)
            .collect()
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::DATA
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.bits())
    }
}
