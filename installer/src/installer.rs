//! Installation directory resolution and install registration.
//!
//! The [`Installer`] settles the four installation directories once, when it
//! is constructed, and afterwards only forwards registrations to its
//! [`Environment`]: copy the artefacts, add the destination to the `install`
//! alias, and schedule a permission change for every installed file.

use crate::args::ResolvedArgs;
use crate::environment::{Artefact, Environment, PostAction};
use crate::mode::FileMode;
use crate::option::{OptionName, PRODUCT_NAME};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::collections::BTreeMap;

/// Alias under which every install destination is registered.
pub const INSTALL_ALIAS: &str = "install";

/// Prefix used when no `prefix` option is supplied.
pub const FALLBACK_PREFIX: &str = "/usr/local";

/// Registers artefacts for installation under resolved directories.
#[derive(Debug)]
pub struct Installer<E> {
    prefix: Utf8PathBuf,
    eprefix: Utf8PathBuf,
    bindir: Utf8PathBuf,
    datadir: Utf8PathBuf,
    env: E,
}

impl<E: Environment> Installer<E> {
    /// Resolve the installation directories and take ownership of `env`.
    ///
    /// Supplied values are used verbatim. Missing ones fall back in order:
    /// `prefix` to `/usr/local`, `eprefix` to the resolved prefix, `bindir`
    /// to `<eprefix>/bin` and `datadir` to `<prefix>/share/gonstruct`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gonstruct_installer::args::ResolvedArgs;
    /// use gonstruct_installer::installer::Installer;
    /// use gonstruct_installer::option::OptionName;
    /// use gonstruct_installer::staging::StagingEnvironment;
    ///
    /// let args = ResolvedArgs::new().with(OptionName::Prefix, "/opt/x");
    /// let installer = Installer::new(StagingEnvironment::new(), &args);
    /// assert_eq!(installer.bindir().as_str(), "/opt/x/bin");
    /// assert_eq!(installer.datadir().as_str(), "/opt/x/share/gonstruct");
    /// ```
    #[must_use]
    pub fn new(env: E, args: &ResolvedArgs) -> Self {
        let prefix = Utf8PathBuf::from(
            args.get_or_else(OptionName::Prefix, || FALLBACK_PREFIX.to_owned()),
        );
        let eprefix = Utf8PathBuf::from(args.get_or_else(OptionName::Eprefix, || {
            prefix.to_string()
        }));
        let bindir = Utf8PathBuf::from(args.get_or_else(OptionName::Bindir, || {
            eprefix.join("bin").into_string()
        }));
        let datadir = Utf8PathBuf::from(args.get_or_else(OptionName::Datadir, || {
            prefix.join("share").join(PRODUCT_NAME).into_string()
        }));

        info!("{}: {prefix}", OptionName::Prefix);
        info!("{}: {eprefix}", OptionName::Eprefix);
        info!("{}: {bindir}", OptionName::Bindir);
        info!("{}: {datadir}", OptionName::Datadir);

        Self {
            prefix,
            eprefix,
            bindir,
            datadir,
            env,
        }
    }

    /// Return the resolved directories keyed by option name.
    #[must_use]
    pub fn config(&self) -> BTreeMap<OptionName, String> {
        BTreeMap::from([
            (OptionName::Prefix, self.prefix.to_string()),
            (OptionName::Eprefix, self.eprefix.to_string()),
            (OptionName::Bindir, self.bindir.to_string()),
            (OptionName::Datadir, self.datadir.to_string()),
        ])
    }

    /// Register `artefacts` for installation into `destination/subdir`.
    ///
    /// The environment receives one install request covering every artefact,
    /// the destination is added to the [`INSTALL_ALIAS`] alias, and each
    /// installed file gets a post action setting `mode`. An empty `subdir`
    /// installs directly into `destination`. Nothing is validated here; a
    /// missing source is reported when the environment runs the install.
    pub fn add(
        &mut self,
        destination: &Utf8Path,
        artefacts: &[Artefact],
        subdir: &str,
        mode: FileMode,
    ) {
        let target = if subdir.is_empty() {
            destination.to_owned()
        } else {
            destination.join(subdir)
        };
        debug!(
            "registering {} artefact(s) for {target} with mode {mode}",
            artefacts.len()
        );

        let installed = self.env.install(&target, artefacts);
        self.env.alias(INSTALL_ALIAS, &target);
        for file in &installed {
            self.env
                .add_post_action(file, PostAction::chmod(file.path(), mode));
        }
    }

    /// Register `artefacts` into `destination` with the data file mode.
    pub fn add_files(&mut self, destination: &Utf8Path, artefacts: &[Artefact]) {
        self.add(destination, artefacts, "", FileMode::DATA);
    }

    /// Register an executable for installation into `bindir`.
    pub fn add_program(&mut self, program: impl Into<Artefact>) {
        let bindir = self.bindir.clone();
        self.add(&bindir, &[program.into()], "", FileMode::PROGRAM);
    }

    /// Register a data file for installation into `datadir`.
    pub fn add_data(&mut self, datafile: impl Into<Artefact>) {
        let datadir = self.datadir.clone();
        self.add(&datadir, &[datafile.into()], "", FileMode::DATA);
    }
}

impl<E> Installer<E> {
    /// Return the resolved architecture-independent prefix.
    #[must_use]
    pub fn prefix(&self) -> &Utf8Path {
        &self.prefix
    }

    /// Return the resolved architecture-dependent prefix.
    #[must_use]
    pub fn eprefix(&self) -> &Utf8Path {
        &self.eprefix
    }

    /// Return the resolved executable directory.
    #[must_use]
    pub fn bindir(&self) -> &Utf8Path {
        &self.bindir
    }

    /// Return the resolved data directory.
    #[must_use]
    pub fn datadir(&self) -> &Utf8Path {
        &self.datadir
    }

    /// Borrow the environment.
    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.env
    }

    /// Consume the installer and return the environment.
    #[must_use]
    pub fn into_environment(self) -> E {
        self.env
    }
}

#[cfg(test)]
#[path = "installer_tests.rs"]
mod tests;
