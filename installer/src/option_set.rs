//! Option registration and `${name}` expansion.
//!
//! [`OptionSet`] is the build-side consumer of the option schema. It collects
//! declarations in registration order and resolves user overrides against the
//! declared defaults, substituting `${name}` references with values that were
//! resolved earlier in the order.

use crate::args::ResolvedArgs;
use crate::error::{InstallerError, Result};
use crate::option::{OptionName, OptionSink};
use std::collections::BTreeMap;

/// A declared option as stored by [`OptionSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredOption {
    /// The option identifier.
    pub name: OptionName,
    /// Help text.
    pub description: String,
    /// Default expression.
    pub default: String,
}

/// Ordered collection of declared options.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    declared: Vec<DeclaredOption>,
}

impl OptionSink for OptionSet {
    fn add(&mut self, name: OptionName, description: &str, default: &str) {
        let option = DeclaredOption {
            name,
            description: description.to_owned(),
            default: default.to_owned(),
        };
        if let Some(existing) = self.declared.iter_mut().find(|d| d.name == name) {
            *existing = option;
            return;
        }
        self.declared.push(option);
    }
}

impl OptionSet {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the declared options in registration order.
    #[must_use]
    pub fn specs(&self) -> &[DeclaredOption] {
        &self.declared
    }

    /// Resolve every declared option against `overrides`.
    ///
    /// Each option takes its override when present, otherwise its default
    /// expression. The chosen expression then has its `${name}` references
    /// replaced by the values of options resolved before it. Overrides for
    /// options that were never declared are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnresolvedReference`] when an expression
    /// refers to an unknown or later option, and
    /// [`InstallerError::MalformedReference`] for an unterminated `${`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gonstruct_installer::args::ResolvedArgs;
    /// use gonstruct_installer::option::{OPTION_SCHEMA, OptionName, register_options};
    /// use gonstruct_installer::option_set::OptionSet;
    ///
    /// let mut options = OptionSet::new();
    /// register_options(&mut options, &OPTION_SCHEMA);
    ///
    /// let overrides = ResolvedArgs::new().with(OptionName::Prefix, "/opt/x");
    /// let resolved = options.resolve(&overrides)?;
    /// assert_eq!(resolved.get(OptionName::Bindir), Some("/opt/x/bin"));
    /// # Ok::<(), gonstruct_installer::error::InstallerError>(())
    /// ```
    pub fn resolve(&self, overrides: &ResolvedArgs) -> Result<ResolvedArgs> {
        let mut resolved: BTreeMap<OptionName, String> = BTreeMap::new();
        for option in &self.declared {
            let expression = overrides
                .get(option.name)
                .unwrap_or(option.default.as_str());
            let value = expand(option.name, expression, &resolved)?;
            resolved.insert(option.name, value);
        }
        Ok(resolved
            .into_iter()
            .fold(ResolvedArgs::new(), |args, (name, value)| {
                args.with(name, value)
            }))
    }

    /// Render a help listing of the declared options.
    #[must_use]
    pub fn help_text(&self) -> String {
        self.declared
            .iter()
            .map(|option| {
                format!(
                    "{}: {}\n    default: {}\n",
                    option.name, option.description, option.default
                )
            })
            .collect()
    }
}

/// Substitute `${name}` references in `expression`.
fn expand(
    option: OptionName,
    expression: &str,
    resolved: &BTreeMap<OptionName, String>,
) -> Result<String> {
    let mut output = String::with_capacity(expression.len());
    let mut rest = expression;

    while let Some(start) = rest.find("${") {
        let (literal, tail) = rest.split_at(start);
        output.push_str(literal);

        let after_open = tail.get(2..).unwrap_or_default();
        let Some(end) = after_open.find('}') else {
            return Err(InstallerError::MalformedReference {
                option: option.to_string(),
                expression: expression.to_owned(),
            });
        };
        let (reference, after_reference) = after_open.split_at(end);

        let value = reference
            .parse::<OptionName>()
            .ok()
            .and_then(|name| resolved.get(&name))
            .ok_or_else(|| InstallerError::UnresolvedReference {
                option: option.to_string(),
                reference: reference.to_owned(),
            })?;
        output.push_str(value);
        rest = after_reference.get(1..).unwrap_or_default();
    }

    output.push_str(rest);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{OPTION_SCHEMA, register_options};
    use rstest::{fixture, rstest};

    #[fixture]
    fn schema() -> OptionSet {
        let mut options = OptionSet::new();
        register_options(&mut options, &OPTION_SCHEMA);
        options
    }

    #[rstest]
    fn resolve_without_overrides_uses_schema_defaults(schema: OptionSet) {
        let resolved = schema.resolve(&ResolvedArgs::new()).expect("resolves");
        assert_eq!(resolved.get(OptionName::Prefix), Some("/usr"));
        assert_eq!(resolved.get(OptionName::Eprefix), Some("/usr"));
        assert_eq!(resolved.get(OptionName::Bindir), Some("/usr/bin"));
        assert_eq!(
            resolved.get(OptionName::Datadir),
            Some("/usr/share/gonstruct")
        );
    }

    #[rstest]
    fn resolve_cascades_prefix_override(schema: OptionSet) {
        let overrides = ResolvedArgs::new().with(OptionName::Prefix, "/opt/x");
        let resolved = schema.resolve(&overrides).expect("resolves");
        assert_eq!(resolved.get(OptionName::Eprefix), Some("/opt/x"));
        assert_eq!(resolved.get(OptionName::Bindir), Some("/opt/x/bin"));
        assert_eq!(
            resolved.get(OptionName::Datadir),
            Some("/opt/x/share/gonstruct")
        );
    }

    #[rstest]
    fn resolve_cascades_eprefix_override_to_bindir_only(schema: OptionSet) {
        let overrides = ResolvedArgs::new().with(OptionName::Eprefix, "/opt/arch");
        let resolved = schema.resolve(&overrides).expect("resolves");
        assert_eq!(resolved.get(OptionName::Prefix), Some("/usr"));
        assert_eq!(resolved.get(OptionName::Bindir), Some("/opt/arch/bin"));
        assert_eq!(
            resolved.get(OptionName::Datadir),
            Some("/usr/share/gonstruct")
        );
    }

    #[rstest]
    fn resolve_expands_references_inside_overrides(schema: OptionSet) {
        let overrides = ResolvedArgs::new()
            .with(OptionName::Prefix, "/opt/x")
            .with(OptionName::Bindir, "${prefix}/sbin");
        let resolved = schema.resolve(&overrides).expect("resolves");
        assert_eq!(resolved.get(OptionName::Bindir), Some("/opt/x/sbin"));
    }

    #[rstest]
    #[case::forward_reference("${datadir}/bin", "datadir")]
    #[case::unknown_reference("${libdir}/bin", "libdir")]
    #[case::self_reference("${bindir}", "bindir")]
    fn resolve_rejects_unresolvable_references(
        schema: OptionSet,
        #[case] bindir: &str,
        #[case] reference: &str,
    ) {
        let overrides = ResolvedArgs::new().with(OptionName::Bindir, bindir);
        let err = schema.resolve(&overrides).expect_err("unresolvable");
        assert!(
            matches!(&err, InstallerError::UnresolvedReference { option, reference: r }
                if option == "bindir" && r == reference),
            "unexpected error: {err:?}"
        );
    }

    #[rstest]
    fn resolve_rejects_unterminated_reference(schema: OptionSet) {
        let overrides = ResolvedArgs::new().with(OptionName::Datadir, "${prefix/share");
        let err = schema.resolve(&overrides).expect_err("malformed");
        assert!(matches!(err, InstallerError::MalformedReference { .. }));
    }

    #[test]
    fn expand_keeps_lone_dollar_signs() {
        let resolved = BTreeMap::new();
        let value = expand(OptionName::Prefix, "/opt/$HOME", &resolved).expect("literal");
        assert_eq!(value, "/opt/$HOME");
    }

    #[test]
    fn redeclaring_an_option_replaces_it_in_place() {
        let mut options = OptionSet::new();
        options.add(OptionName::Prefix, "first", "/usr");
        options.add(OptionName::Bindir, "bin", "${prefix}/bin");
        options.add(OptionName::Prefix, "second", "/opt");

        let names: Vec<_> = options.specs().iter().map(|o| o.name).collect();
        assert_eq!(names, [OptionName::Prefix, OptionName::Bindir]);
        assert_eq!(options.specs().first().map(|o| o.default.as_str()), Some("/opt"));
    }

    #[rstest]
    fn help_text_lists_every_option(schema: OptionSet) {
        let help = schema.help_text();
        for name in OptionName::ALL {
            assert!(help.contains(name.as_str()), "missing {name}");
        }
        assert!(help.contains("default: ${eprefix}/bin"));
    }
}
