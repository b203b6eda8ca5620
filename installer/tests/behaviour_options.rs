//! Behaviour-driven tests for the installation option schema.
//!
//! Scenarios register the schema with an [`OptionSet`] and expand its
//! `${name}` defaults against user overrides.

use gonstruct_installer::args::ResolvedArgs;
use gonstruct_installer::error::InstallerError;
use gonstruct_installer::option::{OPTION_SCHEMA, OptionName, register_options};
use gonstruct_installer::option_set::OptionSet;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct OptionsWorld {
    options: OptionSet,
    overrides: Vec<String>,
    resolved: Option<ResolvedArgs>,
}

#[fixture]
fn world() -> OptionsWorld {
    OptionsWorld::default()
}

#[given("the registered option schema")]
fn given_registered_schema(world: &mut OptionsWorld) {
    register_options(&mut world.options, &OPTION_SCHEMA);
}

#[given("the override \"{assignment}\"")]
fn given_override(world: &mut OptionsWorld, assignment: String) {
    world.overrides.push(assignment);
}

#[when("the options are resolved")]
fn when_options_resolved(world: &mut OptionsWorld) {
    let overrides = ResolvedArgs::parse_overrides(&world.overrides).expect("valid overrides");
    world.resolved = Some(world.options.resolve(&overrides).expect("resolves"));
}

#[then("resolved option \"{name}\" is \"{expected}\"")]
fn then_resolved_option_is(world: &mut OptionsWorld, name: String, expected: String) {
    let name: OptionName = name.parse().expect("known option");
    let resolved = world.resolved.as_ref().expect("options resolved");
    assert_eq!(resolved.get(name), Some(expected.as_str()));
}

#[then("the overrides are rejected as unknown")]
fn then_overrides_rejected(world: &mut OptionsWorld) {
    let err = ResolvedArgs::parse_overrides(&world.overrides).expect_err("unknown option");
    assert!(matches!(err, InstallerError::UnknownOption { name } if name == "perfix"));
}

#[then("the help text lists prefix, eprefix, bindir and datadir in order")]
fn then_help_lists_options(world: &mut OptionsWorld) {
    let help = world.options.help_text();
    let positions: Vec<usize> = OptionName::ALL
        .iter()
        .map(|name| {
            let heading = format!("{name}:");
            help.lines()
                .position(|line| line.starts_with(&heading))
                .expect("option listed")
        })
        .collect();
    assert!(positions.is_sorted());
}

#[scenario(
    path = "tests/features/options.feature",
    name = "Schema defaults expand under /usr"
)]
fn scenario_schema_defaults(world: OptionsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/options.feature",
    name = "Overrides feed later references"
)]
fn scenario_override_references(world: OptionsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/options.feature",
    name = "Unknown option names are rejected"
)]
fn scenario_unknown_option(world: OptionsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/options.feature",
    name = "Help text lists every option in declaration order"
)]
fn scenario_help_text(world: OptionsWorld) {
    let _ = world;
}
