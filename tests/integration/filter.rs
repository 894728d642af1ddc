//! Command filter properties
//!
//! Registries, ignored sets and reserved sets are generated from one small
//! vocabulary so that collisions are frequent.

use std::collections::BTreeSet;
use std::rc::Rc;

use cmdshell::filter::{CommandFilter, IgnoredCommandSet, ReservedWordSet};
use cmdshell::registry::{Command, CommandRegistry};
use cmdshell::shell::{CommandTable, Invoker, ProcessInvoker};
use proptest::prelude::*;

/// Words drawn from a narrow alphabet so names, aliases and reserved words overlap
fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-d]{1,2}",
        "[a-d]{1,2}:[a-d]{1,2}",
        Just("exit".to_string()),
        Just("help".to_string()),
    ]
}

fn registry_strategy() -> impl Strategy<Value = Vec<Command>> {
    prop::collection::btree_map(
        word_strategy(),
        prop::collection::vec(word_strategy(), 0..4),
        0..12,
    )
    .prop_map(|commands| {
        commands
            .into_iter()
            .map(|(name, aliases)| Command::new(name).with_aliases(aliases))
            .collect()
    })
}

fn word_set_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(word_strategy(), 0..6)
}

fn filter_of(
    ignored: &BTreeSet<String>,
    reserved: &BTreeSet<String>,
) -> CommandFilter {
    CommandFilter::new(
        IgnoredCommandSet::new(ignored.iter().cloned()),
        ReservedWordSet::new(reserved.iter().cloned()),
    )
}

proptest! {
    #[test]
    fn test_ignored_and_reserved_names_excluded(
        commands in registry_strategy(),
        ignored in word_set_strategy(),
        reserved in word_set_strategy(),
    ) {
        let registry: CommandRegistry = commands.into_iter().collect();
        let exposed = filter_of(&ignored, &reserved).filter(registry.entries());

        for command in &exposed {
            prop_assert!(!ignored.contains(&command.name));
            prop_assert!(!reserved.contains(&command.name));
        }
    }

    #[test]
    fn test_exposed_names_are_the_eligible_canonical_commands(
        commands in registry_strategy(),
        ignored in word_set_strategy(),
        reserved in word_set_strategy(),
    ) {
        let expected: BTreeSet<String> = commands
            .iter()
            .map(|c| c.name.clone())
            .filter(|name| !ignored.contains(name) && !reserved.contains(name))
            .collect();
        let registry: CommandRegistry = commands.into_iter().collect();
        let exposed = filter_of(&ignored, &reserved).filter(registry.entries());

        let names: BTreeSet<String> = exposed.iter().map(|c| c.name.clone()).collect();
        prop_assert_eq!(names.len(), exposed.len());
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn test_alias_entries_excluded(
        commands in registry_strategy(),
        reserved in word_set_strategy(),
    ) {
        let registry: CommandRegistry = commands.into_iter().collect();
        let exposed = filter_of(&BTreeSet::new(), &reserved).filter(registry.entries());
        let names: BTreeSet<&str> = exposed.iter().map(|c| c.name.as_str()).collect();

        for (key, command) in registry.entries() {
            if key != command.name {
                prop_assert!(!names.contains(key));
            }
        }
    }

    #[test]
    fn test_exposed_aliases_avoid_reserved_words(
        commands in registry_strategy(),
        reserved in word_set_strategy(),
    ) {
        let registry: CommandRegistry = commands.into_iter().collect();
        let exposed = filter_of(&BTreeSet::new(), &reserved).filter(registry.entries());

        for command in &exposed {
            let original = registry.get(&command.name).unwrap();
            for alias in &original.aliases {
                prop_assert_eq!(command.aliases.contains(alias), !reserved.contains(alias));
            }
            prop_assert!(command.aliases.iter().all(|a| original.aliases.contains(a)));
        }
    }

    #[test]
    fn test_filtered_commands_always_register(
        commands in registry_strategy(),
        ignored in word_set_strategy(),
        reserved in word_set_strategy(),
    ) {
        let registry: CommandRegistry = commands.into_iter().collect();
        let exposed = filter_of(&ignored, &reserved).filter(registry.entries());

        let invoker: Rc<dyn Invoker> = Rc::new(ProcessInvoker::new("true"));
        let mut table = CommandTable::new(ReservedWordSet::new(reserved.iter().cloned()));
        prop_assert_eq!(table.register_all(exposed.clone(), invoker), Ok(()));
        prop_assert_eq!(table.len(), exposed.len());

        for command in &exposed {
            prop_assert_eq!(table.lookup(&command.name).map(|c| c.name()), Some(command.name.as_str()));
            for alias in &command.aliases {
                let holder = table.lookup(alias).map(|c| c.command());
                prop_assert!(holder.is_some_and(|c| c.name == *alias || c.aliases.contains(alias)));
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent(
        commands in registry_strategy(),
        ignored in word_set_strategy(),
        reserved in word_set_strategy(),
    ) {
        let registry: CommandRegistry = commands.into_iter().collect();
        let filter = filter_of(&ignored, &reserved);

        let first = filter.filter(registry.entries());
        let second = filter.filter(registry.entries());
        prop_assert_eq!(&first, &second);

        let refiltered: CommandRegistry = first.iter().cloned().collect();
        let mut third = filter.filter(refiltered.entries());
        let mut first = first;
        first.sort_by(|a, b| a.name.cmp(&b.name));
        third.sort_by(|a, b| a.name.cmp(&b.name));
        prop_assert_eq!(first, third);
    }
}

#[test]
fn test_default_sets_on_typical_host() {
    let registry: CommandRegistry = [
        Command::new("help"),
        Command::new("list"),
        Command::new("shell").with_aliases(["cli", "php"]),
        Command::new("status").with_aliases(["st"]),
        Command::new("cache:rebuild").with_aliases(["cr", "rebuild"]),
        Command::new("sql:cli").with_aliases(["sqlc", "if"]),
        Command::new("history:clear").with_aliases(["history", "clear"]),
    ]
    .into_iter()
    .collect();

    let exposed = CommandFilter::default().filter(registry.entries());
    let summary: Vec<(String, Vec<String>)> = exposed
        .iter()
        .map(|c| (c.name.clone(), c.aliases.iter().cloned().collect()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("status".to_string(), vec!["st".to_string()]),
            ("cache:rebuild".to_string(), vec!["cr".to_string(), "rebuild".to_string()]),
            ("sql:cli".to_string(), vec!["sqlc".to_string()]),
            ("history:clear".to_string(), vec![]),
        ]
    );
}
