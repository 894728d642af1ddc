//! Bootstrap from manifest and alias files

use std::fs;
use std::path::{Path, PathBuf};

use cmdshell::alias::SiteAliasManager;
use cmdshell::bootstrap::{locate_root, Bootstrapper, HostEnvironment, ManifestHost, SessionOptions};
use cmdshell::history::path_digest;
use cmdshell::registry::manifest::HostManifest;
use cmdshell::shell::{dispatch, parse_line, CommandResult, HistoryInfo};
use cmdshell::util::config::UserConfig;

const MANIFEST: &str = r#"
[host]
name = "sitectl"
binary = "true"
version = "10"

[[commands]]
name = "help"

[[commands]]
name = "shell"
aliases = ["cli"]

[[commands]]
name = "status"
aliases = ["st", "exit"]
description = "Show site status"

[[commands]]
name = "cache:rebuild"
aliases = ["cr", "clear"]
description = "Rebuild all caches"

[[commands]]
name = "if"
"#;

const ALIASES: &str = r#"
[[site]]
name = "prodserver"
aliases = ["prod"]
root = "/var/www/prod"
"#;

struct Fixture {
    _dir: tempfile::TempDir,
    cache: PathBuf,
    site: PathBuf,
    manifest: HostManifest,
    aliases: SiteAliasManager,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache");
    let site = dir.path().join("site");
    fs::create_dir_all(site.join("web")).unwrap();
    fs::write(site.join("site.toml"), "").unwrap();

    let manifest_path = dir.path().join("host.toml");
    fs::write(&manifest_path, MANIFEST).unwrap();
    let aliases_path = dir.path().join("aliases.toml");
    fs::write(&aliases_path, ALIASES).unwrap();

    Fixture {
        cache,
        site,
        manifest: HostManifest::load(&manifest_path).unwrap(),
        aliases: SiteAliasManager::load(&aliases_path).unwrap(),
        _dir: dir,
    }
}

fn config(cache: &Path) -> UserConfig {
    UserConfig {
        cache_dir: Some(cache.to_path_buf()),
        tool_name: "sitectl".to_string(),
        ..UserConfig::default()
    }
}

#[test]
fn test_site_discovered_from_nested_directory() {
    let fx = fixture();
    let cwd = fx.site.join("web");
    let root = locate_root(None, None, &cwd, "site.toml").unwrap();
    assert_eq!(root.as_deref(), Some(fx.site.as_path()));

    let host = ManifestHost::new(fx.manifest.clone(), root);
    let options = SessionOptions {
        working_directory: cwd,
        ..SessionOptions::default()
    };
    let boot = Bootstrapper::new(config(&fx.cache), options, fx.aliases.clone());

    let expected = fx
        .cache
        .join("cli")
        .join(format!("sitectl-site-{}", path_digest(&fx.site.display().to_string())));
    assert_eq!(boot.history_path(&host).unwrap(), expected);
}

#[test]
fn test_alias_session_uses_canonical_name() {
    let fx = fixture();
    let site = fx.aliases.sites()[0].clone();
    let root = locate_root(None, site.root.as_deref(), Path::new("/"), "site.toml").unwrap();
    let host = ManifestHost::new(fx.manifest.clone(), root);
    assert_eq!(host.root(), Some(Path::new("/var/www/prod")));

    let options = SessionOptions {
        alias: Some("@prod".to_string()),
        working_directory: PathBuf::from("/"),
        ..SessionOptions::default()
    };
    let boot = Bootstrapper::new(config(&fx.cache), options, fx.aliases.clone());
    assert_eq!(
        boot.history_path(&host).unwrap(),
        fx.cache.join("cli").join("sitectl-site-prodserver")
    );
}

#[test]
fn test_version_history_shared_across_sites() {
    let fx = fixture();
    let options = SessionOptions {
        use_version_history: true,
        working_directory: PathBuf::from("/"),
        ..SessionOptions::default()
    };
    let boot = Bootstrapper::new(config(&fx.cache), options, fx.aliases.clone());

    let here = ManifestHost::new(fx.manifest.clone(), Some(fx.site.clone()));
    let there = ManifestHost::new(fx.manifest.clone(), Some(PathBuf::from("/var/www/other")));
    let path = boot.history_path(&here).unwrap();
    assert_eq!(path, boot.history_path(&there).unwrap());
    assert!(path.ends_with("sitectl-10"));
}

#[test]
fn test_exposed_commands_from_manifest() {
    let fx = fixture();
    let host = ManifestHost::new(fx.manifest.clone(), None);
    let boot = Bootstrapper::new(config(&fx.cache), SessionOptions::default(), fx.aliases.clone());

    let exposed = boot.exposed_commands(&host);
    let names: Vec<&str> = exposed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["status", "cache:rebuild"]);
    assert_eq!(exposed[0].aliases.iter().collect::<Vec<_>>(), vec!["st"]);
    assert_eq!(exposed[1].aliases.iter().collect::<Vec<_>>(), vec!["cr"]);
}

#[test]
fn test_configured_filter_words() {
    let fx = fixture();
    let host = ManifestHost::new(fx.manifest.clone(), None);
    let mut config = config(&fx.cache);
    config.commands.ignore.push("status".to_string());
    config.commands.reserve.push("cr".to_string());
    let boot = Bootstrapper::new(config, SessionOptions::default(), fx.aliases.clone());

    let exposed = boot.exposed_commands(&host);
    assert_eq!(exposed.len(), 1);
    assert_eq!(exposed[0].name, "cache:rebuild");
    assert!(exposed[0].aliases.is_empty());
}

#[test]
fn test_alias_matching_another_command_name_does_not_abort() {
    let fx = fixture();
    for manifest in [
        "[host]\nname = \"sitectl\"\n\n[[commands]]\nname = \"core:status\"\naliases = [\"status\"]\n\n[[commands]]\nname = \"status\"\n",
        "[host]\nname = \"sitectl\"\n\n[[commands]]\nname = \"status\"\n\n[[commands]]\nname = \"core:status\"\naliases = [\"status\"]\n",
    ] {
        let mut host = ManifestHost::new(HostManifest::from_toml_str(manifest).unwrap(), None);
        let boot = Bootstrapper::new(config(&fx.cache), SessionOptions::default(), fx.aliases.clone());
        let prepared = boot.prepare(&mut host).unwrap();

        assert_eq!(prepared.table.len(), 2);
        assert_eq!(prepared.table.lookup("status").unwrap().name(), "status");
        assert_eq!(prepared.table.lookup("core:status").unwrap().name(), "core:status");
    }
}

#[cfg(unix)]
#[test]
fn test_prepared_shell_runs_host_commands() {
    let fx = fixture();
    let mut host = ManifestHost::new(fx.manifest.clone(), None);
    let options = SessionOptions {
        working_directory: PathBuf::from("/tmp/proj"),
        ..SessionOptions::default()
    };
    let boot = Bootstrapper::new(config(&fx.cache), options, fx.aliases.clone());
    let prepared = boot.prepare(&mut host).unwrap();

    assert_eq!(
        prepared.config.history_file,
        fx.cache.join("cli").join(format!("global-{}", path_digest("/tmp/proj")))
    );

    let history = HistoryInfo {
        path: &prepared.config.history_file,
        entries: 0,
    };
    let words = parse_line("cr --yes").unwrap();
    assert_eq!(
        dispatch(&prepared.table, &words, history, false).unwrap(),
        CommandResult::Continue
    );
    let words = parse_line("exit").unwrap();
    assert_eq!(
        dispatch(&prepared.table, &words, history, false).unwrap(),
        CommandResult::Exit
    );
}
