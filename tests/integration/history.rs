//! History path resolution

use std::path::{Path, PathBuf};

use cmdshell::alias::{AliasError, SiteAliasManager};
use cmdshell::history::{path_digest, HistoryPathResolver, SessionContext};
use proptest::prelude::*;

const ALIASES: &str = r#"
[[site]]
name = "prodserver"
aliases = ["prod"]
root = "/var/www/site"
"#;

fn aliases() -> SiteAliasManager {
    SiteAliasManager::from_toml_str(ALIASES).unwrap()
}

const CACHE: &str = "/home/u/.cache/cmdshell/cli";

fn resolve(ctx: &SessionContext) -> Result<PathBuf, AliasError> {
    HistoryPathResolver::new("sitectl").resolve(Path::new(CACHE), ctx, &aliases())
}

#[test]
fn test_global_history_for_working_directory() {
    let path = resolve(&SessionContext::global("/tmp/proj")).unwrap();
    assert_eq!(path.parent(), Some(Path::new(CACHE)));
    assert!(path.ends_with(format!("global-{}", path_digest("/tmp/proj"))));
}

#[test]
fn test_version_scoped_history() {
    let ctx = SessionContext::rooted("9", "/tmp/proj").with_version_history(true);
    assert!(resolve(&ctx).unwrap().ends_with("sitectl-9"));
}

#[test]
fn test_alias_scoped_history() {
    let ctx = SessionContext::rooted("/var/www/site", "/tmp/proj").with_alias(Some("@prod".to_string()));
    assert!(resolve(&ctx).unwrap().ends_with("sitectl-site-prodserver"));
}

#[test]
fn test_root_scoped_history() {
    let ctx = SessionContext::rooted("/var/www/site", "/tmp/proj");
    assert!(resolve(&ctx)
        .unwrap()
        .ends_with(format!("sitectl-site-{}", path_digest("/var/www/site"))));
}

#[test]
fn test_different_directories_get_different_global_files() {
    let a = resolve(&SessionContext::global("/tmp/a")).unwrap();
    let b = resolve(&SessionContext::global("/tmp/b")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_unresolvable_alias_is_an_error() {
    let ctx = SessionContext::rooted("/var/www/site", "/tmp/proj").with_alias(Some("@missing".to_string()));
    assert!(matches!(resolve(&ctx), Err(AliasError::Unknown(_))));
}

fn context_strategy() -> impl Strategy<Value = SessionContext> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::option::of(prop_oneof![Just("@prod".to_string()), Just("prodserver".to_string())]),
        prop_oneof!["[0-9]{1,2}", "/[a-z/]{0,20}"],
        "/[a-z/]{0,20}",
    )
        .prop_map(|(has_root, version, alias, root, cwd)| SessionContext {
            has_root_environment: has_root,
            use_version_history: version,
            active_alias_name: alias,
            root_path_or_version: root,
            working_directory: cwd,
        })
}

proptest! {
    #[test]
    fn test_resolution_is_deterministic(ctx in context_strategy()) {
        let first = resolve(&ctx).unwrap();
        let second = resolve(&ctx.clone()).unwrap();
        prop_assert_eq!(first.as_os_str().as_encoded_bytes(), second.as_os_str().as_encoded_bytes());
    }

    #[test]
    fn test_exactly_one_branch_applies(ctx in context_strategy()) {
        let identity = if !ctx.has_root_environment {
            format!("global-{}", path_digest(&ctx.working_directory))
        } else if ctx.use_version_history {
            format!("sitectl-{}", ctx.root_path_or_version)
        } else if ctx.active_alias_name.is_some() {
            "sitectl-site-prodserver".to_string()
        } else {
            format!("sitectl-site-{}", path_digest(&ctx.root_path_or_version))
        };
        prop_assert_eq!(resolve(&ctx).unwrap(), Path::new(CACHE).join(identity));
    }
}
