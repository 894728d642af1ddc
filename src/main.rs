//! cmdshell - CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cmdshell::alias::{AliasResolver, SiteAliasManager};
use cmdshell::bootstrap::{locate_root, Bootstrapper, ManifestHost, SessionOptions};
use cmdshell::registry::manifest::HostManifest;
use cmdshell::util::config::{load_config_file, load_user_config, UserConfig};
use cmdshell::util::logger::{self, LogLevel};
use cmdshell::{NAME, VERSION};

/// Interactive shell over a host CLI's commands
#[derive(Parser, Debug)]
#[command(name = "cmdshell")]
#[command(version = VERSION)]
#[command(about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of the user config
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Flags describing the session
#[derive(clap::Args, Debug)]
struct SessionArgs {
    /// Host manifest describing the host's commands
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Site alias file
    #[arg(long, value_name = "FILE")]
    aliases_file: Option<PathBuf>,

    /// Site root
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Site alias to target, e.g. @prod
    #[arg(long, value_name = "ALIAS")]
    alias: Option<String>,

    /// Share history across all sites of the host's version
    #[arg(long)]
    version_history: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive shell
    Shell {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Print the history file the shell would use
    HistoryPath {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Print the host commands the shell exposes
    Commands {
        #[command(flatten)]
        session: SessionArgs,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Print version information
    Version,
}

/// Load the host and alias records, locate the root, and build the bootstrapper
fn open_session(
    session: SessionArgs,
    config: UserConfig,
) -> Result<(ManifestHost, Bootstrapper)> {
    let manifest_path = match session.manifest.or_else(|| config.host.manifest.clone()) {
        Some(path) => path,
        None => bail!("No host manifest: pass --manifest or set host.manifest in the config"),
    };
    let manifest = HostManifest::load(&manifest_path)
        .with_context(|| format!("Failed to load host manifest: {}", manifest_path.display()))?;

    let aliases = match session.aliases_file.or_else(|| config.host.aliases.clone()) {
        Some(path) => SiteAliasManager::load(&path)
            .with_context(|| format!("Failed to load aliases: {}", path.display()))?,
        None => SiteAliasManager::default(),
    };

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let alias_root = match &session.alias {
        Some(alias) => aliases.resolve(alias)?.root,
        None => None,
    };
    let root = locate_root(
        session.root.as_deref(),
        alias_root.as_deref(),
        &cwd,
        &config.host.root_marker,
    )?;

    let options = SessionOptions {
        use_version_history: session.version_history,
        alias: session.alias,
        working_directory: cwd,
    };
    Ok((ManifestHost::new(manifest, root), Bootstrapper::new(config, options, aliases)))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_with_level(LogLevel::from_flags(args.verbose, args.debug));

    let config = match &args.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => load_user_config().context("Failed to load user config")?,
    };

    match args.command {
        Commands::Shell { session } => {
            let (mut host, boot) = open_session(session, config)?;
            boot.launch(&mut host).context("Shell session failed")?;
        }
        Commands::HistoryPath { session } => {
            let (host, boot) = open_session(session, config)?;
            println!("{}", boot.history_path(&host)?.display());
        }
        Commands::Commands { session, json } => {
            let (host, boot) = open_session(session, config)?;
            let commands = boot.exposed_commands(&host);
            if json {
                println!("{}", serde_json::to_string_pretty(&commands)?);
            } else {
                for command in &commands {
                    if command.aliases.is_empty() {
                        println!("{}", command.name);
                    } else {
                        let aliases: Vec<&str> = command.aliases.iter().map(String::as_str).collect();
                        println!("{} ({})", command.name, aliases.join(", "));
                    }
                }
            }
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}
