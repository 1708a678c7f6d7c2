//! catalog-acl CLI
//!
//! Loads a policy table the same way a host engine would and answers
//! access questions against it.

use anyhow::Context;
use catalog_acl::{AclConfig, DbAccessControlFactory, Identity, LookupMode};
use clap::{Parser, Subcommand};
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog-acl")]
#[command(about = "Inspect database-backed catalog access control")]
struct Args {
    /// Path to TOML config (db-path, db-table, ...)
    #[arg(short = 'c', long)]
    config: PathBuf,

    /// Override the lookup mode (scan, indexed)
    #[arg(long)]
    lookup: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a user may access a catalog (exit code 1 on denial)
    Check {
        #[arg(short, long)]
        user: String,
        #[arg(short = 'k', long)]
        catalog: String,
    },
    /// Print which of the given catalogs a user may access
    Filter {
        #[arg(short, long)]
        user: String,
        #[arg(required = true)]
        catalogs: Vec<String>,
    },
    /// List every catalog granted to a user
    List {
        #[arg(short, long)]
        user: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = AclConfig::load(&args.config)
        .with_context(|| format!("reading config {:?}", args.config))?;
    if let Some(lookup) = &args.lookup {
        let mode: LookupMode = lookup.parse().map_err(anyhow::Error::msg)?;
        config = config.with_lookup(mode);
    }

    info!("Loading policy table {} from {}", config.db_table, config.db_path);
    let control = DbAccessControlFactory
        .build(&config)
        .context("loading policy table")?;
    let evaluator = control.evaluator();

    match args.command {
        Command::Check { user, catalog } => {
            let identity = Identity::new(user);
            evaluator.check_access(&identity, &catalog)?;
            println!("allowed: {} -> {}", identity, catalog);
        }
        Command::Filter { user, catalogs } => {
            let identity = Identity::new(user);
            let requested: HashSet<String> = catalogs.into_iter().collect();
            let visible: BTreeSet<String> = evaluator
                .filter_resources(&identity, requested)
                .into_iter()
                .collect();
            for catalog in visible {
                println!("{}", catalog);
            }
        }
        Command::List { user } => {
            let identity = Identity::new(user);
            for catalog in evaluator.granted_catalogs(&identity) {
                println!("{}", catalog);
            }
        }
    }

    Ok(())
}
