mod query;
mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Command, arg};

use spantree_index::config::IndexConfig;
use spantree_index::pool;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "spantree";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Static interval indexing for source spans: build once, then answer overlap queries.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Log index construction and query progress").global(true))
        .arg(arg!(-c --config <config> "Index settings in a toml file").global(true))
        .subcommand(query::cli::create_query_cli())
        .subcommand(stats::cli::create_stats_cli())
}

fn load_config(path: Option<&String>) -> Result<IndexConfig> {
    match path {
        Some(path) => IndexConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path)),
        None => Ok(IndexConfig::default()),
    }
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_config(matches.get_one::<String>("config"))?;
    pool::configure_shared(&config.pool);

    match matches.subcommand() {
        //
        // QUERY
        //
        Some((query::cli::QUERY_CMD, matches)) => {
            query::handlers::run_query(matches, &config.query)?;
        }

        //
        // STATS
        //
        Some((stats::cli::STATS_CMD, matches)) => {
            stats::handlers::run_stats(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use spantree_index::PredicateKind;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spantree.toml");
        std::fs::write(&path, "[query]\npredicate = \"contains\"\n").unwrap();

        let config = load_config(Some(&path.to_string_lossy().to_string())).unwrap();
        assert_eq!(config.query.predicate, PredicateKind::Contains);
        assert_eq!(config.pool, Default::default());

        assert_eq!(load_config(None).unwrap(), IndexConfig::default());
        assert_eq!(load_config(Some(&"spantree.yaml".to_string())).is_err(), true);
    }
}
