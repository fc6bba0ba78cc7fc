//! `jig list` command implementation

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{Config, SearchConfig};
use crate::finder::RepoFinder;
use crate::matcher::FuzzyMatcher;

#[derive(Args)]
pub struct ListArgs {
    /// Sort repositories by similarity to this search string
    query: Option<String>,

    /// Return exact matches only (default is fuzzy matching)
    #[arg(short = 'x', long)]
    exact: bool,

    /// Limit the number of results returned (0 = no limit)
    #[arg(short = 'n', long, default_value_t = 0)]
    limit: usize,
}

pub fn run(config: &Config, args: ListArgs) -> Result<()> {
    let here = std::env::current_dir().context("Cannot determine current directory")?;
    for repo in list_repos(&here, &config.search, &args) {
        println!("{}", repo);
    }
    Ok(())
}

/// Repositories below `root` as paths relative to it: in discovery order
/// without a query, ranked by the matcher with one.
fn list_repos(root: &Path, search: &SearchConfig, args: &ListArgs) -> Vec<String> {
    let names = RepoFinder::new(root, &search.marker, search.max_depth)
        .map(|repo| display_name(root, &repo));

    let Some(query) = &args.query else {
        return cap(names, args.limit).collect();
    };

    let mut matcher = FuzzyMatcher::new(query, args.exact);
    matcher.extend(names);
    cap(matcher.ranked().into_iter(), args.limit).collect()
}

fn cap<I: Iterator<Item = String>>(iter: I, limit: usize) -> impl Iterator<Item = String> {
    let limit = if limit == 0 { usize::MAX } else { limit };
    iter.take(limit)
}

fn display_name(root: &Path, repo: &Path) -> String {
    match repo.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => repo.display().to_string(),
    }
}
