//! Repository discovery below a directory

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Lazily yields repository roots below a directory.
///
/// A directory is a root when it has a child named `marker` (a directory for
/// ordinary clones, a file for worktrees and submodules). Roots are not
/// searched further, hidden directories are skipped, and the walk stops at
/// `max_depth` levels below the start. Siblings are visited in file name
/// order.
pub struct RepoFinder {
    walker: walkdir::IntoIter,
    marker: String,
}

impl RepoFinder {
    pub fn new(root: impl AsRef<Path>, marker: &str, max_depth: usize) -> Self {
        let walker = WalkDir::new(root)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self {
            walker,
            marker: marker.to_string(),
        }
    }
}

impl Iterator for RepoFinder {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.depth() > 0 && (is_hidden(&entry) || entry.file_name() == self.marker.as_str())
            {
                self.walker.skip_current_dir();
                continue;
            }
            if entry.path().join(&self.marker).exists() {
                self.walker.skip_current_dir();
                return Some(entry.into_path());
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_repo(root: &Path, rel: &str) {
        fs::create_dir_all(root.join(rel).join(".git")).unwrap();
    }

    fn found(root: &Path, max_depth: usize) -> Vec<String> {
        RepoFinder::new(root, ".git", max_depth)
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn test_finds_repos_in_name_order() {
        let temp = TempDir::new().unwrap();
        make_repo(temp.path(), "zeta");
        make_repo(temp.path(), "alpha");
        make_repo(temp.path(), "group/beta");
        fs::create_dir_all(temp.path().join("not-a-repo/src")).unwrap();

        assert_eq!(found(temp.path(), 4), vec!["alpha", "group/beta", "zeta"]);
    }

    #[test]
    fn test_respects_max_depth() {
        let temp = TempDir::new().unwrap();
        make_repo(temp.path(), "a");
        make_repo(temp.path(), "deep/er/repo");

        assert_eq!(found(temp.path(), 1), vec!["a"]);
        assert_eq!(found(temp.path(), 3), vec!["a", "deep/er/repo"]);
    }

    #[test]
    fn test_does_not_descend_into_repos_or_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        make_repo(temp.path(), "outer");
        make_repo(temp.path(), "outer/vendor/inner");
        make_repo(temp.path(), ".cache/hidden");

        assert_eq!(found(temp.path(), 4), vec!["outer"]);
    }

    #[test]
    fn test_marker_file_counts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("worktree")).unwrap();
        fs::write(temp.path().join("worktree/.git"), "gitdir: ../main/.git\n").unwrap();

        assert_eq!(found(temp.path(), 2), vec!["worktree"]);
    }

    #[test]
    fn test_custom_marker() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("hgrepo/.hg")).unwrap();
        make_repo(temp.path(), "gitrepo");

        let repos: Vec<PathBuf> = RepoFinder::new(temp.path(), ".hg", 2).collect();
        assert_eq!(repos, vec![temp.path().join("hgrepo")]);
    }

    #[test]
    fn test_root_itself_is_a_repo() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        make_repo(temp.path(), "nested");

        let repos: Vec<PathBuf> = RepoFinder::new(temp.path(), ".git", 3).collect();
        assert_eq!(repos, vec![temp.path().to_path_buf()]);
    }
}
