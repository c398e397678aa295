//! Local dataset checkout and revision markers.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use dexdb_model::UNKNOWN_REVISION;
use tracing::{info, warn};

/// Make sure the dataset checkout exists, shallow-cloning `repo_url` into
/// `dataset_dir` when it is missing and cloning is allowed.
pub fn ensure_dataset(dataset_dir: &Path, repo_url: &str, allow_clone: bool) -> Result<()> {
    if dataset_dir.exists() {
        return Ok(());
    }
    if !allow_clone {
        bail!(
            "dataset directory does not exist: {} (cloning disabled by --no-clone)",
            dataset_dir.display()
        );
    }

    info!(url = repo_url, dir = %dataset_dir.display(), "cloning dataset repository");
    let status = Command::new("git")
        .args(["clone", "--depth=1", repo_url])
        .arg(dataset_dir)
        .status()
        .context("failed to run git clone")?;
    if !status.success() {
        bail!("git clone of {repo_url} failed with {status}");
    }
    Ok(())
}

/// `git rev-parse HEAD` in `dir`, or [`UNKNOWN_REVISION`] when git cannot
/// report one.
pub fn revision_of(dir: &Path) -> String {
    match git_head(dir) {
        Some(sha) => sha,
        None => {
            warn!(dir = %dir.display(), "could not determine git revision");
            UNKNOWN_REVISION.to_string()
        }
    }
}

fn git_head(dir: &Path) -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_directory_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        ensure_dataset(dir.path(), "https://invalid.example/repo.git", false).unwrap();
    }

    #[test]
    fn missing_directory_without_clone_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_dataset(&dir.path().join("pokeapi"), "unused", false).unwrap_err();
        assert!(err.to_string().contains("dataset directory does not exist"));
    }

    #[test]
    fn non_checkout_has_unknown_revision() {
        let dir = tempfile::tempdir().unwrap();
        // A temp dir is not a git work tree (unless TMPDIR sits in one).
        let revision = revision_of(dir.path());
        assert!(revision == UNKNOWN_REVISION || revision.len() >= 40);
    }
}
