//! Read-only git inspections used by the sync engine.
//!
//! None of these fail: a git command that exits non-zero is read as
//! "unknown" (false, empty, zero) so one odd repository never aborts a run.

use super::types::AheadBranch;
use crate::git::GitRunner;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Remote every clone is synchronised against.
pub const REMOTE: &str = "origin";

/// `ls-remote --symref` line naming the branch the remote HEAD points at.
static SYMREF_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ref:\s+refs/heads/(\S+)\s+HEAD$").expect("symref pattern is valid")
});

/// Does `refs/heads/<branch>` exist locally?
pub fn branch_exists(git: &dyn GitRunner, repo_dir: &Path, branch: &str) -> bool {
    let refname = format!("refs/heads/{}", branch);
    git.run(repo_dir, &["show-ref", "--verify", "--quiet", &refname])
        .success()
}

/// Does the remote advertise `branch`?
pub fn remote_branch_exists(git: &dyn GitRunner, repo_dir: &Path, branch: &str) -> bool {
    !git.run(repo_dir, &["ls-remote", "--heads", REMOTE, branch])
        .is_empty()
}

/// Name of the checked-out branch (`HEAD` when detached), if readable.
pub fn current_branch(git: &dyn GitRunner, repo_dir: &Path) -> Option<String> {
    let output = git.run(repo_dir, &["rev-parse", "--abbrev-ref", "HEAD"]);
    if output.success() && !output.is_empty() {
        Some(output.stdout)
    } else {
        None
    }
}

/// Commits only in `local_ref` / only in `remote_ref`; `(0, 0)` when unknown.
pub fn ahead_behind(
    git: &dyn GitRunner,
    repo_dir: &Path,
    local_ref: &str,
    remote_ref: &str,
) -> (u32, u32) {
    let range = format!("{}...{}", local_ref, remote_ref);
    let output = git.run(repo_dir, &["rev-list", "--left-right", "--count", &range]);
    if !output.success() {
        return (0, 0);
    }
    parse_counts(&output.stdout).unwrap_or((0, 0))
}

fn parse_counts(stdout: &str) -> Option<(u32, u32)> {
    let mut parts = stdout.split_whitespace();
    let ahead = parts.next()?.parse().ok()?;
    let behind = parts.next()?.parse().ok()?;
    Some((ahead, behind))
}

/// Local branches with a configured upstream that hold unpushed commits.
pub fn list_ahead_branches(git: &dyn GitRunner, repo_dir: &Path) -> Vec<AheadBranch> {
    let output = git.run(
        repo_dir,
        &[
            "for-each-ref",
            "refs/heads",
            "--format=%(refname:short) %(upstream:short)",
        ],
    );

    let mut ahead = Vec::new();
    for line in output.lines() {
        let mut parts = line.split_whitespace();
        let (Some(local), Some(upstream)) = (parts.next(), parts.next()) else {
            continue;
        };
        let (count, _) = ahead_behind(git, repo_dir, local, upstream);
        if count > 0 {
            ahead.push(AheadBranch {
                branch: local.to_string(),
                ahead: count,
            });
        }
    }
    ahead
}

/// Does the working tree have uncommitted changes (untracked files included)?
pub fn is_dirty(git: &dyn GitRunner, repo_dir: &Path) -> bool {
    !git.run(repo_dir, &["status", "--porcelain"]).is_empty()
}

/// Branch the remote designates as default.
///
/// Asks the remote for its HEAD symref, then falls back to whichever of
/// `main` and `master` exists on the remote.
pub fn detect_default_branch(git: &dyn GitRunner, repo_dir: &Path) -> Option<String> {
    let output = git.run(repo_dir, &["ls-remote", "--symref", REMOTE, "HEAD"]);
    if let Some(branch) = parse_symref_head(&output.stdout) {
        return Some(branch);
    }

    ["main", "master"]
        .into_iter()
        .find(|candidate| remote_branch_exists(git, repo_dir, candidate))
        .map(str::to_string)
}

fn parse_symref_head(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| SYMREF_HEAD.captures(line.trim()))
        .map(|caps| caps[1].to_string())
}

/// Refresh only `refs/remotes/origin/<branch>`.
pub fn update_remote_branch(git: &dyn GitRunner, repo_dir: &Path, branch: &str) {
    let refspec = format!("refs/heads/{0}:refs/remotes/{1}/{0}", branch, REMOTE);
    let output = git.run(repo_dir, &["fetch", "-q", REMOTE, &refspec]);
    if !output.success() {
        tracing::debug!(
            repo = %repo_dir.display(),
            branch,
            error = %output.error_text(),
            "could not refresh remote-tracking branch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeGit;

    #[test]
    fn test_parse_symref_head() {
        let stdout = "ref: refs/heads/develop\tHEAD\n1234567890abcdef\tHEAD";
        assert_eq!(parse_symref_head(stdout), Some("develop".to_string()));
        assert_eq!(parse_symref_head("1234567890abcdef\tHEAD"), None);
        assert_eq!(parse_symref_head(""), None);
    }

    #[test]
    fn test_parse_counts() {
        assert_eq!(parse_counts("2\t3"), Some((2, 3)));
        assert_eq!(parse_counts("0 0"), Some((0, 0)));
        assert_eq!(parse_counts("garbage"), None);
        assert_eq!(parse_counts(""), None);
    }

    #[test]
    fn test_detect_default_branch_from_symref() {
        let git = FakeGit::new().respond(
            "ls-remote --symref origin HEAD",
            "ref: refs/heads/trunk\tHEAD\nabc123\tHEAD",
        );
        let dir = Path::new("/repo");
        assert_eq!(detect_default_branch(&git, dir), Some("trunk".to_string()));
        assert!(!git.was_called("ls-remote --heads origin main"));
    }

    #[test]
    fn test_detect_default_branch_falls_back_to_master() {
        let git = FakeGit::new().respond(
            "ls-remote --heads origin master",
            "abc123\trefs/heads/master",
        );
        let dir = Path::new("/repo");
        assert_eq!(detect_default_branch(&git, dir), Some("master".to_string()));
        assert!(git.was_called("ls-remote --heads origin main"));
    }

    #[test]
    fn test_detect_default_branch_none() {
        let git = FakeGit::new();
        assert_eq!(detect_default_branch(&git, Path::new("/repo")), None);
    }

    #[test]
    fn test_ahead_behind_unknown_is_zero() {
        let git = FakeGit::new().fail("rev-list --left-right --count main...origin/main", "bad revision");
        assert_eq!(ahead_behind(&git, Path::new("/repo"), "main", "origin/main"), (0, 0));
    }

    #[test]
    fn test_list_ahead_branches_skips_branches_without_upstream() {
        let git = FakeGit::new()
            .respond(
                "for-each-ref refs/heads --format=%(refname:short) %(upstream:short)",
                "main origin/main\nfeature origin/feature\nlocal-only",
            )
            .respond("rev-list --left-right --count main...origin/main", "0\t0")
            .respond("rev-list --left-right --count feature...origin/feature", "3\t1");

        let ahead = list_ahead_branches(&git, Path::new("/repo"));
        assert_eq!(
            ahead,
            vec![AheadBranch {
                branch: "feature".to_string(),
                ahead: 3,
            }]
        );
    }

    #[test]
    fn test_is_dirty_and_current_branch() {
        let git = FakeGit::new()
            .respond("status --porcelain", " M README.md")
            .respond("rev-parse --abbrev-ref HEAD", "feature");
        let dir = Path::new("/repo");
        assert!(is_dirty(&git, dir));
        assert_eq!(current_branch(&git, dir), Some("feature".to_string()));

        let clean = FakeGit::new();
        assert!(!is_dirty(&clean, dir));
        assert_eq!(current_branch(&clean, dir), None);
    }
}
