use crate::git::{GitOutput, GitRunner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Scripted [`GitRunner`]: answers by the space-joined argument list and
/// records every call. Unscripted commands fail with empty output.
#[derive(Default)]
pub(crate) struct FakeGit {
    responses: HashMap<String, GitOutput>,
    calls: RefCell<Vec<String>>,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, args: &str, stdout: &str) -> Self {
        self.responses.insert(
            args.to_string(),
            GitOutput {
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub(crate) fn fail(mut self, args: &str, stderr: &str) -> Self {
        self.responses.insert(
            args.to_string(),
            GitOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn was_called(&self, args: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == args)
    }
}

impl GitRunner for FakeGit {
    fn run(&self, _cwd: &Path, args: &[&str]) -> GitOutput {
        let key = args.join(" ");
        self.calls.borrow_mut().push(key.clone());
        self.responses.get(&key).cloned().unwrap_or(GitOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: format!("unscripted: git {}", key),
        })
    }
}

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();
    init_repo(path);
    commit_file(path, "README.md", "# Test\n", "Initial commit");
    temp_dir
}

/// A bare "origin" on `main` with one commit, plus a working clone of it.
///
/// Returns `(scratch dir, origin path, clone path)`.
pub(crate) fn create_origin_and_clone() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let origin = temp_dir.path().join("origin.git");
    let seed = temp_dir.path().join("seed");
    let clone = temp_dir.path().join("clone");

    std::fs::create_dir_all(&origin).unwrap();
    git(&origin, &["init", "--bare", "-q"]);
    git(&origin, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    std::fs::create_dir_all(&seed).unwrap();
    init_repo(&seed);
    commit_file(&seed, "README.md", "# Test\n", "Initial commit");
    git(&seed, &["remote", "add", "origin", &origin.to_string_lossy()]);
    git(&seed, &["push", "-q", "origin", "main"]);

    clone_into(&origin, &clone);
    (temp_dir, origin, clone)
}

/// Push `count` new commits to `origin` from a throwaway clone.
pub(crate) fn push_commits_to_origin(origin: &Path, count: usize) {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    clone_into(origin, &work);
    for i in 0..count {
        commit_file(
            &work,
            &format!("upstream{}.txt", i),
            &format!("upstream {}\n", i),
            &format!("Upstream commit {}", i),
        );
    }
    git(&work, &["push", "-q", "origin", "main"]);
}

pub(crate) fn clone_into(origin: &Path, target: &Path) {
    let parent = target.parent().unwrap();
    git(
        parent,
        &["clone", "-q", &origin.to_string_lossy(), &target.to_string_lossy()],
    );
    configure_user(target);
}

pub(crate) fn commit_file(repo: &Path, name: &str, contents: &str, message: &str) {
    std::fs::write(repo.join(name), contents).unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", message]);
}

pub(crate) fn rev_parse(repo: &Path, rev: &str) -> String {
    let output = Command::new("git")
        .current_dir(repo)
        .args(["rev-parse", rev])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn init_repo(path: &Path) {
    git(path, &["init", "-q"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    // This sets HEAD to an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    configure_user(path);
}

fn configure_user(path: &Path) {
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}
