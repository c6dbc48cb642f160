//! Artifact rule table and compiled matchers.
//!
//! A rule binds a category, a risk tier, an entry kind and a shell glob tested
//! against an entry's base name. Rules are tried in table order and the first
//! match wins.

use crate::error::{Result, ToolError};
use globset::{Glob, GlobMatcher, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Whether a rule applies without explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    Safe,
    Risky,
}

/// Kind of filesystem entry a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub category: &'static str,
    pub risk: Risk,
    pub kind: EntryKind,
    pub pattern: &'static str,
}

const fn rule(category: &'static str, risk: Risk, kind: EntryKind, pattern: &'static str) -> Rule {
    Rule {
        category,
        risk,
        kind,
        pattern,
    }
}

use EntryKind::{Directory as Dir, File};
use Risk::{Risky, Safe};

/// Built-in rules. Terraform state, `.terraform.lock.hcl` and `*.tfvars` are
/// deliberately absent.
pub const RULES: &[Rule] = &[
    rule("Terraform", Safe, Dir, ".terraform"),
    rule("Terraform", Safe, Dir, ".terragrunt-cache"),
    rule("Terraform", Safe, File, "*.tfplan"),
    rule("Terraform", Safe, File, "crash.log"),
    rule("Terraform", Safe, File, "crash.*.log"),
    rule("Node/JS", Safe, Dir, "node_modules"),
    rule("Node/JS", Safe, Dir, "dist"),
    rule("Node/JS", Safe, Dir, "build"),
    rule("Node/JS", Safe, Dir, ".next"),
    rule("Node/JS", Safe, Dir, ".nuxt"),
    rule("Node/JS", Safe, Dir, ".turbo"),
    rule("Node/JS", Safe, Dir, ".parcel-cache"),
    rule("Node/JS", Safe, Dir, "coverage"),
    rule("Python", Safe, Dir, "__pycache__"),
    rule("Python", Safe, Dir, ".pytest_cache"),
    rule("Python", Safe, Dir, ".mypy_cache"),
    rule("Python", Safe, Dir, ".ruff_cache"),
    rule("Python", Safe, Dir, ".ipynb_checkpoints"),
    rule("Python", Safe, Dir, ".tox"),
    rule("Python", Safe, File, "*.pyc"),
    rule("Python", Safe, File, "*.pyo"),
    rule("Build", Safe, Dir, "target"),
    rule("Build", Safe, Dir, ".gradle"),
    rule("Misc", Safe, File, ".DS_Store"),
    rule("Misc", Safe, File, "Thumbs.db"),
    rule("Misc", Safe, File, "*.swp"),
    rule("Misc", Safe, File, "*.swo"),
    rule("Dev env", Risky, Dir, "venv"),
    rule("Dev env", Risky, Dir, ".venv"),
    rule("Dev env", Risky, Dir, "env"),
    rule("Dev env", Risky, Dir, ".idea"),
    rule("Dev env", Risky, Dir, ".vscode"),
    rule("Dev env", Risky, Dir, ".devcontainer"),
];

/// User-controlled narrowing of the rule table.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    /// Consider `Risky` rules too.
    pub include_risky: bool,
    /// When non-empty, only rules of these categories are considered.
    pub only_categories: Vec<String>,
    /// Globs matched against a candidate's base name or full path.
    pub exclude_globs: Vec<String>,
}

#[derive(Debug)]
struct CompiledRule {
    category: &'static str,
    matcher: GlobMatcher,
}

/// Rules selected by a [`RuleFilter`], compiled for matching.
#[derive(Debug)]
pub struct RuleSet {
    dir_rules: Vec<CompiledRule>,
    file_rules: Vec<CompiledRule>,
    exclude: GlobSet,
}

impl RuleSet {
    /// Select and compile the rules of `table` that pass `filter`.
    pub fn compile(table: &[Rule], filter: &RuleFilter) -> Result<Self> {
        let mut dir_rules = Vec::new();
        let mut file_rules = Vec::new();

        for rule in table {
            if rule.risk == Risk::Risky && !filter.include_risky {
                continue;
            }
            if !filter.only_categories.is_empty()
                && !filter.only_categories.iter().any(|c| c == rule.category)
            {
                continue;
            }

            let matcher = Glob::new(rule.pattern)
                .map_err(|e| {
                    ToolError::UserError(format!("invalid rule pattern '{}': {}", rule.pattern, e))
                })?
                .compile_matcher();
            let compiled = CompiledRule {
                category: rule.category,
                matcher,
            };
            match rule.kind {
                EntryKind::Directory => dir_rules.push(compiled),
                EntryKind::File => file_rules.push(compiled),
            }
        }

        Ok(Self {
            dir_rules,
            file_rules,
            exclude: build_exclude_set(&filter.exclude_globs)?,
        })
    }

    /// Category of the first directory rule matching `name`.
    pub fn match_dir(&self, name: &str) -> Option<&'static str> {
        first_match(&self.dir_rules, name)
    }

    /// Category of the first file rule matching `name`.
    pub fn match_file(&self, name: &str) -> Option<&'static str> {
        first_match(&self.file_rules, name)
    }

    /// Does an exclude glob match the base name or the full path?
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let by_name = path
            .file_name()
            .is_some_and(|name| self.exclude.is_match(Path::new(name)));
        by_name || self.exclude.is_match(path)
    }
}

fn first_match(rules: &[CompiledRule], name: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.matcher.is_match(name))
        .map(|rule| rule.category)
}

/// Build a GlobSet from the user's exclude patterns.
fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            ToolError::UserError(format!("invalid glob pattern in --exclude-glob: '{}' - {}", pattern, e))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| ToolError::UserError(format!("failed to compile exclude globs: {}", e)))
}
