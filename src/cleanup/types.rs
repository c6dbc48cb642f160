//! Data types for the cleanup command.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Matches recorded for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMatches {
    /// Distinct matched paths, in traversal order.
    pub items: Vec<PathBuf>,
    /// Sum of the sizes of `items`, directories sized recursively.
    pub size: u64,
}

/// Category name -> matched artifacts for one scan.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    categories: BTreeMap<String, CategoryMatches>,
}

impl MatchSet {
    /// Record `path` under `category`. A path already present is ignored.
    pub fn add(&mut self, category: &str, path: PathBuf, size: u64) {
        let bucket = self.categories.entry(category.to_string()).or_default();
        if bucket.items.contains(&path) {
            return;
        }
        bucket.items.push(path);
        bucket.size += size;
    }

    pub fn get(&self, category: &str) -> Option<&CategoryMatches> {
        self.categories.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryMatches)> {
        self.categories.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn item_count(&self) -> usize {
        self.categories.values().map(|m| m.items.len()).sum()
    }

    pub fn total_size(&self) -> u64 {
        self.categories.values().map(|m| m.size).sum()
    }

    /// Every matched path across all categories.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.categories.values().flat_map(|m| m.items.iter())
    }
}

/// Outcome of deleting a match set.
#[derive(Debug, Default)]
pub struct DeletionResult {
    /// Bytes accounted for before each removal attempt.
    pub freed: u64,
    /// Paths that could not be removed, with the reason.
    pub errors: Vec<(PathBuf, String)>,
}
