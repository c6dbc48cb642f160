//! Display and formatting for cleanup output.

use super::size::{human_size, path_size};
use super::types::MatchSet;
use std::io::{self, Write};
use std::path::PathBuf;

/// How many entries the "Largest items" block shows.
pub const LARGEST_ITEMS: usize = 20;

/// One `- <category>: <n> item(s), <size>` line per category, largest first.
pub fn summary_lines(matches: &MatchSet) -> Vec<String> {
    let mut categories: Vec<_> = matches.categories().filter(|(_, m)| !m.items.is_empty()).collect();
    categories.sort_by(|a, b| b.1.size.cmp(&a.1.size));

    categories
        .into_iter()
        .map(|(name, m)| {
            format!("- {}: {} item(s), {}", name, m.items.len(), human_size(m.size))
        })
        .collect()
}

/// The `limit` largest matched items, sizes recomputed per item.
pub fn largest_items(matches: &MatchSet, limit: usize) -> Vec<(PathBuf, u64)> {
    let mut sized: Vec<(PathBuf, u64)> = matches
        .paths()
        .map(|path| (path.clone(), path_size(path)))
        .collect();
    sized.sort_by(|a, b| b.1.cmp(&a.1));
    sized.truncate(limit);
    sized
}

/// Print the category summary, totals and the largest items.
pub fn print_report(out: &mut impl Write, matches: &MatchSet) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Summary by category:")?;
    let lines = summary_lines(matches);
    if lines.is_empty() {
        writeln!(out, "No removable items found.")?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Total: {} item(s), {}",
        matches.item_count(),
        human_size(matches.total_size())
    )?;
    writeln!(out)?;

    if matches.is_empty() {
        return Ok(());
    }

    writeln!(out, "Largest items:")?;
    for (path, size) in largest_items(matches, LARGEST_ITEMS) {
        writeln!(out, "  {:>8}  {}", human_size(size), path.display())?;
    }
    writeln!(out)?;
    Ok(())
}
