//! Text and JSON rendering of sync summaries.

use super::types::RepoSyncSummary;
use crate::error::{Result, ToolError};

/// One line per repository: `- <slug> [<action>] <fragments or ok>`.
pub fn render_text(summaries: &[RepoSyncSummary]) -> String {
    let mut lines = vec!["Repo sync report:".to_string()];
    for summary in summaries {
        lines.push(format!(
            "- {} [{}] {}",
            summary.slug,
            summary.action,
            status_fragments(summary)
        ));
    }
    lines.join("\n")
}

fn status_fragments(summary: &RepoSyncSummary) -> String {
    let mut bits = Vec::new();

    if let Some(default) = &summary.default_branch {
        bits.push(format!(
            "{}: +{}/-{}",
            default, summary.ahead_main, summary.behind_main
        ));
    }
    if summary.dirty {
        bits.push("dirty".to_string());
    }
    if !summary.ahead_branches.is_empty() {
        let branches: Vec<String> = summary
            .ahead_branches
            .iter()
            .map(|b| format!("{}(+{})", b.branch, b.ahead))
            .collect();
        bits.push(format!("unpushed: {}", branches.join(", ")));
    }
    if let Some(error) = &summary.error {
        bits.push(format!("error: {}", error));
    }

    if bits.is_empty() {
        "ok".to_string()
    } else {
        bits.join("; ")
    }
}

/// Pretty-printed JSON array of the summaries.
pub fn render_json(summaries: &[RepoSyncSummary]) -> Result<String> {
    serde_json::to_string_pretty(summaries)
        .map_err(|e| ToolError::UserError(format!("failed to render JSON report: {}", e)))
}
