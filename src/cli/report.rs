//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format; scene hierarchies as indented
//! trees. Kept apart from the core so scenecheck can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, HierarchySummary, InitSummary, OutlineNode, SceneOutline,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of mismatch sites to display per issue.
const MAX_SITES_DISPLAY: usize = 3;

/// Print a command result to stdout (and failures of `init` to stderr).
pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check => print_check_to(result, &mut io::stdout().lock()),
        CommandSummary::Hierarchy(summary) => {
            let mut out = io::stdout().lock();
            print_hierarchy_to(summary, &mut out);
            report_to(&result.issues, &mut out);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_check_to<W: Write>(result: &CommandResult, writer: &mut W) {
    if result.issues.is_empty() {
        print_success_to(
            result.source_files_checked,
            result.scene_files_checked,
            writer,
        );
    } else {
        report_to(&result.issues, writer);
    }
}

/// Print issues in cargo-style format to a writer, followed by a summary.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(source_files: usize, scene_files: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} component {}, {} {} - no issues found",
        source_files,
        if source_files == 1 { "source" } else { "sources" },
        scene_files,
        if scene_files == 1 { "scene" } else { "scenes" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let location = match issue.location() {
        ReportLocation::File { path } => path.to_string(),
        ReportLocation::Unknown => "unknown source".dimmed().to_string(),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    print_sites(&issue.sites(), writer);

    let _ = writeln!(writer);
}

fn print_sites<W: Write>(sites: &[String], writer: &mut W) {
    let total = sites.len();
    let display_count = total.min(MAX_SITES_DISPLAY);

    for (i, site) in sites.iter().take(display_count).enumerate() {
        let remaining = total - display_count;
        let suffix = if i == display_count - 1 && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };
        let _ = writeln!(
            writer,
            "   {} {} {}{}",
            "=".blue(),
            "in:".bold(),
            site,
            suffix
        );
    }
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

// ============================================================
// Hierarchy
// ============================================================

/// Print every scene as a tree, with local ids aligned in a column.
pub fn print_hierarchy_to<W: Write>(summary: &HierarchySummary, writer: &mut W) {
    for scene in &summary.scenes {
        print_scene(scene, writer);
    }

    let root_count: usize = summary.scenes.iter().map(|s| s.roots.len()).sum();
    let scene_count = summary.scenes.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} root {} in {} {}",
            root_count,
            if root_count == 1 { "object" } else { "objects" },
            scene_count,
            if scene_count == 1 { "scene" } else { "scenes" }
        )
        .green()
    );
}

fn print_scene<W: Write>(scene: &SceneOutline, writer: &mut W) {
    let _ = writeln!(writer, "{}", scene.scene_path.bold());

    if scene.roots.is_empty() {
        let _ = writeln!(writer, "  {}", "(no root objects)".dimmed());
        let _ = writeln!(writer);
        return;
    }

    let mut lines: Vec<(String, &str)> = Vec::new();
    for (i, root) in scene.roots.iter().enumerate() {
        collect_tree_lines(root, "", i + 1 == scene.roots.len(), &mut lines);
    }

    let name_width = lines
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0);

    for (label, local_id) in &lines {
        let padding = name_width - UnicodeWidthStr::width(label.as_str());
        let _ = writeln!(
            writer,
            "{}{:padding$}  {}",
            label,
            "",
            format!("&{}", local_id).dimmed(),
            padding = padding
        );
    }
    let _ = writeln!(writer);
}

fn collect_tree_lines<'a>(
    node: &'a OutlineNode,
    prefix: &str,
    is_last: bool,
    lines: &mut Vec<(String, &'a str)>,
) {
    let branch = if is_last { "└── " } else { "├── " };
    lines.push((format!("{}{}{}", prefix, branch, node.name), &node.local_id));

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    for (i, child) in node.children.iter().enumerate() {
        collect_tree_lines(child, &child_prefix, i + 1 == node.children.len(), lines);
    }
}
