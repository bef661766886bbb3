use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Severity};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    scene_files_checked: usize,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        parse_error_count,
        source_files_checked,
        scene_files_checked,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::commands::InitSummary;
    use crate::issues::{ParseErrorFileType, ParseErrorIssue, UnusedComponentIssue};

    #[test]
    fn test_finish_counts_by_severity() {
        let issues = vec![
            Issue::UnusedComponent(UnusedComponentIssue {
                guid: "G2".to_string(),
                source_path: "Assets/Idle.cs".to_string(),
                class_names: vec!["Idle".to_string()],
            }),
            Issue::ParseError(ParseErrorIssue {
                file_path: "Assets/Broken.unity".to_string(),
                error: "bad".to_string(),
                file_type: ParseErrorFileType::Scene,
            }),
        ];

        let result = finish(CommandSummary::Check, issues, 3, 2);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.warning_count, 1);
        assert_eq!(result.parse_error_count, 1);
        assert_eq!(result.source_files_checked, 3);
        assert_eq!(result.scene_files_checked, 2);
    }

    #[test]
    fn test_failed_init_counts_as_error() {
        let summary = CommandSummary::Init(InitSummary {
            created: false,
            error: Some("exists".to_string()),
        });
        let result = finish(summary, Vec::new(), 0, 0);
        assert_eq!(result.error_count, 1);
    }
}
