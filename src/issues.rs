//! Issue types for scene analysis results.
//!
//! Each issue is self-contained with everything the reporter needs to display
//! it; rules build them from the global report.

use enum_dispatch::enum_dispatch;

use crate::core::aggregate::SchemaSource;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    InconsistentComponent,
    UnusedComponent,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::InconsistentComponent => write!(f, "inconsistent-component"),
            Rule::UnusedComponent => write!(f, "unused-component"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Component declared in source but attached to no object in any scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedComponentIssue {
    pub guid: String,
    pub source_path: String,
    /// Declared class names, first one used as the display name.
    pub class_names: Vec<String>,
}

impl UnusedComponentIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedComponent
    }
}

/// One scene attachment carrying fields its component no longer declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchSite {
    pub scene_path: String,
    pub attachment_id: String,
    pub extra_fields: Vec<String>,
}

/// Component whose stored scene data no longer matches its declared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistentComponentIssue {
    pub guid: String,
    pub source: SchemaSource,
    /// Number of offending attachments across all scenes.
    pub occurrences: usize,
    pub sites: Vec<MismatchSite>,
}

impl InconsistentComponentIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InconsistentComponent
    }
}

/// Which kind of input failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorFileType {
    Source,
    Scene,
}

impl std::fmt::Display for ParseErrorFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorFileType::Source => write!(f, "component source"),
            ParseErrorFileType::Scene => write!(f, "scene"),
        }
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub file_type: ParseErrorFileType,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    InconsistentComponent(InconsistentComponentIssue),
    UnusedComponent(UnusedComponentIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::InconsistentComponent(_) => InconsistentComponentIssue::severity(),
            Issue::UnusedComponent(_) => UnusedComponentIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::InconsistentComponent(_) => InconsistentComponentIssue::rule(),
            Issue::UnusedComponent(_) => UnusedComponentIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A file on disk.
    File { path: &'a str },
    /// No file to point at (schema source unknown).
    Unknown,
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards it through `Issue`.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Extra lines listed under the issue, one per occurrence.
    fn sites(&self) -> Vec<String> {
        Vec::new()
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for UnusedComponentIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.source_path,
        }
    }

    fn message(&self) -> String {
        match self.class_names.first() {
            Some(name) => format!("{} is not attached in any scene", name),
            None => "component is not attached in any scene".to_string(),
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("guid {}", self.guid))
    }
}

impl Report for InconsistentComponentIssue {
    fn location(&self) -> ReportLocation<'_> {
        match &self.source {
            SchemaSource::Known(path) => ReportLocation::File { path },
            SchemaSource::Unknown => ReportLocation::Unknown,
        }
    }

    fn message(&self) -> String {
        let subject = if self.occurrences == 1 {
            "attachment stores"
        } else {
            "attachments store"
        };
        format!(
            "{} {} fields the component no longer declares",
            self.occurrences, subject
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("re-save the affected scenes or restore the removed fields")
    }

    fn details(&self) -> Option<String> {
        Some(format!("guid {}", self.guid))
    }

    fn sites(&self) -> Vec<String> {
        self.sites
            .iter()
            .map(|site| {
                format!(
                    "{} &{}: {}",
                    site.scene_path,
                    site.attachment_id,
                    site.extra_fields.join(", ")
                )
            })
            .collect()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("unreadable {}", self.file_type)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::File { path } => Some(path),
            ReportLocation::Unknown => None,
        }
    }

    fn sort_key(&self) -> &str {
        match self {
            Issue::InconsistentComponent(issue) => &issue.guid,
            Issue::UnusedComponent(issue) => &issue.guid,
            Issue::ParseError(issue) => &issue.error,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Sort by: file_path (None last), rule, guid/error
        match (self.sort_file_path(), other.sort_file_path()) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then_with(|| self.rule().cmp(&other.rule()))
                .then_with(|| self.sort_key().cmp(other.sort_key())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .rule()
                .cmp(&other.rule())
                .then_with(|| self.sort_key().cmp(other.sort_key())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::issues::*;

    fn unused(guid: &str, path: &str) -> Issue {
        Issue::UnusedComponent(UnusedComponentIssue {
            guid: guid.to_string(),
            source_path: path.to_string(),
            class_names: vec!["Mover".to_string()],
        })
    }

    fn inconsistent(guid: &str, source: SchemaSource) -> Issue {
        Issue::InconsistentComponent(InconsistentComponentIssue {
            guid: guid.to_string(),
            source,
            occurrences: 2,
            sites: vec![
                MismatchSite {
                    scene_path: "Assets/Main.unity".to_string(),
                    attachment_id: "114".to_string(),
                    extra_fields: vec!["oldSpeed".to_string(), "turnRate".to_string()],
                },
                MismatchSite {
                    scene_path: "Assets/Menu.unity".to_string(),
                    attachment_id: "7".to_string(),
                    extra_fields: vec!["oldSpeed".to_string()],
                },
            ],
        })
    }

    #[test]
    fn test_unused_issue() {
        let issue = unused("G2", "Assets/Mover.cs");
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.rule(), Rule::UnusedComponent);
        assert_eq!(issue.message(), "Mover is not attached in any scene");
        assert_eq!(issue.details().as_deref(), Some("guid G2"));
    }

    #[test]
    fn test_inconsistent_issue() {
        let issue = inconsistent("G1", SchemaSource::Known("Assets/Mover.cs".to_string()));
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(
            issue.message(),
            "2 attachments store fields the component no longer declares"
        );
        assert_eq!(
            issue.sites(),
            vec![
                "Assets/Main.unity &114: oldSpeed, turnRate",
                "Assets/Menu.unity &7: oldSpeed",
            ]
        );
        assert!(matches!(
            issue.location(),
            ReportLocation::File { path: "Assets/Mover.cs" }
        ));
    }

    #[test]
    fn test_parse_error_issue() {
        let issue = Issue::ParseError(ParseErrorIssue {
            file_path: "Assets/Broken.unity".to_string(),
            error: "did not find expected node content".to_string(),
            file_type: ParseErrorFileType::Scene,
        });
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.rule(), Rule::ParseError);
        assert_eq!(issue.message(), "unreadable scene");
    }

    #[test]
    fn test_issue_ordering() {
        let mut issues = vec![
            inconsistent("G9", SchemaSource::Unknown),
            unused("G3", "Assets/B.cs"),
            inconsistent("G1", SchemaSource::Known("Assets/B.cs".to_string())),
            unused("G2", "Assets/A.cs"),
        ];
        issues.sort();

        let order: Vec<&str> = issues.iter().map(|i| i.sort_key()).collect();
        assert_eq!(order, vec!["G2", "G1", "G3", "G9"]);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(
            Rule::InconsistentComponent.to_string(),
            "inconsistent-component"
        );
        assert_eq!(Rule::UnusedComponent.to_string(), "unused-component");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
    }
}
