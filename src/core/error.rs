//! Per-file analysis errors.
//!
//! None of these abort a run: the pipeline logs them, turns them into
//! `ParseErrorIssue`s and moves on to the next file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse C# source {}: {message}", path.display())]
    SourceParse { path: PathBuf, message: String },

    #[error("C# grammar could not be loaded: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        AnalysisError::Yaml {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AnalysisError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
