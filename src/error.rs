use crate::program::NodePath;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of generation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedModel,
    ResourceLoad,
    DuplicateMain,
    InvalidDocument,
    StrictWarnings,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedModel => "Unsupported model",
            ErrorKind::ResourceLoad => "Resource load failed",
            ErrorKind::DuplicateMain => "Duplicate main function",
            ErrorKind::InvalidDocument => "Invalid program document",
            ErrorKind::StrictWarnings => "Warnings treated as errors",
        }
    }
}

/// Error that aborts a generation run
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GenerateError {
    pub kind: ErrorKind,
    pub message: String,
    /// Node being generated when the error occurred
    pub path: Option<NodePath>,
    pub help: Option<String>,
    #[source]
    pub source: Option<LoadError>,
}

impl GenerateError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            help: None,
            source: None,
        }
    }

    /// Attach the location of the failing node
    pub fn at(mut self, path: &NodePath) -> Self {
        if !path.is_empty() {
            self.path = Some(path.clone());
        }
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_source(mut self, source: LoadError) -> Self {
        self.source = Some(source);
        self
    }

    /// Render the error for terminal output
    pub fn render(&self, filename: &str) -> String {
        self.render_inner(filename, false)
    }

    /// Render the error with ANSI color codes
    pub fn render_color(&self, filename: &str) -> String {
        self.render_inner(filename, true)
    }

    fn render_inner(&self, filename: &str, color: bool) -> String {
        let red = if color { "\x1b[1;31m" } else { "" };
        let dim = if color { "\x1b[2m" } else { "" };
        let cyan = if color { "\x1b[1;38;5;73m" } else { "" };
        let reset = if color { "\x1b[0m" } else { "" };

        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!(" {}file:{} {}\n", dim, reset, filename));
        output.push_str(&format!("{}error:{} {}: {}\n", red, reset, self.kind.as_str(), self.message));

        if let Some(ref path) = self.path {
            output.push_str(&format!("   {}at:{} {}\n", dim, reset, path));
        }
        if let Some(ref source) = self.source {
            output.push_str(&format!("{}cause:{} {}\n", dim, reset, source));
        }

        if let Some(ref help) = self.help {
            output.push('\n');
            for (i, help_line) in help.lines().enumerate() {
                if i == 0 {
                    output.push_str(&format!(" {}help:{} {}\n", cyan, reset, help_line));
                } else {
                    output.push_str(&format!("       {}\n", help_line));
                }
            }
        }

        output.push('\n');
        output
    }
}

/// Failure reported by a model or dataset loader
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no model registered for {}", .0.display())]
    UnknownModel(PathBuf),

    #[error("no dataset registered for {}", .0.display())]
    UnknownDataset(PathBuf),

    #[error("dataset rows must be rectangular: pair {index} has {input} inputs and {ideal} ideals, expected {expected_input} and {expected_ideal}")]
    Ragged {
        index: usize,
        input: usize,
        ideal: usize,
        expected_input: usize,
        expected_ideal: usize,
    },

    #[error("{0}")]
    Other(String),
}

/// Failure reading a program document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed program document: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DocumentError> for GenerateError {
    fn from(err: DocumentError) -> Self {
        GenerateError::new(ErrorKind::InvalidDocument, err.to_string())
    }
}
