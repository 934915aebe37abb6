use crate::error::{ErrorKind, GenerateError};
use crate::generate::EmbedMode;
use serde::Serialize;

/// Non-fatal finding about a program tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

/// Metadata collected during analysis
#[derive(Debug, Clone, Default)]
pub struct AnalysisMetadata {
    /// Paths of every main function, in document order
    pub main_functions: Vec<String>,
    /// Const declarations whose value is quoted although the type is not `String`
    pub quoted_consts: Vec<(String, String)>,
    pub array_names: Vec<String>,
    pub networks: Vec<String>,
    pub embeds_training: bool,
    pub training_loaders: Vec<String>,
}

impl AnalysisMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_array(&self, name: &str) -> bool {
        self.array_names.iter().any(|array| array == name)
    }

    /// Check the collected facts for one run.
    ///
    /// More than one main function is an error; everything else is a warning.
    pub fn check(&self, embed: EmbedMode) -> Result<Vec<Diagnostic>, GenerateError> {
        if self.main_functions.len() > 1 {
            return Err(GenerateError::new(
                ErrorKind::DuplicateMain,
                format!(
                    "found {} main functions: {}",
                    self.main_functions.len(),
                    self.main_functions.join(", ")
                ),
            )
            .with_help("a program may declare at most one main function"));
        }

        let mut warnings = Vec::new();

        for (path, type_name) in &self.quoted_consts {
            warnings.push(Diagnostic {
                path: path.clone(),
                message: format!("const of type `{}` is emitted as a quoted string literal", type_name),
            });
        }

        if embed.is_embed() {
            if !self.has_array("WEIGHTS") {
                for path in &self.networks {
                    warnings.push(Diagnostic {
                        path: path.clone(),
                        message: "embedded network decodes `WEIGHTS` but no such array is declared".to_string(),
                    });
                }
            }
            if !self.embeds_training {
                for path in &self.training_loaders {
                    warnings.push(Diagnostic {
                        path: path.clone(),
                        message: "embedded training set reads `INPUT_DATA`/`IDEAL_DATA` but no training data is embedded"
                            .to_string(),
                    });
                }
            }
        }

        Ok(warnings)
    }
}
