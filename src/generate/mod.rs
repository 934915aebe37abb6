mod java;
mod numbers;
mod output;

pub use java::JavaGenerator;
pub use numbers::{ARRAY_BATCH, DEFAULT_PRECISION, batch_lines, format_number, number_list};
pub use output::{HeaderRegistry, Output};

use crate::analysis::Diagnostic;
use crate::error::GenerateError;
use crate::program::Program;
use crate::resources::ResourceLoader;
use serde::Serialize;

/// How trained models and data reach the generated program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedMode {
    /// Inline weights and training data as literals
    Embed,
    /// Load models and data from their files at run time
    #[default]
    Link,
}

impl EmbedMode {
    pub fn is_embed(self) -> bool {
        self == EmbedMode::Embed
    }
}

impl From<bool> for EmbedMode {
    fn from(embed: bool) -> Self {
        if embed { EmbedMode::Embed } else { EmbedMode::Link }
    }
}

/// Generator options
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub embed: EmbedMode,
    /// Spaces per indentation level
    pub indent_width: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            embed: EmbedMode::Link,
            indent_width: 4,
        }
    }
}

impl GenerateOptions {
    pub fn embedded() -> Self {
        Self {
            embed: EmbedMode::Embed,
            ..Self::default()
        }
    }
}

/// Generation result
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    pub code: String,
    /// Header entries in first-added order, already folded into `code`
    pub headers: Vec<String>,
    pub warnings: Vec<Diagnostic>,
}

/// Generator trait - converts a program tree to source text
pub trait Generator {
    fn generate(
        &self,
        program: &Program,
        loader: &dyn ResourceLoader,
        options: &GenerateOptions,
    ) -> Result<GenerateResult, GenerateError>;
}
