//! Code generation for machine-learning program trees.
//!
//! A [`Program`] describes a small program (constants, a main routine, helper
//! functions, model and training-data plumbing). A [`Generator`] turns it into
//! target-language source; [`JavaGenerator`] targets Java and the Encog runtime.
//! Trained models and data are either embedded as literals or linked by file,
//! chosen once per run through [`EmbedMode`].

pub mod analysis;
pub mod document;
pub mod error;
pub mod generate;
pub mod program;
pub mod resources;

pub use analysis::Diagnostic;
pub use document::ProgramDocument;
pub use error::{DocumentError, ErrorKind, GenerateError, LoadError};
pub use generate::{EmbedMode, GenerateOptions, GenerateResult, Generator, JavaGenerator};
pub use program::{Node, NodePath, Program};
pub use resources::{DataPair, Dataset, FactoryMetadata, MlMethod, ResourceLoader, ResourceStore, StoredModel};

use analysis::Analyzer;
use tracing::warn;

/// Analysis followed by generation
pub struct Pipeline {
    analyzer: Analyzer,
    generator: Box<dyn Generator>,
}

impl Pipeline {
    pub fn new(analyzer: Analyzer, generator: Box<dyn Generator>) -> Self {
        Self { analyzer, generator }
    }

    /// Standard analysis plugins with the Java backend
    pub fn standard() -> Self {
        Self::new(analysis::standard_plugins(), Box::new(JavaGenerator::new()))
    }

    pub fn compile(
        &mut self,
        program: &Program,
        loader: &dyn ResourceLoader,
        options: &GenerateOptions,
    ) -> Result<GenerateResult, GenerateError> {
        let metadata = self.analyzer.analyze(program);
        let warnings = metadata.check(options.embed)?;
        for warning in &warnings {
            warn!(path = %warning.path, "{}", warning.message);
        }

        let mut result = self.generator.generate(program, loader, options)?;
        result.warnings = warnings;
        Ok(result)
    }

    /// Compile a program document against its own resources
    pub fn compile_document(
        &mut self,
        document: &ProgramDocument,
        options: &GenerateOptions,
    ) -> Result<GenerateResult, GenerateError> {
        self.compile(&document.program, &document.resources, options)
    }
}

/// Generate Java for a program with the standard pipeline
pub fn generate(
    program: &Program,
    loader: &dyn ResourceLoader,
    options: &GenerateOptions,
) -> Result<GenerateResult, GenerateError> {
    Pipeline::standard().compile(program, loader, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple() {
        let program = Program::new(vec![Node::class("Foo", vec![Node::constant("VERSION", "String", "1.0")])]);
        let result = generate(&program, &ResourceStore::new(), &GenerateOptions::default()).unwrap();
        assert!(result.code.contains("public class Foo {"));
        assert!(result.code.contains("    public static final String VERSION = \"1.0\";"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_main_is_rejected() {
        let program = Program::new(vec![Node::class(
            "Foo",
            vec![Node::main_function(vec![]), Node::main_function(vec![])],
        )]);
        let err = generate(&program, &ResourceStore::new(), &GenerateOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateMain);
        assert!(err.message.contains("Foo > main, Foo > main"));
    }

    #[test]
    fn test_non_string_const_warns() {
        let program = Program::new(vec![Node::class("Foo", vec![Node::constant("COUNT", "int", "3")])]);
        let result = generate(&program, &ResourceStore::new(), &GenerateOptions::default()).unwrap();
        // Still emitted quoted
        assert!(result.code.contains("public static final int COUNT = \"3\";"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "Foo > COUNT");
    }

    #[test]
    fn test_embed_warnings_for_missing_inputs() {
        let program = Program::new(vec![Node::class(
            "Foo",
            vec![Node::load_training("createTraining", "xor.egb")],
        )]);
        let result = generate(&program, &ResourceStore::new(), &GenerateOptions::embedded()).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("INPUT_DATA"));

        // Link mode reads the file at run time and needs nothing embedded
        let result = generate(&program, &ResourceStore::new(), &GenerateOptions::default()).unwrap();
        assert!(result.warnings.is_empty());
    }
}
