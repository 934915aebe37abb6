//! Parse generated programs with tree-sitter-java to catch malformed output.

use mlgen::{EmbedMode, GenerateOptions, Pipeline, ProgramDocument};
use std::path::Path;
use tree_sitter::Parser;

fn parse_java(code: &str) -> tree_sitter::Tree {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .expect("Failed to load Java grammar");
    parser.parse(code, None).expect("parser returned no tree")
}

fn assert_valid_java(fixture: &str, embed: EmbedMode) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(fixture);
    let document = ProgramDocument::from_path(&path).unwrap();
    let options = GenerateOptions { embed, ..GenerateOptions::default() };

    let code = Pipeline::standard().compile_document(&document, &options).unwrap().code;
    let tree = parse_java(&code);

    assert_eq!(tree.root_node().kind(), "program");
    assert!(!tree.root_node().has_error(), "syntax error in generated code:\n{}", code);
}

#[test]
fn test_linked_program_parses() {
    assert_valid_java("link/xor_network.json", EmbedMode::Link);
}

#[test]
fn test_embedded_program_parses() {
    assert_valid_java("embed/xor_network.json", EmbedMode::Embed);
}

#[test]
fn test_array_program_parses() {
    assert_valid_java("link/arrays.json", EmbedMode::Link);
}

#[test]
fn test_same_document_parses_in_both_modes() {
    // The embed fixture also generates valid code when linked
    assert_valid_java("embed/xor_network.json", EmbedMode::Link);
}
