//! Binary to generate/update .expected.java and .expected.err fixture files
//!
//! Usage:
//!   cargo run --bin accept_expected            # Update all
//!   cargo run --bin accept_expected -- embed   # Update only fixtures matching "embed"

use mlgen::{EmbedMode, GenerateOptions, Pipeline, ProgramDocument};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let filter: Option<String> = std::env::args().nth(1);
    let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");

    let mut updated = 0;
    let mut skipped = 0;

    for entry in WalkDir::new(&fixture_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|s| s == "json"))
    {
        let path = entry.path();
        let path_str = path.to_string_lossy();

        // Apply filter if provided
        if let Some(ref f) = filter {
            if !path_str.contains(f) {
                skipped += 1;
                continue;
            }
        }

        process_file(path);
        updated += 1;
    }

    println!("Updated {} files, skipped {}", updated, skipped);
}

fn process_file(path: &Path) {
    let document = match ProgramDocument::from_path(path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            return;
        }
    };

    let embed = path
        .parent()
        .and_then(|dir| dir.file_name())
        .is_some_and(|mode| mode == "embed");
    let options = GenerateOptions {
        embed: EmbedMode::from(embed),
        ..GenerateOptions::default()
    };

    let mut pipeline = Pipeline::standard();
    let expected_java = path.with_extension("expected.java");
    let expected_err = path.with_extension("expected.err");

    match pipeline.compile_document(&document, &options) {
        Ok(output) => {
            if let Err(e) = fs::write(&expected_java, &output.code) {
                eprintln!("Failed to write {:?}: {}", expected_java, e);
            } else {
                println!("  wrote {}", expected_java.display());
            }

            // Remove any stale .expected.err if this now generates
            if expected_err.exists() {
                let _ = fs::remove_file(&expected_err);
            }
        }
        Err(e) => {
            let filename = path.file_name().and_then(|s| s.to_str()).unwrap_or("unknown");
            if let Err(err) = fs::write(&expected_err, e.render(filename)) {
                eprintln!("Failed to write {:?}: {}", expected_err, err);
            } else {
                println!("  wrote {}", expected_err.display());
            }

            if expected_java.exists() {
                let _ = fs::remove_file(&expected_java);
            }
        }
    }
}
