use clap::{Parser, Subcommand};
use mlgen::{EmbedMode, GenerateError, GenerateOptions, Pipeline, ProgramDocument};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "mlgen")]
#[command(about = "mlgen - generate Java programs from machine-learning program trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java from program documents (.json)
    Generate {
        /// Path to a program document or a directory of them
        #[arg(required_unless_present = "stdin")]
        file: Option<PathBuf>,

        /// Read one program document from stdin and print the code
        #[arg(long)]
        stdin: bool,

        /// Output as JSON with headers and warnings
        #[arg(long)]
        json: bool,

        /// Embed model weights and training data instead of linking their files
        #[arg(long)]
        embed: bool,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },
}

/// Settings shared by every file of one invocation
struct RunConfig {
    options: GenerateOptions,
    strict: bool,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { file, stdin, json, embed, strict, indent } => {
            let config = RunConfig {
                options: GenerateOptions {
                    embed: EmbedMode::from(embed),
                    indent_width: indent,
                },
                strict,
            };
            if stdin {
                generate_stdin(&config, json);
            } else if let Some(path) = file {
                generate_path(&path, &config);
            } else {
                eprintln!("Error: provide a file/directory or use --stdin");
                process::exit(1);
            }
        }
    }
}

fn generate_stdin(config: &RunConfig, json_output: bool) {
    let mut source = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error: failed to read stdin: {}", err);
        process::exit(1);
    }

    let result = ProgramDocument::from_json(&source)
        .map_err(GenerateError::from)
        .and_then(|document| compile(&document, config));

    match result {
        Ok(result) if json_output => match serde_json::to_string(&result) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        },
        Ok(result) => print!("{}", result.code),
        Err(err) => {
            print_error(&err, "<stdin>");
            process::exit(1);
        }
    }
}

fn generate_path(path: &Path, config: &RunConfig) {
    if path.is_file() {
        if path.extension().is_none_or(|ext| ext != "json") {
            eprintln!("Error: {} is not a .json program document", path.display());
            process::exit(1);
        }
        let start = Instant::now();
        if !generate_file(path, config) {
            process::exit(1);
        }
        print_summary(1, start.elapsed());
    } else if path.is_dir() {
        generate_directory(path, config);
    } else {
        eprintln!("Error: {} does not exist", path.display());
        process::exit(1);
    }
}

fn generate_directory(dir: &Path, config: &RunConfig) {
    let start = Instant::now();
    let mut generated = 0;
    let mut failed = 0;

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
    {
        if generate_file(entry.path(), config) {
            generated += 1;
        } else {
            failed += 1;
        }
    }

    if generated + failed == 0 {
        eprintln!("No .json program documents found in {}", dir.display());
        process::exit(1);
    }

    print_summary(generated, start.elapsed());
    if failed > 0 {
        process::exit(1);
    }
}

/// Generate one document, writing `<Class>.java` next to it. Returns `false` on failure.
fn generate_file(path: &Path, config: &RunConfig) -> bool {
    let filename = path.display().to_string();
    let document = match ProgramDocument::from_path(path) {
        Ok(document) => document,
        Err(err) => {
            print_error(&GenerateError::from(err), &filename);
            return false;
        }
    };

    let result = match compile(&document, config) {
        Ok(result) => result,
        Err(err) => {
            print_error(&err, &filename);
            return false;
        }
    };

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Program");
    let class_name = document.program.primary_class().unwrap_or(stem);
    let output = path.with_file_name(format!("{}.java", class_name));

    if let Err(err) = fs::write(&output, &result.code) {
        eprintln!("Error: failed to write {}: {}", output.display(), err);
        return false;
    }
    print_generated(&output.display().to_string(), result.warnings.len());
    true
}

fn compile(document: &ProgramDocument, config: &RunConfig) -> Result<mlgen::GenerateResult, GenerateError> {
    let mut pipeline = Pipeline::standard();
    let result = pipeline.compile_document(document, &config.options)?;

    if config.strict && !result.warnings.is_empty() {
        let details: Vec<String> = result
            .warnings
            .iter()
            .map(|warning| format!("{}: {}", warning.path, warning.message))
            .collect();
        return Err(GenerateError::new(
            mlgen::ErrorKind::StrictWarnings,
            format!("{} warning(s) with --strict", result.warnings.len()),
        )
        .with_help(details.join("\n")));
    }

    Ok(result)
}

fn print_error(err: &GenerateError, filename: &str) {
    if io::stderr().is_terminal() {
        eprint!("{}", err.render_color(filename));
    } else {
        eprint!("{}", err.render(filename));
    }
}

fn print_generated(path: &str, warnings: usize) {
    let is_tty = io::stderr().is_terminal();
    let suffix = match warnings {
        0 => String::new(),
        1 => " (1 warning)".to_string(),
        n => format!(" ({} warnings)", n),
    };
    if is_tty {
        eprintln!("  \x1b[32m✓\x1b[0m {}{}", path, suffix);
    } else {
        eprintln!("  ✓ {}{}", path, suffix);
    }
}

fn print_summary(count: usize, elapsed: std::time::Duration) {
    let is_tty = io::stderr().is_terminal();
    let time_str = format_duration(elapsed);
    let files_word = if count == 1 { "file" } else { "files" };

    if is_tty {
        eprintln!("\n\x1b[1m✨ Generated {} {} in {}\x1b[0m", count, files_word, time_str);
    } else {
        eprintln!("\n✨ Generated {} {} in {}", count, files_word, time_str);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
