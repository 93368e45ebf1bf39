use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use jago::cst::SourceFile;
use jago::symbol::{parse_symbols, resolve_file};
use jago::{Config, Translator};

#[derive(Parser)]
#[command(name = "jago")]
#[command(about = "Java to Go source translator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate .java files (or directories of them) to .go files
    Translate {
        /// Input .java files or directories
        #[arg(value_name = "PATH", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory for .go files; without it, output goes to stdout
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Suppress stdout output
        #[arg(short, long)]
        quiet: bool,

        /// Dump the lowered Go AST instead of printed source
        #[arg(long)]
        dump_ast: bool,

        /// Stop after the symbol phase and print a summary
        #[arg(long)]
        symbols_only: bool,

        /// Annotation that drops the members it marks (repeatable)
        #[arg(long = "exclude-annotation", value_name = "NAME")]
        exclude_annotations: Vec<String>,

        /// Verbose progress output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a .java file and dump its concrete syntax tree
    Parse {
        /// Input .java file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Build and dump the symbol table of a .java file
    Symbols {
        /// Input .java file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            inputs,
            output,
            quiet,
            dump_ast,
            symbols_only,
            exclude_annotations,
            verbose,
        } => translate(
            &inputs,
            output.as_deref(),
            quiet,
            dump_ast,
            symbols_only,
            &exclude_annotations,
            verbose,
        ),
        Commands::Parse { input } => parse_file(&input),
        Commands::Symbols { input } => dump_symbols(&input),
    }
}

#[allow(clippy::too_many_arguments)]
fn translate(
    inputs: &[PathBuf],
    output: Option<&Path>,
    quiet: bool,
    dump_ast: bool,
    symbols_only: bool,
    exclude_annotations: &[String],
    verbose: bool,
) -> Result<()> {
    let files = collect_java_files(inputs)?;
    if files.is_empty() {
        bail!("no .java files found in the given inputs");
    }

    let mut config = Config::new();
    for annotation in exclude_annotations {
        config.exclude_annotation(annotation);
    }

    if symbols_only {
        for path in &files {
            let file = SourceFile::open(path)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            let mut symbols = parse_symbols(&file)?;
            resolve_file(&mut symbols);
            println!(
                "{}: package `{}`, {} imports, {} top-level types",
                path.display(),
                symbols.package,
                symbols.imports.len(),
                symbols.top_level_classes.len()
            );
        }
        return Ok(());
    }

    let mut translator = Translator::new(config);
    for path in &files {
        if verbose {
            println!("Translating {}...", path.display());
        }
        translator
            .add_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }

    let outputs = translator.translate()?;

    if let Some(output_dir) = output {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }
        for translated in &outputs {
            let path = output_dir.join(&translated.name);
            fs::write(&path, &translated.go_source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if verbose {
                println!("Wrote {}", path.display());
            }
        }
    }

    if !quiet && output.is_none() {
        for translated in &outputs {
            if dump_ast {
                println!("{:#?}", translated.ast);
            } else {
                print!("{}", translated.go_source);
            }
        }
    }

    Ok(())
}

fn parse_file(input: &Path) -> Result<()> {
    let file = SourceFile::open(input)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    println!("{}", file.root().to_sexp());
    Ok(())
}

fn dump_symbols(input: &Path) -> Result<()> {
    let file = SourceFile::open(input)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    let mut symbols = parse_symbols(&file)?;
    resolve_file(&mut symbols);
    println!("{:#?}", symbols);
    Ok(())
}

/// Expand the input paths into the sorted list of .java files they name
fn collect_java_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                let is_java = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e == jago::common::JAVA_EXTENSION)
                    .unwrap_or(false);
                if is_java {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
