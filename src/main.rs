use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use mim_syntax::{parse_unit, Lexer, ParseOutput};

#[derive(Parser)]
#[command(name = "mim")]
#[command(author, version, about = "Syntax tools for the Mim language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// The source file to scan
        input: PathBuf,
    },

    /// Parse a source file and dump the syntax tree
    Parse {
        /// The source file to parse
        input: PathBuf,

        /// Dump the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check source files for syntax errors
    Check {
        /// The source files to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Also show which ambiguity rules were applied
        #[arg(long)]
        notes: bool,
    },

    /// Print a source file in canonical form
    Fmt {
        /// The source file to format
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Tokens { input } => tokens(&input),
        Commands::Parse { input, json } => parse(&input, json),
        Commands::Check { inputs, notes } => check(&inputs, notes),
        Commands::Fmt { input } => format(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read source file: {:?}", input))
}

/// Renders the diagnostics of one unit through codespan-reporting.
fn report(output: &ParseOutput, source: &str, notes: bool) -> Result<()> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(output.name.clone(), source.to_string());

    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();
    for diagnostic in &output.diagnostics {
        if !notes && !diagnostic.is_error() {
            continue;
        }
        codespan_reporting::term::emit(
            &mut writer.lock(),
            &config,
            &files,
            &diagnostic.to_codespan(file_id),
        )?;
    }
    Ok(())
}

fn tokens(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let mut lexer = Lexer::new(&source);
    for (i, token) in lexer.by_ref().enumerate() {
        println!(
            "{:4}: {:>4}:{:<3} {:<16} {}",
            i,
            token.position.line,
            token.position.column,
            format!("{:?}", token.token.kind()),
            token.token
        );
    }

    let diagnostics = lexer.into_diagnostics();
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        anyhow::bail!("{} lexical error(s) in {:?}", errors, input);
    }
    Ok(())
}

fn parse(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let output = parse_unit(input.display().to_string(), &source);

    if json {
        println!("{}", serde_json::to_string_pretty(&output.tree)?);
    } else {
        println!("{:#?}", output.tree);
    }

    report(&output, &source, false)?;
    if output.has_errors() {
        anyhow::bail!("Parsing failed");
    }
    Ok(())
}

fn check(inputs: &[PathBuf], notes: bool) -> Result<()> {
    log::info!("Checking {} file(s)", inputs.len());

    let sources = inputs
        .iter()
        .map(|input| read_source(input))
        .collect::<Result<Vec<_>>>()?;

    // 各ファイルは独立したパーサーで並列に解析する
    let outputs: Vec<ParseOutput> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .zip(&sources)
            .map(|(input, source)| {
                scope.spawn(move || parse_unit(input.display().to_string(), source))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<std::thread::Result<Vec<_>>>()
    })
    .map_err(|_| anyhow::anyhow!("parser thread panicked"))?;

    let mut failed = 0;
    for (output, source) in outputs.iter().zip(&sources) {
        report(output, source, notes)?;
        let errors = output.errors().count();
        if errors > 0 {
            failed += 1;
            println!("{}: {} ({} error(s))", "failed".red().bold(), output.name, errors);
        } else {
            println!("{}: {}", "ok".green().bold(), output.name);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) with syntax errors", failed);
    }
    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn format(input: &Path) -> Result<()> {
    let source = read_source(input)?;
    let output = parse_unit(input.display().to_string(), &source);

    if output.has_errors() {
        report(&output, &source, false)?;
        anyhow::bail!("Cannot format a file with syntax errors");
    }
    print!("{}", output.tree);
    Ok(())
}
