//! Kuchinawa CLI - Python subset to JavaScript Transpiler

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use kuchinawa::diagnostics::{self, KcnDiagnostics};
use kuchinawa::{lexer, parser, transpile_with_diagnostics, EmitOptions};

/// Kuchinawa - Python subset to JavaScript Transpiler
#[derive(Parser, Debug)]
#[command(name = "kcn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Transpile a Python subset to JavaScript", long_about = None)]
struct Cli {
    /// Input Python file ("-" reads stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output JavaScript file (default: <INPUT>.js, or stdout for stdin input)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    debug: bool,

    /// Dump the token stream and exit
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the AST as JSON and exit
    #[arg(long)]
    dump_ast: bool,

    /// Check only (don't generate output)
    #[arg(short, long)]
    check: bool,

    /// Emit JSON diagnostics to stderr (on failure only)
    #[arg(long)]
    diag_json: bool,

    /// Spaces per indentation level in the output
    #[arg(long, value_name = "N", default_value_t = 4)]
    indent: usize,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn read_source(input: &Path) -> Result<String> {
    if is_stdin(input) {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))
    }
}

fn fail(diags: &KcnDiagnostics, diag_json: bool) -> ! {
    print!("{}", diags.to_text());
    if diag_json {
        eprintln!("{}", diags.to_json());
    }
    std::process::exit(1);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let source = read_source(&cli.input)?;
    let file = (!is_stdin(&cli.input)).then_some(cli.input.as_path());
    tracing::debug!(input = ?cli.input, bytes = source.len(), "read source");

    if cli.dump_tokens {
        println!("=== Tokens ===");
        for (i, token) in lexer::tokenize(&source).iter().enumerate() {
            println!("[{i:03}] {token}");
        }
        return Ok(());
    }

    if cli.dump_ast {
        let program = match parser::parse_source(&source) {
            Ok(program) => program,
            Err(err) => fail(&diagnostics::from_error(&err, file), cli.diag_json),
        };
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    let options = EmitOptions {
        indent_width: cli.indent,
    };
    let translation = match transpile_with_diagnostics(&source, file, &options) {
        Ok(translation) => translation,
        Err(diags) => fail(&diags, cli.diag_json),
    };

    let warnings = diagnostics::from_degradations(&translation.degradations, file);
    if !warnings.is_empty() {
        eprint!("{}", warnings.to_text());
    }

    // Check mode
    if cli.check {
        println!("✅ Transpilation successful!");
        return Ok(());
    }

    let output_path = match cli.output {
        Some(path) => path,
        None if is_stdin(&cli.input) => {
            println!("{}", translation.code);
            return Ok(());
        }
        // Default: current directory, same file stem, .js extension
        None => {
            let mut p = cli.input.clone();
            p.set_extension("js");
            p.file_name().map(PathBuf::from).unwrap_or(p)
        }
    };

    std::fs::write(&output_path, &translation.code)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    println!("✅ Transpiled to: {output_path:?}");

    Ok(())
}
