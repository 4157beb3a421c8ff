// cfront: lexer and parser driver for a C subset

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as _, Subcommand};
use tracing_subscriber::EnvFilter;

use cfront::parser::ast::Declaration;
use cfront::parser::parse::DEFAULT_MAX_DEPTH;
use cfront::{Lexer, ParseOptions, Parser};

/// Lex and parse a subset of C
#[derive(clap::Parser)]
#[command(name = "cfront", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream, reporting every lexical error
    #[command(visible_alias = "t")]
    Tokens {
        /// Source file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse a source file and list its top-level declarations
    #[command(visible_alias = "p")]
    Parse {
        /// Source file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum nesting of statements and expressions
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Also print the full syntax tree
        #[arg(long)]
        debug: bool,
    },
}

fn main() -> ExitCode {
    // Logging is off unless CFRONT_LOG is set, e.g. CFRONT_LOG=cfront=trace
    if let Ok(filter) = EnvFilter::try_from_env("CFRONT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Tokens { file } => print_tokens(&file),
        Command::Parse {
            file,
            max_depth,
            debug,
        } => print_program(&file, ParseOptions { max_depth }, debug),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_source(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(path)
    }
}

fn print_tokens(path: &Path) -> io::Result<ExitCode> {
    let source = read_source(path)?;
    tracing::info!(path = %path.display(), bytes = source.len(), "tokenizing");

    let (tokens, errors) = Lexer::new(&source).scan_all();
    for token in &tokens {
        println!(
            "{}:{}\t{:?}\t{:?}",
            token.location.line, token.location.column, token.kind, token.text
        );
    }
    println!("Total tokens: {}", tokens.len());

    if errors.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    for err in &errors {
        eprintln!("{}", err);
    }
    Ok(ExitCode::FAILURE)
}

fn print_program(path: &Path, options: ParseOptions, debug: bool) -> io::Result<ExitCode> {
    let source = read_source(path)?;
    tracing::info!(path = %path.display(), max_depth = options.max_depth, "parsing");

    let program = match Parser::with_options(&source, options).and_then(|mut p| p.parse_program()) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    for decl in &program.declarations {
        let loc = decl.location();
        match decl {
            Declaration::Function(f) => println!(
                "{}:{}\tfunction {} {}({}) with {} statement(s)",
                loc.line,
                loc.column,
                f.return_type,
                f.name,
                f.params
                    .iter()
                    .map(|p| format!("{} {}", p.type_name, p.name))
                    .collect::<Vec<_>>()
                    .join(", "),
                f.body.statements.len()
            ),
            Declaration::Variable(v) => match &v.init {
                Some(init) => println!(
                    "{}:{}\tvariable {} {} = {}",
                    loc.line, loc.column, v.type_name, v.name, init
                ),
                None => println!("{}:{}\tvariable {} {}", loc.line, loc.column, v.type_name, v.name),
            },
        }
    }
    println!(
        "Parsed successfully. Found {} top-level declarations.",
        program.declarations.len()
    );

    if debug {
        println!("{:#?}", program);
    }

    Ok(ExitCode::SUCCESS)
}
