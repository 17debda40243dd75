use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use siml::{
    display_error,
    lexer::{config::LexerConfig, lexer::Lexer},
    tracer::TracingTracer,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Tokenize a SIML simulation description", long_about = None)]
struct Cli {
    /// Source file to tokenize
    file: PathBuf,

    /// Path to a JSON lexer config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spaces per indentation level (overrides the config file)
    #[arg(short, long)]
    indent_width: Option<usize>,

    /// Reject characters that match no token instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Emit one BlockOpen per skipped indentation level
    #[arg(long)]
    open_skipped_levels: bool,

    /// Report lexer activity through tracing
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match LexerConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                error!("{}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => LexerConfig::default(),
    };
    if let Some(indent_width) = cli.indent_width {
        config = config.with_indent_width(indent_width);
    }
    if cli.strict {
        config = config.with_strict(true);
    }
    if cli.open_skipped_levels {
        config = config.with_open_skipped_levels(true);
    }

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!("Failed to read {}: {}", cli.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let start = Instant::now();
    let mut lexer = Lexer::new(source.clone(), file_name, config);
    if cli.trace {
        lexer = lexer.with_tracer(Box::new(TracingTracer::new("Lexer")));
    }

    let mut count = 0;
    for token in lexer {
        match token {
            Ok(token) => {
                println!("{}:{}\t{}", token.line, token.column, token);
                count += 1;
            }
            Err(err) => {
                display_error(&err, &source);
                return ExitCode::FAILURE;
            }
        }
    }

    info!("Tokenized {} tokens in {:?}", count, start.elapsed());
    ExitCode::SUCCESS
}
