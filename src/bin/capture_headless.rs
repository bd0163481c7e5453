//! Capture Headless Runner
//!
//! Replays a recorded test-runner stream through a capture session and
//! prints what a console widget would have shown.
//!
//! # Usage
//!
//! ```bash
//! # Recolor a pytest run on a true-color terminal
//! pytest --color=yes | capture-headless --ansi
//!
//! # Dump the classified transcript as JSON
//! capture-headless --json -f run.log > transcript.json
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

use serde::Serialize;

use capture_stream::app::{Config, DumpPolicy};
use capture_stream::capture::{AppendLog, CaptureSession, OutputContext, StreamInterceptor};
use capture_stream::surface::{AnsiSurface, PresentationSurface, TextRun, TranscriptSurface};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CHUNK: usize = 4096;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = parse_args(std::env::args().skip(1).collect());

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::default(),
    };
    if args.dump {
        config.dump = DumpPolicy::Always;
    }

    let mut input: Box<dyn Read> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => Box::new(io::stdin()),
    };

    match args.format {
        OutputFormat::Ansi => {
            let mut surface = AnsiSurface::new(io::stdout()).with_ambient(config.palette.normal);
            if let Err(e) = capture(&mut surface, &config, input.as_mut(), args.chunk) {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            surface.into_inner();
        },
        OutputFormat::Text | OutputFormat::Json => {
            let mut surface = TranscriptSurface::new();
            let log = match capture(&mut surface, &config, input.as_mut(), args.chunk) {
                Ok(log) => log,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                },
            };

            if args.format == OutputFormat::Text {
                print!("{}", surface.text());
            } else {
                let report = Report {
                    runs: surface.runs(),
                    scrolls: surface.scroll_count(),
                    fragments: &log,
                };
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing transcript: {}", e);
                        return ExitCode::FAILURE;
                    },
                }
            }
        },
    }

    ExitCode::SUCCESS
}

/// Feed `input` through a capture session in `chunk`-sized writes
fn capture<S: PresentationSurface>(
    surface: S,
    config: &Config,
    input: &mut dyn Read,
    chunk: usize,
) -> capture_stream::Result<AppendLog> {
    let interceptor = StreamInterceptor::new(surface, config)?;
    let mut context = OutputContext::stderr();

    let (_, log) = CaptureSession::run(&mut context, interceptor, config.dump, |session| {
        let mut buf = vec![0u8; chunk.max(1)];
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(capture_stream::Error::from(e)),
            };
            session.write_bytes(&buf[..n]);
        }
        tracing::debug!(fragments = session.log().len(), "Input exhausted");
        Ok(())
    })?;

    Ok(log)
}

/// JSON output
#[derive(Serialize)]
struct Report<'a> {
    runs: &'a [TextRun],
    scrolls: usize,
    fragments: &'a AppendLog,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Ansi,
    Json,
}

/// Command-line arguments
struct Args {
    /// Input file (stdin if not specified)
    input: Option<String>,
    /// JSON config file
    config: Option<String>,
    format: OutputFormat,
    /// Bytes per write
    chunk: usize,
    /// Dump the append log on exit
    dump: bool,
    help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            config: None,
            format: OutputFormat::Text,
            chunk: DEFAULT_CHUNK,
            dump: false,
            help: false,
        }
    }
}

fn parse_args(argv: Vec<String>) -> Args {
    let mut args = Args::default();

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => {
                args.help = true;
            },
            "-f" | "--file" => {
                i += 1;
                if i < argv.len() {
                    args.input = Some(argv[i].clone());
                }
            },
            "--config" => {
                i += 1;
                if i < argv.len() {
                    args.config = Some(argv[i].clone());
                }
            },
            "--chunk" => {
                i += 1;
                if i < argv.len() {
                    args.chunk = argv[i].parse().unwrap_or(DEFAULT_CHUNK);
                }
            },
            "-t" | "--text" => {
                args.format = OutputFormat::Text;
            },
            "-a" | "--ansi" => {
                args.format = OutputFormat::Ansi;
            },
            "-j" | "--json" => {
                args.format = OutputFormat::Json;
            },
            "-d" | "--dump" => {
                args.dump = true;
            },
            other => {
                // Treat as input file if no flag
                if args.input.is_none() && !other.starts_with('-') {
                    args.input = Some(other.to_string());
                }
            },
        }
        i += 1;
    }

    args
}

fn print_help() {
    println!("Capture Headless Runner");
    println!();
    println!("Usage: capture-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>    Read the stream from a file");
    println!("      --config <PATH>  Load a JSON config");
    println!("      --chunk <N>      Bytes per write (default: 4096)");
    println!("  -t, --text           Print the captured text (default)");
    println!("  -a, --ansi           Re-render with 24-bit status colors");
    println!("  -j, --json           Print the colored transcript as JSON");
    println!("  -d, --dump           Dump the append log to stderr on exit");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
}
