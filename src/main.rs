//! The `decodex` binary: reads commands from stdin, one per line, and drives a
//! `Session` until `exit`, `quit` or end of input.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

use decodex::cli::{ui, Command, Output, Session};
use decodex::{DecodexConfig, DecodexError};

#[derive(Parser, Debug)]
#[command(name = "decodex", version, about = "Build and replay encode/decode recipes")]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding saved recipes
    #[arg(long)]
    recipe_dir: Option<PathBuf>,

    /// Initial input data
    #[arg(short, long)]
    input: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), DecodexError> {
    let cli = Cli::parse();

    let (mut config, config_error) = match cli.config.as_deref() {
        Some(path) => match DecodexConfig::from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (DecodexConfig::default(), Some(e)),
        },
        None => (DecodexConfig::default(), None),
    };
    if let Some(dir) = cli.recipe_dir {
        config.recipe_dir = dir;
    }

    init_logger(&config, cli.verbose);
    if let Some(e) = config_error {
        eprintln!("{}", ui::render_error(&e));
        eprintln!("Continuing with the default configuration.");
    }
    log::debug!("Configuration: {:?}", config);

    let mut session = Session::new(&config);
    println!("{}", ui::greeting());
    match session.load_saved_recipes() {
        Ok(outputs) => outputs.iter().for_each(print_output),
        Err(e) => {
            eprintln!("{}", ui::render_error(&e));
            eprintln!("Saved recipes are unavailable for this session.");
        }
    }

    if let Some(text) = cli.input {
        match session.handle(Command::Input(text)) {
            Ok(output) => print_output(&output),
            Err(e) => eprintln!("{}", ui::render_error(&e)),
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("{}", session.prompt());
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match session.handle_line(line.trim_end_matches(['\r', '\n'])) {
            Ok(Output::Quit) => break,
            Ok(output) => print_output(&output),
            Err(e) => eprintln!("{}", ui::render_error(&e)),
        }
    }

    Ok(())
}

fn print_output(output: &Output) {
    if let Some(text) = ui::render(output) {
        println!("{}", text);
    }
}

/// Initialises `env_logger` once. The command line wins over the config file;
/// with neither, only warnings and errors are shown.
fn init_logger(config: &DecodexConfig, verbose: u8) {
    let level = match verbose {
        0 => config
            .log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.is_test(false);
    builder.filter_level(level);

    // Custom formatter: just print the level and message
    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}", record.level(), record.args())?;
        buf.flush()?;
        Ok(())
    });

    if let Some(path) = config.log_file.as_ref() {
        match OpenOptions::new().append(true).create(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!(
                "Cannot open log file {}: {}; logging to stderr",
                path.display(),
                e
            ),
        }
    }

    let _ = builder.try_init();
}
