use dfa_engine::error_handling::Result;
use dfa_engine::mod_three::{write_evaluations, InputSource, UNREACHABLE};
use dfa_engine::parser::DfaDefinition;

use clap::{Arg, ArgAction, Command};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("modthree")
        .version(dfa_engine::version())
        .about("Find the remainder of binary integers modulo three with a finite state machine")
        .arg(
            Arg::new("string_or_file")
                .short('s')
                .long("string-or-file")
                .help("Binary string to check, or path to a .txt file with one string per line")
                .required(true)
                .value_name("STRING_OR_FILE"),
        )
        .arg(
            Arg::new("definition")
                .short('d')
                .long("definition")
                .help("Run the automaton defined in this YAML file instead of mod three")
                .value_name("DEFINITION_FILE"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Do not print per-line results")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let string_or_file: &String = matches
        .get_one("string_or_file")
        .expect("required by clap");
    let definition: Option<&String> = matches.get_one("definition");
    let verbose = !matches.get_flag("quiet");

    info!(input = string_or_file.as_str(), "Running automaton");
    if let Err(e) = run(string_or_file, definition, verbose) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(string_or_file: &str, definition: Option<&String>, verbose: bool) -> Result<()> {
    let lines = InputSource::from_arg(string_or_file).lines()?;
    let mut out: Box<dyn Write> = if verbose {
        Box::new(std::io::stdout().lock())
    } else {
        Box::new(std::io::sink())
    };

    match definition {
        None => {
            write_evaluations(&lines, &mut out)?;
        }
        Some(path) => {
            let mut simulator = DfaDefinition::parse_from_file(path)?
                .build()?
                .into_simulator();
            for line in &lines {
                match simulator.run_str(line)? {
                    Some(state) => writeln!(out, "{}  -->  {}", line, state)?,
                    None => writeln!(out, "{}  -->  {}", line, UNREACHABLE)?,
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}
