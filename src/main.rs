use clap::Parser;
use std::process::ExitCode;
use xpath_parser::cli::{Cli, OutputFormat};
use xpath_parser::{CliError, XPathParser, parse_all, render_json, render_text};

fn run(cli: &Cli) -> Result<bool, CliError> {
    let expressions = cli.expressions()?;
    let parser = XPathParser::new(cli.parser_config());
    let outcomes = parse_all(&parser, &expressions);

    let output = match cli.format {
        OutputFormat::Text => render_text(&outcomes),
        OutputFormat::Json => render_json(&outcomes)?,
    };
    println!("{}", output.trim_end());

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    log::info!("Parsed {} expressions, {} failed", outcomes.len(), failed);
    Ok(failed == 0)
}

/// Parses XPath expressions from a file or the command line and prints
/// their step structure.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
