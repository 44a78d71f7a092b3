//! pdfsift CLI - print the text and tables of a PDF as JSON

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use pdfsift::{extract_file, to_json, ErrorReport};

/// Every invocation prints exactly one JSON object, so clap's own help and
/// version flags are disabled and nothing after the path is interpreted.
#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(about = "Extract PDF text and tables as JSON", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Input PDF file. Kept as a raw string so an empty argument is still
    /// a path (one that does not exist).
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    input: Option<OsString>,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<OsString>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            log::debug!("Argument parsing failed: {}", e);
            return emit(&ErrorReport::new("No PDF path provided"), ExitCode::FAILURE);
        }
    };

    let Some(input) = cli.input.map(PathBuf::from) else {
        return emit(&ErrorReport::new("No PDF path provided"), ExitCode::FAILURE);
    };

    if !cli.rest.is_empty() {
        log::debug!("Ignoring extra arguments: {:?}", cli.rest);
    }

    if !input.exists() {
        return emit(&ErrorReport::new("File not found"), ExitCode::FAILURE);
    }

    let result = extract_file(&input);
    if let Some(reason) = result.open_error() {
        log::info!("{}: {}", input.display(), reason);
    }
    emit(&result, ExitCode::SUCCESS)
}

/// Print `value` as one line of JSON and return `code`.
fn emit<T: Serialize>(value: &T, code: ExitCode) -> ExitCode {
    match to_json(value) {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(e) => {
            eprintln!("pdfsift: {}", e);
            println!("{{\"error\": \"Failed to render output\"}}");
            ExitCode::FAILURE
        }
    }
}
