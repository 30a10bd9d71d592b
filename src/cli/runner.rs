use std::process::ExitCode;

use clap::CommandFactory;
use clap::error::ErrorKind;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use polyglot_eol::core::params::DEFAULT_DELIMITER;
use polyglot_eol::{
    RewriteParams, SelectParams, WriteMode, rewrite_file_with_params, run_batch,
};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn usage_error(kind: ErrorKind, message: impl std::fmt::Display) -> ! {
    CliArgs::command().error(kind, message).exit()
}

/// In pre-commit mode the only positional is the delimiter.
fn pre_commit_delimiter(args: &CliArgs) -> Result<String, AppError> {
    match (&args.polyglot_file, &args.delimiter) {
        (None, None) => Ok(DEFAULT_DELIMITER.to_string()),
        (Some(first), None) => first
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidDelimiter {
                value: first.to_string_lossy().into_owned(),
            }),
        (_, Some(extra)) => usage_error(
            ErrorKind::TooManyValues,
            format!(
                "unexpected argument '{}': --pre-commit takes at most one positional (the delimiter)",
                extra
            ),
        ),
    }
}

pub fn run(args: CliArgs) -> Result<ExitCode, AppError> {
    init_logging(args.log);

    let failed = if args.pre_commit {
        let params = RewriteParams::new(pre_commit_delimiter(&args)?).with_mode(args.mode);
        let select = SelectParams {
            manifest: args.manifest.clone(),
        };

        info!("Starting pre-commit run from root: {:?}", args.root);
        let report = run_batch(&args.root, &select, &params)?;
        if args.json {
            print_json(&report)?;
        }

        !report.is_success() || (args.mode == WriteMode::Check && report.changed > 0)
    } else {
        let Some(input) = args.polyglot_file else {
            usage_error(
                ErrorKind::MissingRequiredArgument,
                "polyglot_file is required unless --pre-commit is specified",
            );
        };
        let delimiter = args
            .delimiter
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string());
        let params = RewriteParams::new(delimiter).with_mode(args.mode);

        match rewrite_file_with_params(&input, &params) {
            Ok(report) => {
                if args.json {
                    print_json(&report)?;
                }
                args.mode == WriteMode::Check && report.changed
            }
            Err(e) => {
                error!("Error: {}", e);
                true
            }
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
