//! forestrecorder CLI
//!
//! `forestrecorder [flags] COMMAND`: runs a single command and exits.
//!
//! Exit codes: 0 on success, 1 when the command fails, 2 on a usage error.

mod commands;
mod format;
mod parse;

use std::path::{Path, PathBuf};
use std::process;

use forestrecorder_engine::{ConfigError, Recorder, RecorderConfig};
use tracing::Level;

use commands::build_cli;
use format::{
    format_configured, format_dump, format_error, format_history, format_recorded,
    format_version, OutputMode,
};
use parse::{matches_to_action, CliAction, CliError, ConfigureOptions};

fn main() {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_count("verbose"));

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);

    let exit_code = match matches_to_action(&matches) {
        Ok(action) => match run(action, config_path.as_deref(), output_mode) {
            Ok(out) => {
                if !out.is_empty() {
                    println!("{}", out);
                }
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, output_mode));
                1
            }
        },
        Err(e @ CliError::UnknownCommand(_)) => {
            eprintln!("{}", format_error(&e, output_mode));
            2
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            1
        }
    };
    process::exit(exit_code);
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(
    action: CliAction,
    config_path: Option<&Path>,
    mode: OutputMode,
) -> Result<String, CliError> {
    match action {
        CliAction::Configure(opts) => {
            let path = configure(config_path, &opts)?;
            Ok(format_configured(&path, mode))
        }
        CliAction::Mutate(action) => {
            let record = open_recorder(config_path)?.apply(action)?;
            Ok(format_recorded(&record, mode))
        }
        CliAction::History => {
            let records = open_recorder(config_path)?.history()?;
            Ok(format_history(&records, mode))
        }
        CliAction::Dump => {
            let forest = open_recorder(config_path)?.dump()?;
            Ok(format_dump(&forest, mode))
        }
        CliAction::Version => Ok(format_version(env!("CARGO_PKG_VERSION"), mode)),
    }
}

fn open_recorder(config_path: Option<&Path>) -> Result<Recorder, CliError> {
    let config = RecorderConfig::load(config_path).map_err(config_error)?;
    Ok(Recorder::open(config)?)
}

/// Write the config file, returning where it was written.
fn configure(config_path: Option<&Path>, opts: &ConfigureOptions) -> Result<PathBuf, CliError> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => RecorderConfig::default_path()
            .ok_or(ConfigError::NoConfigPath)
            .map_err(config_error)?,
    };
    if path.exists() && !opts.force {
        return Err(config_error(ConfigError::AlreadyExists { path }));
    }

    if opts.has_overrides() {
        let mut config = RecorderConfig::default();
        if let Some(log) = &opts.log {
            config.log = log.clone();
        }
        if let Some(timezone) = &opts.timezone {
            config = config.with_timezone(timezone.clone());
        }
        if let Some(mode) = opts.durability {
            config = config.with_durability(mode);
        }
        config.validate().map_err(config_error)?;
        config.write_to_file(&path).map_err(config_error)?;
    } else {
        RecorderConfig::write_default(&path).map_err(config_error)?;
    }
    tracing::info!(path = %path.display(), "wrote config file");
    Ok(path)
}

fn config_error(e: ConfigError) -> CliError {
    CliError::Recorder(e.into())
}
