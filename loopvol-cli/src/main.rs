mod cli;
mod commands;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use cli::{Cli, Commands};
use loopvol::util::logging;
use loopvol::{DriverResponse, HostExecutor, LoopvolError, VolumeDriver};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let e = LoopvolError::InvalidArgument("missing subcommand".to_string());
                return respond(DriverResponse::failure(&e));
            }
            _ => return respond(DriverResponse::failure(&usage_error(&e))),
        },
    };

    let loaded = config::load_config(&cli.global.config);
    let mut options = loaded.options;
    cli.global.apply_to(&mut options);

    // stdout and stderr belong to the JSON response; log only to a file
    let (_log_guard, log_error) = match options.log_file.as_deref() {
        Some(file) => match logging::init_file_logging(file, &options.log_level) {
            Ok(guard) => (Some(guard), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };

    // A missing sink only fails the call when debug output was asked for;
    // otherwise the operation runs without diagnostics.
    if let Some(e) = log_error
        && cli.global.debug
    {
        return respond(DriverResponse::failure(&e));
    }

    if let Some(warning) = loaded.warning {
        tracing::warn!("{}", warning);
    }
    tracing::debug!("argv: {:?}", std::env::args().collect::<Vec<_>>());

    let driver = VolumeDriver::new(&options, Arc::new(HostExecutor));

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &driver),
        Commands::Attach(args) => commands::attach::execute(args, &driver),
        Commands::Mount(args) => commands::mount::execute(args, &driver),
        Commands::Unmount(args) => commands::unmount::execute(args, &driver),
        Commands::Detach(args) => commands::detach::execute(args, &driver),
        Commands::Unsupported(args) => commands::unsupported(&args),
    };

    respond(DriverResponse::from_result(result))
}

fn respond(response: DriverResponse) -> ExitCode {
    println!("{}", response.to_json());
    ExitCode::from(response.exit_code())
}

/// Clap's report as a single line, without the "error: " prefix or usage text.
fn usage_error(e: &clap::Error) -> LoopvolError {
    let rendered = e.to_string();
    let message = rendered
        .lines()
        .take_while(|line| {
            !line.starts_with("Usage:") && !line.starts_with("For more information")
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.strip_prefix("error: ").unwrap_or(&message);
    LoopvolError::InvalidArgument(message.to_string())
}
