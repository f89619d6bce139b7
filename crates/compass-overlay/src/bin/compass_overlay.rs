use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use compass_overlay::run::{run_files, RunError, RunOutput};
use compass_overlay::session::OverlayIoError;
use log::LevelFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: OverlayIoError,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "compass-overlay",
    version,
    about = "Render the compass grid overlay headlessly from a JSON config and event script"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); defaults to
    /// $COMPASS_OVERLAY_LOG or warn
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON (needs the `tracing` feature)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session config JSON
    #[arg(long)]
    config: PathBuf,

    /// Event script JSON replayed before rendering
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Replay the script and render the final frame
    Render {
        #[command(flatten)]
        session: SessionArgs,

        /// Write the frame as JSON here
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the frame as SVG here
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Replay the script and print the versioned marker payload
    Markers {
        #[command(flatten)]
        session: SessionArgs,

        /// Write the payload here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn dispatch(cmd: Cmd) -> Result<(), CliError> {
    match cmd {
        Cmd::Render { session, json, svg } => {
            let out = replay(&session)?;
            let frame_json = out.frame.to_json()?;
            if let Some(path) = svg.as_ref() {
                write(path, &out.frame.to_svg())?;
            }
            match json.as_ref() {
                Some(path) => write(path, &frame_json)?,
                // stdout is the default sink unless only SVG was requested
                None if svg.is_none() => println!("{frame_json}"),
                None => {}
            }
        }
        Cmd::Markers { session, out } => {
            let payload = replay(&session)?.markers;
            match out {
                Some(path) => {
                    payload
                        .write_json(&path)
                        .map_err(|source| CliError::Save {
                            path: path.clone(),
                            source,
                        })?;
                    log::info!("wrote {}", path.display());
                }
                None => println!("{}", payload.to_json()?),
            }
        }
    }
    Ok(())
}

fn replay(args: &SessionArgs) -> Result<RunOutput, CliError> {
    Ok(run_files(&args.config, args.events.as_deref())?)
}

fn write(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn init_logging(verbose: u8, json: bool) {
    use compass_overlay::core::{level_for_verbosity, level_from_env};

    let level = if verbose > 0 {
        level_for_verbosity(verbose)
    } else {
        level_from_env().unwrap_or(LevelFilter::Warn)
    };

    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        compass_overlay::core::init_tracing(json, level.to_level().unwrap_or(log::Level::Error));
    }

    #[cfg(not(feature = "tracing"))]
    {
        if json {
            eprintln!("warning: --log-json needs the `tracing` feature; using plain logs");
        }
        let _ = compass_overlay::core::init_with_level(level);
    }
}
