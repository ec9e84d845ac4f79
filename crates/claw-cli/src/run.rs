//! Command dispatch shared by the binary and in-process callers.
//!
//! ```rust,no_run
//! let mut out = Vec::new();
//! claw_cli::run_blocking(
//!     ["clawbernetes", "container", "list", "--agent", "127.0.0.1:5051"],
//!     &mut out,
//! )?;
//! # Ok::<(), claw_cli::CliError>(())
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

use crate::cli::{AgentCommands, Cli, Commands, ContainerCommands};
use crate::client::HttpClient;
use crate::commands::{AgentCommand, ContainerCommand};
use crate::error::CliError;
use crate::output::OutputFormat;

/// Execute a parsed command, writing its output to `writer`.
///
/// # Errors
///
/// Returns an error if the target cannot be reached or answers badly, or if
/// writing fails.
pub async fn run<W: Write + ?Sized>(cli: Cli, writer: &mut W) -> Result<(), CliError> {
    let format = OutputFormat::new(cli.format);
    let timeout = Duration::from_secs(cli.timeout_secs);
    debug!(command = ?cli.command, "running command");

    match &cli.command {
        Commands::Container { command } => {
            let ContainerCommands::List(args) = command;
            let cmd = ContainerCommand::new(HttpClient::new(&args.agent, timeout)?);
            cmd.execute(writer, &format, command).await?;
        }
        Commands::Agent { command } => {
            let AgentCommands::List { master } = command;
            let cmd = AgentCommand::new(HttpClient::new(master, timeout)?);
            cmd.execute(writer, &format, command).await?;
        }
    }
    Ok(())
}

/// Parse `args` (program name first) and run the command to completion.
///
/// Help and version requests are written to `writer`. Must not be called
/// from inside an async runtime.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] if the arguments do not parse, and
/// any error [`run`] returns.
pub fn run_blocking<I, T, W>(args: I, writer: &mut W) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write + ?Sized,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(writer, "{}", e.render())?;
            return Ok(());
        }
        Err(e) => return Err(CliError::InvalidArgument(e.to_string())),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli, writer))
}
