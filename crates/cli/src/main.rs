use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{BalanceEngine, Snapshot};
use api_types::{convert, snapshot::SnapshotView};

use crate::error::Result;

mod error;
mod output;

#[derive(Parser, Debug)]
#[command(name = "splitbook_cli")]
#[command(about = "Balances and settle-up plans for a shared-expense ledger")]
struct Cli {
    /// Log filter directive (also read from `SPLITBOOK_LOG`).
    #[arg(long, env = "SPLITBOOK_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print balances and the suggested transfers.
    Report(ReportArgs),
    /// Validate a snapshot file without computing balances.
    Check {
        /// Snapshot JSON file.
        snapshot: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Snapshot JSON file (members, expenses, settlements).
    snapshot: PathBuf,
    /// Seconds after an expense during which a new member still shares it.
    #[arg(long)]
    join_grace_secs: Option<i64>,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
    /// Settlement plan only, one transfer per row.
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(cli.log.as_str())
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("could not compute balances: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)?;
    let view: SnapshotView = serde_json::from_str(&raw)?;
    let snapshot = convert::snapshot_from_view(view)?;
    tracing::info!(
        path = %path.display(),
        members = snapshot.members.len(),
        expenses = snapshot.expenses.len(),
        settlements = snapshot.settlements.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Report(args) => {
            let snapshot = load(&args.snapshot)?;
            let mut builder = BalanceEngine::builder();
            if let Some(secs) = args.join_grace_secs {
                builder = builder.join_grace_secs(secs)?;
            }
            let report = builder.build()?.report(&snapshot)?;
            let view = convert::report_view(&report, &snapshot.members);

            let mut out = io::stdout().lock();
            match args.format {
                Format::Table => output::write_table(&mut out, &view)?,
                Format::Json => output::write_json(&mut out, &view)?,
                Format::Csv => output::write_csv(&mut out, &view)?,
            }
        }
        Command::Check { snapshot } => {
            let loaded = load(&snapshot)?;
            loaded.validate()?;
            println!(
                "{}: ok ({} members, {} expenses, {} settlements)",
                snapshot.display(),
                loaded.members.len(),
                loaded.expenses.len(),
                loaded.settlements.len()
            );
        }
    }
    Ok(())
}
