use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bank_sim::Bank;
use bank_sim::bank::BankConfig;
use bank_sim::csv::{read_commands, write_accounts};
use bank_sim::shell::Shell;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let bank = Bank::with_config(BankConfig::from_env());

    match env::args().nth(1) {
        Some(path) => run_script(bank, PathBuf::from(path)).await,
        None => run_shell(bank),
    }
}

/// Apply every row of a csv script, then print the accounts as csv.
async fn run_script(mut bank: Bank, path: PathBuf) -> ExitCode {
    if path.extension().is_none_or(|ext| ext != "csv") {
        warn!(path = %path.display(), "input file seems to not be a csv file");
    }

    let commands = match read_commands(path) {
        Ok(commands) => commands,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (command_sender, command_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if command_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    bank.run(ReceiverStream::new(command_receiver)).await;

    if let Err(e) = write_accounts(&bank, io::stdout().lock()) {
        error!("failed to write accounts: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Interactive menu on stdin/stdout.
fn run_shell(bank: Bank) -> ExitCode {
    let mut shell = Shell::new(bank, io::stdin().lock(), io::stdout());
    if let Err(e) = shell.run() {
        error!("terminal i/o failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
