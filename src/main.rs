//! Brainwallet address checker CLI

use anyhow::{Context, Result};
use braincheck::balance::{AddressLookup, BalanceClient, BalanceSummary, LookupError, DEFAULT_API_BASE};
use braincheck::session::{Command, Event, Session};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "braincheck")]
#[command(about = "Derive a brainwallet address and check its on-chain activity")]
#[command(version)]
struct Cli {
    /// Base URL of the esplora-style address API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Timeout in seconds for balance lookups
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single passphrase and exit
    Check {
        /// The passphrase to check
        passphrase: String,
    },
}

/// Runs the async balance client to completion for the synchronous
/// session loop. One lookup in flight at a time, per the session rules.
struct BlockingLookup<'a> {
    rt: &'a tokio::runtime::Runtime,
    client: &'a BalanceClient,
}

impl AddressLookup for BlockingLookup<'_> {
    fn lookup(&self, address: &str) -> Result<BalanceSummary, LookupError> {
        self.rt.block_on(self.client.lookup(address))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let client = BalanceClient::new(&cli.api_base, Duration::from_secs(cli.timeout_secs))
        .context("failed to build balance client")?;
    let lookup = BlockingLookup {
        rt: &rt,
        client: &client,
    };

    match cli.command {
        Some(Commands::Check { passphrase }) => run_check(passphrase, &lookup),
        None => run_prompt(&lookup),
    }
}

fn run_check(passphrase: String, lookup: &dyn AddressLookup) -> Result<()> {
    let mut session = Session::new();
    session.submit(passphrase.into_bytes(), lookup);
    print!("{}", session.report());
    Ok(())
}

fn run_prompt(lookup: &dyn AddressLookup) -> Result<()> {
    let stdin = io::stdin();
    let mut session = Session::new();

    loop {
        print!("Enter wallet passphrase: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF quits from the entry prompt
            if let Some(Command::Quit) = session.apply(Event::Cancel) {
                println!();
            }
            return Ok(());
        }

        // Strip the line terminator only; the passphrase is otherwise
        // taken byte for byte
        let passphrase = line.trim_end_matches(['\r', '\n']).as_bytes().to_vec();

        session.submit(passphrase, lookup);
        println!();
        print!("{}", session.report());
        println!();

        session.apply(Event::Reset);
    }
}
