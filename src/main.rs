use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use tracing::{info, warn};

use sigbook_rs::activity::types::OrderActivity;
use sigbook_rs::activity::{parse_remote, spawn_applier, DeferredDispatcher};
use sigbook_rs::config::Settings;
use sigbook_rs::engine::book::{SharedBook, SignatureBook};
use sigbook_rs::engine::types::{OrderStatus, SignatureDetails};
use sigbook_rs::persist::{snapshot, wal, JsonFileSnapshotStore, PersistError, SnapshotStore};
use sigbook_rs::telemetry;

#[derive(Parser)]
#[command(author, version, about = "Track off-chain signed orders per account", long_about = None)]
struct Cli {
    /// Config file basename (extension optional)
    #[arg(long, env = "SIGBOOK_CONFIG", default_value = "sigbook")]
    config: String,

    /// Restore the latest snapshot before accepting commands
    #[arg(long)]
    restore: bool,

    /// JSON array of remote order activities to load on startup
    #[arg(long)]
    activities: Option<PathBuf>,
}

fn print_signature(sig: &SignatureDetails) {
    println!(
        "  {} {:?} {:?} chain={} expiry={} in={} {} out={} {}{}",
        sig.id,
        sig.ty,
        sig.status,
        sig.chain_id,
        sig.expiry,
        sig.swap_info.input_currency_amount_raw,
        sig.swap_info.input_currency_id,
        sig.swap_info.expected_output_currency_amount_raw,
        sig.swap_info.output_currency_id,
        sig.tx_hash.as_deref().map(|h| format!(" tx={h}")).unwrap_or_default(),
    );
}

fn print_account(book: &SignatureBook, account: &str) {
    let signatures = book.signatures(account).sorted_by_key(|s| (s.added_time, s.id.clone())).collect::<Vec<_>>();
    println!("{} ({} signatures)", account, signatures.len());
    for sig in signatures {
        print_signature(sig);
    }
}

fn print_state_summary(book: &SignatureBook) {
    println!("\n=== Signature Book ===");
    println!("Accounts: {}, Signatures: {}", book.accounts().count(), book.len());
    for account in book.accounts().sorted() {
        print_account(book, account);
    }
    println!("======================\n");
}

async fn load_activities(path: &Path, dispatcher: &DeferredDispatcher) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let activities: Vec<OrderActivity> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;

    let (mut parsed, mut rejected) = (0, 0);
    for activity in &activities {
        match parse_remote(activity, dispatcher) {
            Ok(sig) => {
                parsed += 1;
                println!("  {} -> {:?} {:?}", sig.id, sig.ty, sig.status);
            }
            Err(e) => {
                rejected += 1;
                println!("  {} rejected: {}", activity.details.id, e);
            }
        }
    }
    info!(parsed, rejected, path = %path.display(), "Loaded remote activities");
    println!("Parsed {parsed}, rejected {rejected}");

    // let the applier pick up the open orders before the next prompt
    tokio::task::yield_now().await;
    Ok(())
}

fn two_args<'a>(parts: &[&'a str]) -> Option<(&'a str, &'a str)> {
    match parts {
        [_, account, id] => Some((*account, *id)),
        _ => None,
    }
}

async fn restore(book: &SharedBook, store: &JsonFileSnapshotStore) -> anyhow::Result<()> {
    match store.load_snapshot().await? {
        Some(snap) => {
            let mut guard = book.lock();
            snapshot::apply_to_book(&mut guard, &snap)?;
            println!("✅ Restored {} signatures from {}", guard.len(), store.path().display());
        }
        None => println!("❌ No snapshot found at {}", store.path().display()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config).context("loading settings")?;
    telemetry::init_tracing(&settings.log_filter);

    let mut store = JsonFileSnapshotStore::new(settings.snapshot_path.clone());
    let book = SignatureBook::shared();
    let (dispatcher, applier) = spawn_applier(book.clone());

    if cli.restore {
        restore(&book, &store).await?;
    }
    if let Some(path) = &cli.activities {
        load_activities(path, &dispatcher).await?;
    }

    loop {
        print!("\nSIGBOOK> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();

        match command.as_str() {
            "help" | "h" => {
                println!("Available commands:");
                println!("  load <file>            - Normalise a JSON array of remote activities");
                println!("  list [account]         - Show tracked signatures");
                println!("  cancel <account> <id>  - Mark a signature cancelled");
                println!("  remove <account> <id>  - Stop tracking a signature");
                println!("  replay <journal>       - Apply newline-delimited JSON commands");
                println!("  snapshot               - Save the book to the snapshot file");
                println!("  restore                - Replace the book with the snapshot file");
                println!("  quit, q                - Exit");
            }
            "load" => match parts.get(1) {
                Some(path) => {
                    if let Err(e) = load_activities(Path::new(path), &dispatcher).await {
                        eprintln!("Error loading activities: {e:#}");
                    }
                }
                None => println!("Usage: load <file>"),
            },
            "list" => {
                let guard = book.lock();
                match parts.get(1) {
                    Some(account) => print_account(&guard, account),
                    None => print_state_summary(&guard),
                }
            }
            "cancel" => match two_args(&parts) {
                Some((account, id)) => {
                    let mut guard = book.lock();
                    match guard.get(account, id).cloned() {
                        Some(mut sig) => {
                            sig.status = OrderStatus::Cancelled;
                            match guard.update(sig) {
                                Ok(()) => println!("Cancelled {id}"),
                                Err(e) => eprintln!("Error: {e}"),
                            }
                        }
                        None => println!("No signature {id} for {account}"),
                    }
                }
                None => println!("Usage: cancel <account> <id>"),
            },
            "remove" => match two_args(&parts) {
                Some((account, id)) => {
                    let mut guard = book.lock();
                    match guard.get(account, id).cloned() {
                        Some(sig) => {
                            guard.remove(&sig);
                            println!("Removed {id}");
                        }
                        None => println!("No signature {id} for {account}"),
                    }
                }
                None => println!("Usage: remove <account> <id>"),
            },
            "replay" => match parts.get(1) {
                Some(path) => {
                    let result = tokio::fs::read_to_string(path)
                        .await
                        .map_err(PersistError::from)
                        .and_then(|text| wal::read_journal(&text))
                        .and_then(|commands| snapshot::replay(&mut book.lock(), commands));
                    match result {
                        Ok(applied) => println!("Replayed {applied} commands"),
                        Err(e) => eprintln!("Error replaying journal: {e}"),
                    }
                }
                None => println!("Usage: replay <journal>"),
            },
            "snapshot" => {
                let snap = snapshot::from_book(&book.lock());
                if let Err(e) = store.save_snapshot(&snap).await {
                    eprintln!("Error saving snapshot: {e}");
                } else {
                    println!("✅ Saved {} accounts to {}", snap.accounts.len(), store.path().display());
                }
            }
            "restore" => {
                if let Err(e) = restore(&book, &store).await {
                    eprintln!("Error restoring snapshot: {e:#}");
                }
            }
            "quit" | "q" | "exit" => {
                println!("Goodbye!");
                break;
            }
            "" => continue,
            _ => {
                println!("Unknown command. Type 'help' for available commands.");
            }
        }
    }

    // flush commands still queued for the applier
    drop(dispatcher);
    if let Err(e) = applier.await {
        warn!(error = %e, "Applier task ended abnormally");
    }
    Ok(())
}
