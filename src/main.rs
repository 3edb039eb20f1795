//! Solana Vanity Address Generator CLI
//!
//! Usage:
//!   sol_vanity grind -p So            # Find an address starting with "So"
//!   sol_vanity grind -s fun -i        # Find an address ending in fun/Fun/...
//!   sol_vanity new                    # Generate a mnemonic + keypair
//!   sol_vanity recover -m "<phrase>"  # Recover a keypair from a mnemonic
//!   sol_vanity pubkey id.json         # Print a keypair's address

use std::io::{self, Write};
use std::process;

use clap::Parser;

use sol_vanity::config::{Cli, Command, GrindArgs, NewArgs, PubkeyArgs, RecoverArgs};
use sol_vanity::wallet::{derive, keyfile, mnemonic};
use sol_vanity::{Keypair, SearchCoordinator, SearchReport};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Grind(args) => grind(&args),
        Command::New(args) => new_wallet(&args),
        Command::Recover(args) => recover(&args),
        Command::Pubkey(args) => pubkey(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn grind(args: &GrindArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = args.to_request();
    let pattern = request.pattern()?;

    println!("Solana Vanity Address Generator");
    println!("===============================");
    println!("Pattern:    {pattern}");
    println!("Difficulty: {}", pattern.difficulty_description());
    println!("Workers:    {}", request.workers.max(1));
    match request.timeout {
        Some(timeout) => println!("Timeout:    {}ms", timeout.as_millis()),
        None => println!("Timeout:    none"),
    }
    println!("\nSearching... (Press Ctrl+C to stop)\n");

    let coordinator = SearchCoordinator::new();
    ctrlc_handler(coordinator.cancel_flag());

    let result = coordinator.search_with_report(&request, print_progress);
    println!();

    let found = result?;
    println!("=== Match ===");
    println!("Address:    {}", found.keypair.address());
    println!("Secret Key: {}", found.keypair.to_base58());
    println!(
        "Attempts:   {} in {:.2}s",
        format_number(found.attempts),
        found.elapsed.as_secs_f64()
    );

    if let Some(path) = &args.outfile {
        keyfile::write_keypair_file(&found.keypair, path)?;
        println!("Keypair written to {}", path.display());
    }

    Ok(())
}

fn new_wallet(args: &NewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let phrase = mnemonic::generate_mnemonic()?;
    let keypair = derive::keypair_from_mnemonic(&phrase, &args.passphrase, &args.derivation_path)?;

    println!("Address:  {}", keypair.address());
    println!("Path:     {}", args.derivation_path);
    println!("Mnemonic: {phrase}");
    println!("\nStore the mnemonic offline; anyone holding it controls the wallet.");

    write_outfile(&keypair, args.outfile.as_deref())
}

fn recover(args: &RecoverArgs) -> Result<(), Box<dyn std::error::Error>> {
    let keypair =
        derive::keypair_from_mnemonic(&args.mnemonic, &args.passphrase, &args.derivation_path)?;

    println!("Address: {}", keypair.address());
    println!("Path:    {}", args.derivation_path);

    write_outfile(&keypair, args.outfile.as_deref())
}

fn pubkey(args: &PubkeyArgs) -> Result<(), Box<dyn std::error::Error>> {
    // A path wins when the file exists; otherwise treat the argument as a
    // Base58-encoded secret.
    let keypair = if std::path::Path::new(&args.keypair).exists() {
        keyfile::read_keypair_file(&args.keypair)?
    } else {
        Keypair::from_base58(&args.keypair)?
    };

    println!("{}", keypair.address());
    Ok(())
}

fn write_outfile(
    keypair: &Keypair,
    outfile: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = outfile {
        keyfile::write_keypair_file(keypair, path)?;
        println!("Keypair written to {}", path.display());
    }
    Ok(())
}

fn print_progress(report: &SearchReport) {
    print!(
        "\rprogress: {} attempts | rate: {}/sec",
        format_number(report.attempts),
        format_number(report.rate as u64)
    );
    let _ = io::stdout().flush();
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(cancel: std::sync::Arc<std::sync::atomic::AtomicBool>) {
    let _ = ctrlc::set_handler(move || {
        cancel.store(true, std::sync::atomic::Ordering::Relaxed);
    });
}
