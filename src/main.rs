use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use textbook_rsa::cli::Cli;
use textbook_rsa::rsa::{decrypt, encrypt, generate_keys, os_source};
use textbook_rsa::util::{format_file_size, read_text_file};

fn main() {
    // Initialize logging, defaulting to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let message = read_text_file(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    println!(
        "Text size: {} bytes ({}), {} characters",
        message.len(),
        format_file_size(message.len() as u64),
        message.chars().count()
    );

    let keypair = generate_keys(cli.bits, &mut os_source()).context("key generation failed")?;
    info!(bits = keypair.bit_length(), "keys ready");
    let (n, e, d) = keypair.into_parts();

    let start = Instant::now();
    let (ciphertexts, block_size) = encrypt(&message, &e, &n).context("encryption failed")?;
    let encrypt_time = start.elapsed();
    info!(blocks = ciphertexts.len(), block_size, "encrypted");

    for (index, block) in ciphertexts.iter().take(cli.show_blocks).enumerate() {
        println!("block {}: {}", index, hex::encode(block.to_bytes_be()));
    }

    let start = Instant::now();
    let decrypted = decrypt(&ciphertexts, &d, &n).context("decryption failed")?;
    let decrypt_time = start.elapsed();

    println!("Decrypted message identical to original: {}", message == decrypted);
    println!("Encryption time: {:?}. Decryption time: {:?}", encrypt_time, decrypt_time);

    Ok(())
}
