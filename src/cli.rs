// Command line configuration for the encrypt/decrypt driver

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::rsa::keygen::MIN_KEY_BITS;

/// Default modulus size in bits
pub const DEFAULT_KEY_BITS: u64 = 1024;

/// Encrypt a text file with textbook RSA, decrypt it concurrently and time both phases
#[derive(Parser, Debug, Clone)]
#[command(name = "textbook-rsa")]
#[command(version)]
#[command(about = "Textbook RSA block encryption with concurrent ordered decryption", long_about = None)]
pub struct Cli {
    /// Text file to encrypt
    #[arg(short, long, env = "TEXTBOOK_RSA_INPUT")]
    pub input: PathBuf,

    /// Modulus size in bits
    #[arg(short, long, env = "TEXTBOOK_RSA_BITS", default_value_t = DEFAULT_KEY_BITS)]
    pub bits: u64,

    /// Print the first N ciphertext blocks as hex
    #[arg(long, default_value_t = 0)]
    pub show_blocks: usize,
}

impl Cli {
    /// Reject settings that cannot produce a key
    pub fn validate(&self) -> Result<()> {
        if self.bits < MIN_KEY_BITS {
            bail!("Key size must be at least {} bits, got {}", MIN_KEY_BITS, self.bits);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["textbook-rsa", "--input", "book.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("book.txt"));
        assert_eq!(cli.bits, DEFAULT_KEY_BITS);
        assert_eq!(cli.show_blocks, 0);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from(["textbook-rsa", "-i", "a.txt", "-b", "2048", "--show-blocks", "3"]).unwrap();
        assert_eq!(cli.bits, 2048);
        assert_eq!(cli.show_blocks, 3);
    }

    #[test]
    fn test_validate_rejects_tiny_keys() {
        for bits in ["2", "4", "9"] {
            let cli = Cli::try_parse_from(["textbook-rsa", "-i", "a.txt", "-b", bits]).unwrap();
            assert!(cli.validate().is_err(), "{} bits", bits);
        }
        let cli = Cli::try_parse_from(["textbook-rsa", "-i", "a.txt", "-b", "10"]).unwrap();
        assert!(cli.validate().is_ok());
    }
}
