//! crypto-driver CLI - encrypt and decrypt text files
//!
//! Envelopes are written as lowercase hex. The secret is read from the
//! terminal, or from stdin with `--passphrase-stdin`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crypto_driver::file_ops::{self, KeySource};
use crypto_driver::passphrase::{
    PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader,
};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "CRYPTO_DRIVER_LOG";

#[derive(Parser)]
#[command(name = "crypto-driver")]
#[command(version)]
#[command(about = "Password- or key-based text encryption.", long_about = None)]
struct Cli {
    /// Read the secret from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    /// Treat the secret as a 32-byte key instead of a password
    #[arg(long, global = true)]
    fixed_key: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a text file
    #[command(alias = "e")]
    Encrypt {
        /// Path to the file whose contents is to be encrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the hex envelope to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Decrypt a hex envelope file
    #[command(alias = "d")]
    Decrypt {
        /// Path to the file holding the hex envelope
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the decrypted text to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = if cli.fixed_key {
        KeySource::FixedKey
    } else {
        KeySource::Password
    };
    let mut reader = get_passphrase_reader(cli.passphrase_stdin);

    let result = match cli.command {
        Commands::Encrypt { input, output } => {
            file_ops::encrypt_file(source, &input, &output, &mut *reader)
        }
        Commands::Decrypt { input, output } => {
            file_ops::decrypt_file(source, &input, &output, &mut *reader)
        }
    };

    if let Err(e) = result {
        match e.source_error() {
            Some(cause) => eprintln!("Error: {}: {}", e, cause),
            None => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader)
    }
}
