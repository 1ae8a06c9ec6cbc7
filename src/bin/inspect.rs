//! keyspan Inspect Binary
//!
//! Encodes namespace prefixes and decodes stored keys from the command line.

use std::fmt::Write;

use clap::{Parser, Subcommand};
use keyspan::{encode_prefix, extract_prefix, NamespaceId, PrefixRange};
use tracing_subscriber::{fmt, EnvFilter};

/// keyspan key inspector
#[derive(Parser, Debug)]
#[command(name = "keyspan-inspect")]
#[command(about = "Inspect namespace-prefixed keys")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the prefix of a namespace id
    Encode {
        /// Namespace id (0..=4294967295)
        id: u32,
    },

    /// Split a hex-encoded stored key into namespace and remainder
    Decode {
        /// Stored key as hex, e.g. 000000054142
        key: String,
    },

    /// Print the key range owned by a namespace
    Range {
        /// Namespace id
        id: u32,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,keyspan=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("keyspan-inspect v{}", keyspan::VERSION);

    match args.command {
        Commands::Encode { id } => {
            let prefix = encode_prefix(NamespaceId::new(id));
            println!("{}", to_hex(prefix.as_bytes()));
        }
        Commands::Decode { key } => {
            let bytes = match parse_hex(&key) {
                Some(bytes) => bytes,
                None => {
                    tracing::error!("Not a hex string: {}", key);
                    std::process::exit(2);
                }
            };

            match extract_prefix(&bytes) {
                Some((namespace, rest)) => {
                    println!("namespace: {}", namespace);
                    println!("remainder: {}", to_hex(rest));
                }
                None => {
                    tracing::error!("Key too short for a namespace prefix ({} bytes)", bytes.len());
                    std::process::exit(1);
                }
            }
        }
        Commands::Range { id } => {
            let range = PrefixRange::of(NamespaceId::new(id));
            let upper = range
                .upper_bound()
                .map(to_hex)
                .unwrap_or_else(|| "(unbounded)".to_string());
            println!("[{}, {})", to_hex(range.lower_bound()), upper);
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let text = text.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    if text.len() % 2 != 0 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}
