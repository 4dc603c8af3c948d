//! WordVault Server Binary
//!
//! Starts the TCP server over a dictionary file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wordvault::config::{parse_port, DEFAULT_DICTIONARY_PATH, DEFAULT_PORT};
use wordvault::observer::TracingObserver;
use wordvault::{Config, Dictionary, Server};

/// WordVault Server
#[derive(Parser, Debug)]
#[command(name = "wordvault-server")]
#[command(about = "Network-accessible word/definition store")]
#[command(version)]
struct Args {
    /// Listen port, in the range (1024, 65535]
    port: String,

    /// Dictionary file path (must parse as a dictionary)
    dictionary_file: Option<PathBuf>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wordvault=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("WordVault Server v{}", wordvault::VERSION);

    let port = match parse_port(&args.port) {
        Some(port) => port,
        None => {
            tracing::warn!(
                "port should be in range of (1024, 65535); falling back to {}",
                DEFAULT_PORT
            );
            DEFAULT_PORT
        }
    };

    let dictionary_path = resolve_dictionary_path(args.dictionary_file.as_deref());
    tracing::info!("Dictionary file: {}", dictionary_path.display());

    let config = Config::builder()
        .port(port)
        .dictionary_path(&dictionary_path)
        .build();

    // Open the store
    let store = match Dictionary::open(&dictionary_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to open dictionary: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Dictionary loaded with {} word(s)", store.len());

    // Start the server
    let server = Server::new(config, store, Arc::new(TracingObserver));
    if let Err(e) = server.start(port) {
        tracing::error!("Server failed to start: {}", e);
        std::process::exit(1);
    }

    // Block for as long as the accept loop lives
    server.wait();
    server.stop();
}

/// Pick the dictionary path: a valid caller-supplied file, else the default
///
/// A supplied path must already parse as a dictionary; the default path is
/// bootstrapped empty on first open.
fn resolve_dictionary_path(supplied: Option<&Path>) -> PathBuf {
    match supplied {
        Some(path) if Dictionary::validate_file(path) => path.to_path_buf(),
        Some(path) => {
            tracing::warn!(
                "Custom dictionary file {} is invalid, the default file is in use.",
                path.display()
            );
            PathBuf::from(DEFAULT_DICTIONARY_PATH)
        }
        None => PathBuf::from(DEFAULT_DICTIONARY_PATH),
    }
}
