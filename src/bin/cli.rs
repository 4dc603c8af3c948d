//! WordVault CLI Client
//!
//! Scriptable client for a WordVault server: sends one request over a
//! fresh connection, prints the outcome, and exits with the result flag.

use std::net::TcpStream;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use wordvault::protocol::{read_response, write_request, Request, Response};
use wordvault::Result;

/// WordVault CLI
#[derive(Parser, Debug)]
#[command(name = "wordvault-cli")]
#[command(about = "CLI client for the WordVault dictionary server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a word with its description
    Add {
        /// The word to add
        word: String,

        /// The description
        des: String,
    },

    /// Delete a word
    Delete {
        /// The word to delete
        word: String,
    },

    /// Search for a word's description
    Search {
        /// The word to look up
        word: String,
    },

    /// List every word in the store
    List,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let request = match args.command {
        Commands::Add { word, des } => Request::Add { word, des },
        Commands::Delete { word } => Request::Delete { word },
        Commands::Search { word } => Request::Search { word },
        Commands::List => Request::List,
    };

    match roundtrip(&args.server, &request) {
        Ok(response) => {
            println!("{}", response.message);
            if response.result {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Connect failed, please check server address and port. ({})", e);
            ExitCode::FAILURE
        }
    }
}

/// One request, one response, over a fresh connection
fn roundtrip(server: &str, request: &Request) -> Result<Response> {
    let mut stream = TcpStream::connect(server)?;
    write_request(&mut stream, request)?;
    read_response(&mut stream)
}
