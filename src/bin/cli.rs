//! SlateKV CLI Client
//!
//! Command-line interface for interacting with SlateKV.
//!
//! The transaction slot lives on the server, so `begin`, `put`, and `commit`
//! may be issued as separate invocations.

use clap::{Parser, Subcommand};
use slatekv::network::Client;
use slatekv::Result;

/// SlateKV CLI
#[derive(Parser, Debug)]
#[command(name = "slatekv-cli")]
#[command(about = "CLI for SlateKV key-value store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Stage a key-value pair in the active transaction
    Put {
        key: String,
        value: String,
    },

    /// Set a key-value pair in its own transaction
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Begin a transaction
    Begin,

    /// Commit the active transaction
    Commit,

    /// Roll back the active transaction
    Rollback,

    /// Write the snapshot file on the server
    Persist,

    /// Ping the server
    Ping,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("(error) {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut client = Client::connect(&args.server)?;

    match args.command {
        Commands::Get { key } => match client.get(&key)? {
            Some(value) => println!("{}", value),
            None => println!("(nil)"),
        },
        Commands::Put { key, value } => {
            client.put(&key, &value)?;
            println!("STAGED");
        }
        Commands::Set { key, value } => {
            client.set(&key, &value)?;
            println!("OK");
        }
        Commands::Del { key } => {
            client.delete(&key)?;
            println!("OK");
        }
        Commands::Begin => {
            client.begin()?;
            println!("OK");
        }
        Commands::Commit => {
            client.commit()?;
            println!("OK");
        }
        Commands::Rollback => println!("{}", client.rollback()?),
        Commands::Persist => {
            client.persist()?;
            println!("OK");
        }
        Commands::Ping => println!("{}", client.ping()?),
    }

    Ok(())
}
