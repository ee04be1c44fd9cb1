//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, SlateError};
use crate::protocol::{read_command, write_response, Command, Response};
use crate::store::{RollbackOutcome, Store};

use super::ShutdownHandle;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Shared store
    store: Arc<Store>,

    /// Snapshot file targeted by PERSIST
    data_file: PathBuf,

    /// Server-wide stop signal
    shutdown: ShutdownHandle,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O
    pub fn new(
        stream: TcpStream,
        store: Arc<Store>,
        data_file: PathBuf,
        shutdown: ShutdownHandle,
    ) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            store,
            data_file,
            shutdown,
            peer_addr,
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads commands in a loop and sends responses.
    /// Returns when the client disconnects, the read times out, the server
    /// shuts down, or an error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        while !self.shutdown.is_shutdown() {
            let command = match read_command(&mut self.reader) {
                Ok(cmd) => cmd,
                Err(SlateError::Io(ref e)) if is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} disconnected ({:?})", self.peer_addr, e.kind());
                    return Ok(());
                }
                Err(SlateError::Io(ref e))
                    if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
                {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    let _ = write_response(&mut self.writer, &Response::error(&e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("Received command from {}: {:?}", self.peer_addr, command);

            let response = execute(&self.store, &self.data_file, command);

            if let Err(e) = write_response(&mut self.writer, &response) {
                if let SlateError::Io(ref io_err) = e {
                    if is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
    )
}

/// Execute a command against the store and build the response
///
/// Store errors become ERROR responses carrying the error text. A missing
/// key is NOT_FOUND. Rolling back with nothing open is still OK, with the
/// notice as payload.
pub fn execute(store: &Store, data_file: &Path, command: Command) -> Response {
    match command {
        Command::Get { key } => match store.get(&key) {
            Some(value) => Response::ok(Some(value.into_bytes())),
            None => Response::not_found(),
        },
        Command::Put { key, value } => result_response(store.put(&key, &value)),
        Command::Delete { key } => {
            store.delete(&key);
            Response::ok(None)
        }
        Command::Ping => Response::ok(Some(b"PONG".to_vec())),
        Command::Begin => result_response(store.begin_transaction()),
        Command::Commit => result_response(store.commit_transaction().map(|_| ())),
        Command::Rollback => {
            let outcome = store.rollback_transaction();
            let response = Response::ok(Some(outcome.message().as_bytes().to_vec()));
            if outcome == RollbackOutcome::NoActiveTransaction {
                tracing::info!("rollback answered with notice: {}", outcome.message());
            }
            response
        }
        Command::Persist => result_response(store.persist(data_file)),
        Command::Set { key, value } => result_response(set(store, &key, &value)),
    }
}

/// Single-key upsert in a transaction of its own
///
/// Each step takes the store lock separately and the slot has no owner. If
/// another caller commits or rolls back between our begin and our put, and then
/// begins again, the put lands in that caller's transaction and our commit (or
/// the rollback on failure) ends it for them.
fn set(store: &Store, key: &str, value: &str) -> Result<()> {
    store.begin_transaction()?;

    if let Err(e) = store.put(key, value) {
        store.rollback_transaction();
        return Err(e);
    }

    store.commit_transaction()?;
    Ok(())
}

fn result_response(result: Result<()>) -> Response {
    match result {
        Ok(()) => Response::ok(None),
        Err(e) => {
            if e.is_transaction_error() {
                tracing::debug!("command rejected: {}", e);
            } else {
                tracing::warn!("command failed: {}", e);
            }
            Response::error(&e.to_string())
        }
    }
}
