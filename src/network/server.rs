//! TCP Server
//!
//! Accepts connections and runs each one on its own scoped thread.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Result, SlateError};
use crate::protocol::{write_response, Response};
use crate::store::Store;

use super::Connection;

/// How long the accept loop sleeps when no connection is waiting
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Cloneable stop signal for a running server
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Ask the server to stop accepting and wind down connections
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// TCP server for SlateKV
pub struct Server {
    config: Config,
    store: Arc<Store>,
    listener: TcpListener,
    shutdown: ShutdownHandle,

    /// Connections currently being served
    active: Arc<AtomicUsize>,
}

impl Server {
    /// Bind the listen address from the config
    pub fn bind(config: Config, store: Arc<Store>) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            SlateError::Network(format!("failed to bind {}: {}", config.listen_addr, e))
        })?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            store,
            listener,
            shutdown: ShutdownHandle::default(),
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle that stops `run` from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Number of connections currently being served
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Serve until shutdown is signalled (blocking)
    ///
    /// Returns only after every connection thread has finished.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        crossbeam::thread::scope(|scope| {
            while !self.shutdown.is_shutdown() {
                match self.listener.accept() {
                    Ok((stream, peer)) => {
                        if let Err(e) = self.dispatch(scope, stream) {
                            tracing::warn!("Failed to set up connection from {}: {}", peer, e);
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::WouldBlock => {
                        thread::sleep(ACCEPT_POLL_INTERVAL);
                    }
                    Err(e) => {
                        tracing::warn!("Accept failed: {}", e);
                        thread::sleep(ACCEPT_POLL_INTERVAL);
                    }
                }
            }

            tracing::info!(
                "Shutdown requested, waiting for {} connection(s)",
                self.active_connections()
            );
        })
        .map_err(|_| SlateError::Network("connection thread panicked".to_string()))?;

        Ok(())
    }

    /// Serve until shutdown, then write the snapshot if configured to
    ///
    /// A failed final persist is returned even when serving ended cleanly.
    pub fn run_to_completion(&self) -> Result<()> {
        let served = self.run();

        if self.config.persist_on_shutdown {
            self.store.persist(&self.config.data_file)?;
        }

        served
    }

    /// Hand an accepted stream to a new scoped thread, or turn it away
    fn dispatch<'env>(
        &self,
        scope: &crossbeam::thread::Scope<'env>,
        stream: TcpStream,
    ) -> Result<()> {
        // Accepted sockets may inherit the listener's non-blocking mode
        stream.set_nonblocking(false)?;

        if self.active.load(Ordering::Acquire) >= self.config.max_connections {
            tracing::warn!(
                "Rejecting connection: {} connections already active",
                self.config.max_connections
            );
            let mut stream = stream;
            let _ = write_response(&mut stream, &Response::error("too many connections"));
            return Ok(());
        }

        let mut connection = Connection::new(
            stream,
            Arc::clone(&self.store),
            self.config.data_file.clone(),
            self.shutdown.clone(),
        )?;
        connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)?;

        let slot = ConnectionSlot::acquire(Arc::clone(&self.active));
        scope.spawn(move |_| {
            let _slot = slot;
            if let Err(e) = connection.handle() {
                tracing::debug!("Connection {} ended with error: {}", connection.peer_addr(), e);
            }
        });

        Ok(())
    }
}

/// Counts a live connection for as long as it is held
struct ConnectionSlot {
    active: Arc<AtomicUsize>,
}

impl ConnectionSlot {
    fn acquire(active: Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self { active }
    }
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}
