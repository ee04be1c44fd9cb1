//! TCP Client
//!
//! Blocking client used by the CLI and the integration tests.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::Result;
use crate::protocol::{read_response, write_command, Command, Response, Status};

/// Client connection to a SlateKV server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a raw command and wait for its response
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }

    /// Get a committed value (`None` when the key is absent)
    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        let response = self.send(&Command::Get { key: key.to_string() })?;
        match response.status {
            Status::NotFound => Ok(None),
            _ => response.into_text().map(Some),
        }
    }

    /// Stage a put in the active transaction
    pub fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.unit(Command::Put {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Put in a transaction of its own
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.unit(Command::Set {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.unit(Command::Delete { key: key.to_string() })
    }

    pub fn begin(&mut self) -> Result<()> {
        self.unit(Command::Begin)
    }

    pub fn commit(&mut self) -> Result<()> {
        self.unit(Command::Commit)
    }

    /// Roll back; returns the server's notice text
    pub fn rollback(&mut self) -> Result<String> {
        let response = self.send(&Command::Rollback)?;
        response.into_text()
    }

    pub fn persist(&mut self) -> Result<()> {
        self.unit(Command::Persist)
    }

    pub fn ping(&mut self) -> Result<String> {
        let response = self.send(&Command::Ping)?;
        response.into_text()
    }

    fn unit(&mut self, command: Command) -> Result<()> {
        let response = self.send(&command)?;
        response.into_text().map(|_| ())
    }
}
