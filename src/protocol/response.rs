//! Response definitions
//!
//! Server replies and their mapping back onto client-side results.

use crate::error::{Result, SlateError};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    Error = 0x02,
}

/// A reply to one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,

    /// Value for GET, notice for ROLLBACK, PONG for PING, error text for ERROR
    pub payload: Option<Vec<u8>>,
}

impl Response {
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: None,
        }
    }

    /// ERROR carrying the message as UTF-8
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Payload as UTF-8 text, if any
    pub fn payload_str(&self) -> Option<&str> {
        self.payload
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Text payload of an OK reply, or the error the reply stands for
    ///
    /// Transaction errors come back typed; any other ERROR text becomes
    /// `SlateError::Server`. An OK reply without payload yields `""`.
    pub fn into_text(self) -> Result<String> {
        let text = self.payload_str().unwrap_or_default().to_string();

        match self.status {
            Status::Ok => Ok(text),
            Status::NotFound => Err(SlateError::Server("not found".to_string())),
            Status::Error => Err(error_from_message(text)),
        }
    }
}

/// Map well-known server messages back onto typed errors
fn error_from_message(message: String) -> SlateError {
    if message == SlateError::NoActiveTransaction.to_string() {
        SlateError::NoActiveTransaction
    } else if message == SlateError::TransactionAlreadyActive.to_string() {
        SlateError::TransactionAlreadyActive
    } else {
        SlateError::Server(message)
    }
}
