//! Command definitions
//!
//! Represents commands from clients.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Get = 0x01,
    Put = 0x02,
    Delete = 0x03,
    Ping = 0x04,
    Begin = 0x05,
    Commit = 0x06,
    Rollback = 0x07,
    Persist = 0x08,
    Set = 0x09,
}

impl CommandType {
    /// Parse a command type byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(CommandType::Get),
            0x02 => Some(CommandType::Put),
            0x03 => Some(CommandType::Delete),
            0x04 => Some(CommandType::Ping),
            0x05 => Some(CommandType::Begin),
            0x06 => Some(CommandType::Commit),
            0x07 => Some(CommandType::Rollback),
            0x08 => Some(CommandType::Persist),
            0x09 => Some(CommandType::Set),
            _ => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a committed value by key
    Get { key: String },

    /// Stage a key-value pair in the active transaction
    Put { key: String, value: String },

    /// Delete a key immediately
    Delete { key: String },

    /// Ping (health check)
    Ping,

    /// Open the transaction slot
    Begin,

    /// Commit the active transaction
    Commit,

    /// Roll back the active transaction
    Rollback,

    /// Write the snapshot file
    Persist,

    /// Put in a transaction of its own (begin, put, commit)
    Set { key: String, value: String },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Put { .. } => CommandType::Put,
            Command::Delete { .. } => CommandType::Delete,
            Command::Ping => CommandType::Ping,
            Command::Begin => CommandType::Begin,
            Command::Commit => CommandType::Commit,
            Command::Rollback => CommandType::Rollback,
            Command::Persist => CommandType::Persist,
            Command::Set { .. } => CommandType::Set,
        }
    }
}
