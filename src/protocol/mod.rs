//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: GET      - Payload: key_len (4) + key
//! - 0x02: PUT      - Payload: key_len (4) + key + value (staged)
//! - 0x03: DEL      - Payload: key_len (4) + key
//! - 0x04: PING     - Payload: empty
//! - 0x05: BEGIN    - Payload: empty
//! - 0x06: COMMIT   - Payload: empty
//! - 0x07: ROLLBACK - Payload: empty
//! - 0x08: PERSIST  - Payload: empty
//! - 0x09: SET      - Payload: key_len (4) + key + value (auto-commit)
//!
//! Keys and values are UTF-8.
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: NOT_FOUND
//! - 0x02: ERROR

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
