//! Codec Tests
//!
//! Tests for command and response encoding/decoding.

use std::io::Cursor;

use slatekv::protocol::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, Command, Response, Status,
};
use slatekv::SlateError;

// =============================================================================
// Command Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_every_command() {
    let commands = vec![
        Command::Get { key: "hello".to_string() },
        Command::Put { key: "mykey".to_string(), value: "myvalue".to_string() },
        Command::Delete { key: "todelete".to_string() },
        Command::Ping,
        Command::Begin,
        Command::Commit,
        Command::Rollback,
        Command::Persist,
        Command::Set { key: "k".to_string(), value: "v".to_string() },
    ];

    for command in commands {
        let decoded = decode_command(&encode_command(&command)).unwrap();
        assert_eq!(decoded, command);
    }
}

#[test]
fn test_encode_decode_empty_key_and_value() {
    let cmd = Command::Put {
        key: String::new(),
        value: String::new(),
    };

    let decoded = decode_command(&encode_command(&cmd)).unwrap();
    assert_eq!(decoded, cmd);
}

#[test]
fn test_encode_decode_unicode() {
    let cmd = Command::Set {
        key: "ключ".to_string(),
        value: "значение ✓".to_string(),
    };

    let decoded = decode_command(&encode_command(&cmd)).unwrap();
    assert_eq!(decoded, cmd);
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_response_ok() {
    let response = Response::ok(Some(b"value".to_vec()));
    let decoded = decode_response(&encode_response(&response)).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload_str(), Some("value"));
}

#[test]
fn test_encode_decode_response_ok_no_payload() {
    let decoded = decode_response(&encode_response(&Response::ok(None))).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_encode_decode_response_not_found() {
    let decoded = decode_response(&encode_response(&Response::not_found())).unwrap();

    assert_eq!(decoded.status, Status::NotFound);
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_encode_decode_response_error() {
    let response = Response::error("no active transaction");
    let decoded = decode_response(&encode_response(&response)).unwrap();

    assert_eq!(decoded.status, Status::Error);
    assert_eq!(decoded.payload_str(), Some("no active transaction"));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_incomplete_header() {
    let result = decode_command(&[0x01, 0x00]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_incomplete_payload() {
    // Header claims 10 bytes of payload, only 2 present
    let result = decode_command(&[0x01, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x00]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_unknown_command_type() {
    let result = decode_command(&[0xff, 0x00, 0x00, 0x00, 0x00]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_unknown_response_status() {
    let result = decode_response(&[0x09, 0x00, 0x00, 0x00, 0x00]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_get_missing_key_length() {
    let result = decode_command(&[0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_key_length_past_payload() {
    // key_len = 5, only 1 key byte follows
    let bytes = [0x03, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x05, b'a'];
    let result = decode_command(&bytes);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_get_with_trailing_bytes() {
    let bytes = [0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, b'a', b'z'];
    let result = decode_command(&bytes);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_invalid_utf8_key() {
    let bytes = [0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x02, 0xff, 0xfe];
    let result = decode_command(&bytes);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_begin_with_unexpected_payload() {
    let result = decode_command(&[0x05, 0x00, 0x00, 0x00, 0x01, 0x00]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));
}

#[test]
fn test_payload_too_large() {
    let result = decode_command(&[0x01, 0xff, 0xff, 0xff, 0xff]);
    assert!(matches!(result, Err(SlateError::Protocol(_))));

    let mut cursor = Cursor::new(vec![0x01, 0xff, 0xff, 0xff, 0xff]);
    assert!(matches!(read_command(&mut cursor), Err(SlateError::Protocol(_))));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_multiple_commands() {
    let commands = vec![
        Command::Begin,
        Command::Put { key: "a".to_string(), value: "1".to_string() },
        Command::Commit,
        Command::Get { key: "a".to_string() },
    ];

    let mut buffer = Vec::new();
    for command in &commands {
        write_command(&mut buffer, command).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &commands {
        assert_eq!(&read_command(&mut cursor).unwrap(), expected);
    }

    // Stream exhausted
    assert!(matches!(read_command(&mut cursor), Err(SlateError::Io(_))));
}

#[test]
fn test_stream_multiple_responses() {
    let responses = vec![
        Response::ok(None),
        Response::not_found(),
        Response::error("transaction already in progress"),
        Response::ok(Some(b"1".to_vec())),
    ];

    let mut buffer = Vec::new();
    for response in &responses {
        write_response(&mut buffer, response).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &responses {
        assert_eq!(&read_response(&mut cursor).unwrap(), expected);
    }
}

// =============================================================================
// Wire Format Tests
// =============================================================================

#[test]
fn test_wire_format_put() {
    let encoded = encode_command(&Command::Put {
        key: "ab".to_string(),
        value: "xyz".to_string(),
    });

    assert_eq!(
        encoded,
        vec![
            0x02, // PUT
            0x00, 0x00, 0x00, 0x09, // payload len
            0x00, 0x00, 0x00, 0x02, // key len
            b'a', b'b', b'x', b'y', b'z',
        ]
    );
}

#[test]
fn test_wire_format_rollback() {
    assert_eq!(
        encode_command(&Command::Rollback),
        vec![0x07, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn test_wire_format_response_error() {
    let encoded = encode_response(&Response::error("no"));
    assert_eq!(encoded, vec![0x02, 0x00, 0x00, 0x00, 0x02, b'n', b'o']);
}

// =============================================================================
// Response Mapping Tests
// =============================================================================

#[test]
fn test_into_text_maps_statuses() {
    assert_eq!(Response::ok(Some(b"PONG".to_vec())).into_text().unwrap(), "PONG");
    assert_eq!(Response::ok(None).into_text().unwrap(), "");

    assert!(matches!(
        Response::error("no active transaction").into_text(),
        Err(SlateError::NoActiveTransaction)
    ));
    assert!(matches!(
        Response::error("transaction already in progress").into_text(),
        Err(SlateError::TransactionAlreadyActive)
    ));
    assert!(matches!(
        Response::error("too many connections").into_text(),
        Err(SlateError::Server(ref message)) if message == "too many connections"
    ));
    assert!(matches!(
        Response::not_found().into_text(),
        Err(SlateError::Server(_))
    ));
}
