//! Codec Tests
//!
//! Tests for request and response framing, encoding, and decoding.

use std::io::Cursor;

use wordvault::protocol::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, Request, Response, LEN_PREFIX_SIZE,
    MAX_PAYLOAD_SIZE,
};
use wordvault::VaultError;

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a frame around a raw JSON payload
fn frame_of(json: &str) -> Vec<u8> {
    let mut bytes = (json.len() as u32).to_be_bytes().to_vec();
    bytes.extend_from_slice(json.as_bytes());
    bytes
}

// =============================================================================
// Request Round-Trip Tests
// =============================================================================

#[test]
fn test_request_round_trip_add() {
    let request = Request::Add {
        word: "serendipity".to_string(),
        des: "a pleasant surprise".to_string(),
    };
    let decoded = decode_request(&encode_request(&request)).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn test_request_round_trip_delete() {
    let request = Request::Delete {
        word: "ephemeral".to_string(),
    };
    let decoded = decode_request(&encode_request(&request)).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn test_request_round_trip_search() {
    let request = Request::Search {
        word: "zenith".to_string(),
    };
    let decoded = decode_request(&encode_request(&request)).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn test_request_round_trip_list() {
    let decoded = decode_request(&encode_request(&Request::List)).unwrap();
    assert_eq!(decoded, Request::List);
}

#[test]
fn test_request_preserves_raw_fields() {
    // Trimming and lowercasing belong to the handler, not the codec
    let request = Request::Add {
        word: "  MixedCase  ".to_string(),
        des: " padded ".to_string(),
    };
    let decoded = decode_request(&encode_request(&request)).unwrap();
    assert_eq!(decoded, request);
}

// =============================================================================
// Request Decoding Tests
// =============================================================================

#[test]
fn test_unrecognized_command_decodes_to_unknown() {
    let bytes = frame_of(r#"{"command": "frobnicate", "word": "x", "des": "y"}"#);
    assert_eq!(decode_request(&bytes).unwrap(), Request::Unknown);
}

#[test]
fn test_missing_command_decodes_to_unknown() {
    let bytes = frame_of(r#"{"word": "x"}"#);
    assert_eq!(decode_request(&bytes).unwrap(), Request::Unknown);
}

#[test]
fn test_absent_fields_default_to_empty() {
    let bytes = frame_of(r#"{"command": "add"}"#);
    let decoded = decode_request(&bytes).unwrap();
    assert_eq!(
        decoded,
        Request::Add {
            word: String::new(),
            des: String::new(),
        }
    );
}

#[test]
fn test_extra_fields_are_ignored() {
    let bytes = frame_of(r#"{"command": "search", "word": "x", "color": "blue"}"#);
    assert_eq!(
        decode_request(&bytes).unwrap(),
        Request::Search {
            word: "x".to_string()
        }
    );
}

#[test]
fn test_malformed_json_fails_decode() {
    let bytes = frame_of("{not json");
    assert!(matches!(
        decode_request(&bytes),
        Err(VaultError::Serialization(_))
    ));
}

#[test]
fn test_truncated_header_fails_decode() {
    assert!(matches!(
        decode_request(&[0x00, 0x01]),
        Err(VaultError::Protocol(_))
    ));
}

#[test]
fn test_truncated_payload_fails_decode() {
    let mut bytes = frame_of(r#"{"command": "list"}"#);
    bytes.truncate(bytes.len() - 3);
    assert!(matches!(
        decode_request(&bytes),
        Err(VaultError::Protocol(_))
    ));
}

#[test]
fn test_oversized_payload_rejected() {
    let mut bytes = (MAX_PAYLOAD_SIZE + 1).to_be_bytes().to_vec();
    bytes.extend_from_slice(b"{}");
    assert!(matches!(
        decode_request(&bytes),
        Err(VaultError::Protocol(_))
    ));
}

// =============================================================================
// Response Round-Trip Tests
// =============================================================================

#[test]
fn test_response_round_trip_without_description() {
    let response = Response::ok("add", "Add word succeeded.");
    let decoded = decode_response(&encode_response(&response)).unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn test_response_round_trip_with_description() {
    let response = Response::search_hit("serendipity", "a pleasant surprise");
    let decoded = decode_response(&encode_response(&response)).unwrap();
    assert_eq!(decoded, response);
    assert_eq!(decoded.des.as_deref(), Some("a pleasant surprise"));
    assert_eq!(decoded.message, "serendipity : a pleasant surprise");
}

#[test]
fn test_response_omits_absent_description_on_the_wire() {
    let bytes = encode_response(&Response::fail("search", "nope"));
    let json = std::str::from_utf8(&bytes[LEN_PREFIX_SIZE..]).unwrap();
    assert!(!json.contains("\"des\""));
}

#[test]
fn test_invalid_response_shape() {
    let response = Response::invalid();
    assert_eq!(response.command, "unknown");
    assert!(!response.result);
    assert_eq!(response.message, "Error occurred.");
    assert!(response.des.is_none());
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_request_round_trip() {
    let request = Request::Add {
        word: "stream".to_string(),
        des: "flows".to_string(),
    };

    let mut buffer = Vec::new();
    write_request(&mut buffer, &request).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_request(&mut cursor).unwrap(), request);
}

#[test]
fn test_stream_response_round_trip() {
    let response = Response::ok("list", "0 word(s): ");

    let mut buffer = Vec::new();
    write_response(&mut buffer, &response).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_response(&mut cursor).unwrap(), response);
}

#[test]
fn test_stream_read_truncated_frame_is_io_error() {
    let request = Request::List;
    let mut buffer = Vec::new();
    write_request(&mut buffer, &request).unwrap();
    buffer.truncate(buffer.len() - 2);

    let mut cursor = Cursor::new(buffer);
    match read_request(&mut cursor) {
        Err(VaultError::Io(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("expected IO error, got {:?}", other),
    }
}

#[test]
fn test_stream_read_oversized_frame_rejected() {
    let mut buffer = (MAX_PAYLOAD_SIZE + 1).to_be_bytes().to_vec();
    buffer.extend_from_slice(b"{}");

    let mut cursor = Cursor::new(buffer);
    assert!(matches!(
        read_request(&mut cursor),
        Err(VaultError::Protocol(_))
    ));
}

#[test]
fn test_two_frames_back_to_back() {
    let mut buffer = Vec::new();
    write_request(&mut buffer, &Request::List).unwrap();
    write_request(
        &mut buffer,
        &Request::Delete {
            word: "second".to_string(),
        },
    )
    .unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_request(&mut cursor).unwrap(), Request::List);
    assert_eq!(
        read_request(&mut cursor).unwrap(),
        Request::Delete {
            word: "second".to_string()
        }
    );
}
