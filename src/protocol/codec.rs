//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────────┬─────────────────────────────────────┐
//! │   Len (4)    │        UTF-8 JSON payload           │
//! └──────────────┴─────────────────────────────────────┘
//! ```
//!
//! One 4-byte big-endian length prefix, applied symmetrically on both
//! directions. Both sides of the protocol live here: the server decodes
//! requests and encodes responses, the client does the reverse.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

use super::{Request, Response};

/// Length-prefix size in bytes
pub const LEN_PREFIX_SIZE: usize = 4;

/// Maximum payload size (1 MiB)
pub const MAX_PAYLOAD_SIZE: u32 = 1024 * 1024;

/// Wire shape of a request payload
///
/// Absent fields default to empty strings, matching clients that only send
/// the fields their command uses.
#[derive(Debug, Serialize, Deserialize)]
struct RequestPayload {
    #[serde(default)]
    command: String,
    #[serde(default)]
    word: String,
    #[serde(default)]
    des: String,
}

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to a complete frame
pub fn encode_request(request: &Request) -> Vec<u8> {
    let payload = match request {
        Request::Add { word, des } => RequestPayload {
            command: "add".to_string(),
            word: word.clone(),
            des: des.clone(),
        },
        Request::Delete { word } => RequestPayload {
            command: "delete".to_string(),
            word: word.clone(),
            des: String::new(),
        },
        Request::Search { word } => RequestPayload {
            command: "search".to_string(),
            word: word.clone(),
            des: String::new(),
        },
        Request::List => RequestPayload {
            command: "list".to_string(),
            word: String::new(),
            des: String::new(),
        },
        Request::Unknown => RequestPayload {
            command: "unknown".to_string(),
            word: String::new(),
            des: String::new(),
        },
    };

    // Serializing a struct of strings cannot fail
    let bytes = serde_json::to_vec(&payload).unwrap_or_default();
    frame(&bytes)
}

/// Decode a request from a complete frame
///
/// A malformed frame or payload fails the decode; an unrecognized or
/// missing command does not, it yields [`Request::Unknown`]. Validating
/// command semantics is the handler's job.
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    parse_request_payload(&unframe(bytes)?)
}

fn parse_request_payload(payload: &[u8]) -> Result<Request> {
    let payload: RequestPayload = serde_json::from_slice(payload)
        .map_err(|e| VaultError::Serialization(format!("Invalid request payload: {}", e)))?;

    let request = match payload.command.as_str() {
        "add" => Request::Add {
            word: payload.word,
            des: payload.des,
        },
        "delete" => Request::Delete { word: payload.word },
        "search" => Request::Search { word: payload.word },
        "list" => Request::List,
        _ => Request::Unknown,
    };

    Ok(request)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to a complete frame
pub fn encode_response(response: &Response) -> Vec<u8> {
    let bytes = serde_json::to_vec(response).unwrap_or_default();
    frame(&bytes)
}

/// Decode a response from a complete frame
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    parse_response_payload(&unframe(bytes)?)
}

fn parse_response_payload(payload: &[u8]) -> Result<Response> {
    serde_json::from_slice(payload)
        .map_err(|e| VaultError::Serialization(format!("Invalid response payload: {}", e)))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete request from a stream
///
/// Blocks until a complete frame is received or an error occurs.
pub fn read_request<R: Read>(reader: &mut R) -> Result<Request> {
    let payload = read_frame(reader)?;
    parse_request_payload(&payload)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    writer.write_all(&encode_request(request))?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let payload = read_frame(reader)?;
    parse_response_payload(&payload)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Prepend the length prefix to a payload
fn frame(payload: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(LEN_PREFIX_SIZE + payload.len());
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(payload);
    message
}

/// Split a complete in-memory frame into its payload
fn unframe(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < LEN_PREFIX_SIZE {
        return Err(VaultError::Protocol(format!(
            "Incomplete frame: expected at least {} bytes, got {}",
            LEN_PREFIX_SIZE,
            bytes.len()
        )));
    }

    let payload_len =
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(VaultError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }
    if bytes.len() < LEN_PREFIX_SIZE + payload_len {
        return Err(VaultError::Protocol(format!(
            "Incomplete payload: expected {} bytes, got {}",
            LEN_PREFIX_SIZE + payload_len,
            bytes.len()
        )));
    }

    Ok(bytes[LEN_PREFIX_SIZE..LEN_PREFIX_SIZE + payload_len].to_vec())
}

/// Read one length-prefixed payload off a stream
fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut prefix = [0u8; LEN_PREFIX_SIZE];
    reader.read_exact(&mut prefix)?;

    let payload_len = u32::from_be_bytes(prefix);
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(VaultError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let mut payload = vec![0u8; payload_len as usize];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(payload)
}
