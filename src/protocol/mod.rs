//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (length-prefixed JSON)
//!
//! Each connection carries exactly one request frame and one response
//! frame, then closes.
//!
//! ```text
//! ┌──────────────┬─────────────────────────────────────┐
//! │   Len (4)    │        UTF-8 JSON payload           │
//! └──────────────┴─────────────────────────────────────┘
//! ```
//!
//! ### Request payload
//! ```json
//! {"command": "add" | "delete" | "search" | "list", "word": "...", "des": "..."}
//! ```
//! Fields not applicable to a command may be empty or absent. A missing or
//! unrecognized command decodes to [`Request::Unknown`] rather than a decode
//! failure; command semantics are the handler's business.
//!
//! ### Response payload
//! ```json
//! {"command": "...", "result": true, "message": "...", "des": "..."}
//! ```
//! `des` is present only on a successful search.

mod command;
mod response;
mod codec;

pub use command::Request;
pub use response::Response;
pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, LEN_PREFIX_SIZE, MAX_PAYLOAD_SIZE,
};
