//! Request Handler
//!
//! Maps a decoded request to a store operation and builds the response,
//! independent of transport. Owns the command vocabulary, the per-command
//! validation rules, and the outcome message table.

use std::sync::Arc;

use crate::error::VaultError;
use crate::protocol::{Request, Response};
use crate::store::{normalize_word, Dictionary};

/// Outcome messages shown to clients
pub mod messages {
    pub const WORD_EXISTS: &str = "Add word failed: word already exists";
    pub const ADD_WORD_SUCCEEDED: &str = "Add word succeeded.";
    pub const ADD_WORD_FAILED: &str = "Add word failed: unknown reason.";
    pub const WORD_NOT_EXISTS: &str = "Delete word failed: word doesn't exists";
    pub const DELETE_WORD_SUCCEEDED: &str = "Delete word succeeded.";
    pub const DELETE_WORD_FAILED: &str = "Delete word failed: unknown reason.";
    pub const SEARCH_NOT_EXISTS: &str = "Search word failed: word doesn't exists";
    pub const INVALID_REQUEST: &str = "Error occurred.";
    pub const WORD_EMPTY: &str = "Please input word.";
    pub const DES_EMPTY: &str = "Please input description.";
}

/// Stateless command dispatcher over a shared dictionary
#[derive(Clone)]
pub struct RequestHandler {
    store: Arc<Dictionary>,
}

impl RequestHandler {
    /// Create a handler over the given store
    pub fn new(store: Arc<Dictionary>) -> Self {
        Self { store }
    }

    /// Handle one request and build its response
    ///
    /// Never fails: every outcome, including domain and persistence
    /// failures, becomes a response with `result` and `message` set.
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Add { word, des } => self.handle_add(&word, &des),
            Request::Delete { word } => self.handle_delete(&word),
            Request::Search { word } => self.handle_search(&word),
            Request::List => self.handle_list(),
            Request::Unknown => Response::invalid(),
        }
    }

    fn handle_add(&self, word: &str, des: &str) -> Response {
        let word = normalize_word(word);
        let des = des.trim();
        if word.is_empty() {
            return Response::fail("add", messages::WORD_EMPTY);
        }
        if des.is_empty() {
            return Response::fail("add", messages::DES_EMPTY);
        }

        match self.store.add(&word, des) {
            Ok(()) => Response::ok("add", messages::ADD_WORD_SUCCEEDED),
            Err(VaultError::WordExists) => Response::fail("add", messages::WORD_EXISTS),
            Err(e) => {
                tracing::warn!("Add failed for '{}': {}", word, e);
                Response::fail("add", messages::ADD_WORD_FAILED)
            }
        }
    }

    fn handle_delete(&self, word: &str) -> Response {
        let word = normalize_word(word);
        if word.is_empty() {
            return Response::fail("delete", messages::WORD_EMPTY);
        }

        match self.store.delete(&word) {
            Ok(()) => Response::ok("delete", messages::DELETE_WORD_SUCCEEDED),
            Err(VaultError::WordNotFound) => Response::fail("delete", messages::WORD_NOT_EXISTS),
            Err(e) => {
                tracing::warn!("Delete failed for '{}': {}", word, e);
                Response::fail("delete", messages::DELETE_WORD_FAILED)
            }
        }
    }

    fn handle_search(&self, word: &str) -> Response {
        let word = normalize_word(word);
        if word.is_empty() {
            return Response::fail("search", messages::WORD_EMPTY);
        }

        match self.store.search(&word) {
            Ok(des) => Response::search_hit(&word, des),
            Err(_) => Response::fail("search", messages::SEARCH_NOT_EXISTS),
        }
    }

    fn handle_list(&self) -> Response {
        let words = self.store.list();

        // Exact legacy format: count, then each word with a trailing space
        let mut message = format!("{} word(s): ", words.len());
        for word in &words {
            message.push_str(word);
            message.push(' ');
        }

        Response::ok("list", message)
    }
}
