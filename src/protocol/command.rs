//! Request definitions
//!
//! Represents requests from clients. Word and description fields carry the
//! raw strings off the wire; trimming and case-normalization happen in the
//! handler and store, not here.

/// A parsed client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Add a word with its description
    Add { word: String, des: String },

    /// Delete a word
    Delete { word: String },

    /// Search for a word's description
    Search { word: String },

    /// List every word in the store
    List,

    /// Anything with a missing or unrecognized command
    Unknown,
}

impl Request {
    /// The command name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Request::Add { .. } => "add",
            Request::Delete { .. } => "delete",
            Request::Search { .. } => "search",
            Request::List => "list",
            Request::Unknown => "unknown",
        }
    }

    /// The word argument, if the command carries one
    pub fn word(&self) -> Option<&str> {
        match self {
            Request::Add { word, .. } | Request::Delete { word } | Request::Search { word } => {
                Some(word)
            }
            Request::List | Request::Unknown => None,
        }
    }
}
