//! Error types for the rendering pipeline.
//!
//! Each stage has its own error enum, and `Error` unifies them so that a
//! caller driving the whole pipeline can match on the stage that failed.

use crate::html::tokenizer::State;
use std::io;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A malformed character sequence at the HTML character level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// A character that can't appear in the current tokenizer state.
    #[error("unexpected character {found:?} in {state:?} state")]
    UnexpectedCharacter { state: State, found: char },

    /// The input ended in the middle of a tag.
    #[error("unexpected end of input in {state:?} state")]
    UnexpectedEndOfInput { state: State },

    /// An `=` sign without a preceding attribute name.
    #[error("attribute value without an attribute name")]
    MissingAttributeName,

    /// A NUL character inside an attribute value.
    #[error("NUL character in attribute value")]
    NulInAttributeValue,
}

/// The token stream doesn't describe a well-nested tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An end tag that doesn't close the current element.
    #[error("end tag </{found}> doesn't match the open element {expected:?}")]
    MismatchedEndTag {
        /// The tag name of the current element, if any element is open.
        expected: Option<String>,
        found: String,
    },

    /// The input ended with elements still open.
    #[error("end of input with unclosed elements: {open:?}")]
    UnclosedElements { open: Vec<String> },
}

/// The HTTP response couldn't be finalized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The status line doesn't match `HTTP/1.1 <code> <text>`.
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    /// The response was requested before the body was complete.
    #[error("response requested before it was complete")]
    Incomplete,
}

/// Errors that can occur while turning bytes into a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A failure reading from the transport. Never retried.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}
