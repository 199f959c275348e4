//! The HTML token model and the tokenizer that produces it.

pub mod tokenizer;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTag {
    /// Lower-cased tag name.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag(StartTag),
    EndTag { name: String },
    /// A single character of text.
    Text(char),
    EndOfInput,
}

/// Something that consumes the tokens the tokenizer emits.
pub trait TokenSink {
    fn process_token(&mut self, token: Token) -> Result<(), Error>;
}

/// Collects tokens, mostly useful to inspect the tokenizer output.
impl TokenSink for Vec<Token> {
    fn process_token(&mut self, token: Token) -> Result<(), Error> {
        self.push(token);
        Ok(())
    }
}
