//! A small HTML tokenizer.
//!
//! This follows the shape of the HTML tokenization state machine, but only
//! for the states we need: text, start and end tags, and attributes with
//! quoted or unquoted values. There are no comments, doctypes, character
//! references or raw text elements.
//!
//! Input can be fed in any number of pieces; the end of the input is
//! signaled separately with `end()`.

use super::{Attribute, StartTag, Token, TokenSink};
use crate::error::{Error, TokenizeError};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Input {
    Char(char),
    EndOfInput,
}

/// Whether the current input has been consumed, or needs to be processed
/// again in the new state.
enum Step {
    Consumed,
    Reconsume,
}

/// The tag being built.
#[derive(Debug)]
enum PendingTag {
    Start(StartTag),
    End { name: String },
}

impl PendingTag {
    fn name(&self) -> &str {
        match *self {
            PendingTag::Start(ref tag) => &tag.name,
            PendingTag::End { ref name } => name,
        }
    }

    fn name_mut(&mut self) -> &mut String {
        match *self {
            PendingTag::Start(ref mut tag) => &mut tag.name,
            PendingTag::End { ref mut name } => name,
        }
    }
}

fn is_ascii_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Tab, line feed, form feed and space.
fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | ' ')
}

#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    tag: Option<PendingTag>,
    attribute: Option<Attribute>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: State::Data,
            tag: None,
            attribute: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Tokenizes a piece of the document.
    pub fn feed<S: TokenSink>(&mut self, input: &str, sink: &mut S) -> Result<(), Error> {
        for c in input.chars() {
            self.consume(Input::Char(c), sink)?;
        }
        Ok(())
    }

    /// Signals the end of the document.
    pub fn end<S: TokenSink>(&mut self, sink: &mut S) -> Result<(), Error> {
        self.consume(Input::EndOfInput, sink)
    }

    fn consume<S: TokenSink>(&mut self, input: Input, sink: &mut S) -> Result<(), Error> {
        loop {
            match self.step(input, sink)? {
                Step::Consumed => return Ok(()),
                Step::Reconsume => continue,
            }
        }
    }

    fn unexpected(&self, input: Input) -> TokenizeError {
        match input {
            Input::Char(found) => TokenizeError::UnexpectedCharacter {
                state: self.state,
                found,
            },
            Input::EndOfInput => TokenizeError::UnexpectedEndOfInput { state: self.state },
        }
    }

    fn reconsume_in(&mut self, state: State) -> Step {
        self.state = state;
        Step::Reconsume
    }

    fn push_to_tag_name(&mut self, c: char) {
        if let Some(ref mut tag) = self.tag {
            tag.name_mut().push(c.to_ascii_lowercase());
        }
    }

    fn start_attribute(&mut self) {
        self.commit_attribute();
        self.attribute = Some(Attribute::new(String::new(), String::new()));
    }

    fn push_to_attribute_name(&mut self, c: char) {
        if let Some(ref mut attribute) = self.attribute {
            attribute.name.push(c.to_ascii_lowercase());
        }
    }

    fn push_to_attribute_value(&mut self, c: char) {
        if let Some(ref mut attribute) = self.attribute {
            attribute.value.push(c);
        }
    }

    /// Moves the pending attribute into the pending start tag. End tags and
    /// duplicate names drop it.
    fn commit_attribute(&mut self) {
        let attribute = match self.attribute.take() {
            Some(a) => a,
            None => return,
        };
        match self.tag {
            Some(PendingTag::Start(ref mut tag)) => {
                if tag.attributes.iter().any(|a| a.name == attribute.name) {
                    debug!("Dropping duplicate attribute {:?}", attribute.name);
                    return;
                }
                tag.attributes.push(attribute);
            }
            Some(PendingTag::End { .. }) | None => {}
        }
    }

    fn set_self_closing(&mut self) {
        if let Some(PendingTag::Start(ref mut tag)) = self.tag {
            tag.self_closing = true;
        }
    }

    fn emit_tag<S: TokenSink>(&mut self, sink: &mut S) -> Result<Step, Error> {
        self.commit_attribute();
        self.state = State::Data;
        let token = match self.tag.take() {
            Some(PendingTag::Start(tag)) => Token::StartTag(tag),
            Some(PendingTag::End { name }) => Token::EndTag { name },
            None => return Ok(Step::Consumed),
        };
        trace!("Emitting {:?}", token);
        sink.process_token(token)?;
        Ok(Step::Consumed)
    }

    /// The input ended inside an attribute value. The attribute and its tag
    /// are dropped, and the end of input is processed as text data.
    fn abandon_tag(&mut self) -> Step {
        warn!(
            "End of input in {:?}, dropping <{}>",
            self.state,
            self.tag.as_ref().map_or("", PendingTag::name),
        );
        self.attribute = None;
        self.tag = None;
        self.reconsume_in(State::Data)
    }

    fn step<S: TokenSink>(&mut self, input: Input, sink: &mut S) -> Result<Step, Error> {
        use self::Input::*;

        let step = match (self.state, input) {
            (State::Data, Char('<')) => {
                self.state = State::TagOpen;
                Step::Consumed
            }
            (State::Data, Char(c)) => {
                sink.process_token(Token::Text(c))?;
                Step::Consumed
            }
            (State::Data, EndOfInput) => {
                trace!("Emitting EndOfInput");
                sink.process_token(Token::EndOfInput)?;
                Step::Consumed
            }

            (State::TagOpen, Char('/')) => {
                self.state = State::EndTagOpen;
                Step::Consumed
            }
            (State::TagOpen, Char(c)) if is_ascii_letter(c) => {
                self.tag = Some(PendingTag::Start(StartTag::default()));
                self.reconsume_in(State::TagName)
            }
            (State::TagOpen, _) => return Err(self.unexpected(input).into()),

            (State::EndTagOpen, Char(c)) if is_ascii_letter(c) => {
                self.tag = Some(PendingTag::End {
                    name: String::new(),
                });
                self.reconsume_in(State::TagName)
            }
            (State::EndTagOpen, _) => return Err(self.unexpected(input).into()),

            (State::TagName, Char(c)) if is_whitespace(c) => {
                self.state = State::BeforeAttributeName;
                Step::Consumed
            }
            (State::TagName, Char('/')) => {
                self.state = State::SelfClosingStartTag;
                Step::Consumed
            }
            (State::TagName, Char('>')) => return self.emit_tag(sink),
            (State::TagName, Char(c)) => {
                self.push_to_tag_name(c);
                Step::Consumed
            }
            (State::TagName, EndOfInput) => return Err(self.unexpected(input).into()),

            (State::BeforeAttributeName, Char(c)) if is_whitespace(c) => Step::Consumed,
            (State::BeforeAttributeName, Char('/'))
            | (State::BeforeAttributeName, Char('>'))
            | (State::BeforeAttributeName, EndOfInput) => {
                self.reconsume_in(State::AfterAttributeName)
            }
            (State::BeforeAttributeName, Char('=')) => {
                return Err(TokenizeError::MissingAttributeName.into())
            }
            (State::BeforeAttributeName, Char(_)) => {
                self.start_attribute();
                self.reconsume_in(State::AttributeName)
            }

            (State::AttributeName, Char(c)) if is_whitespace(c) || c == '/' || c == '>' => {
                self.reconsume_in(State::AfterAttributeName)
            }
            (State::AttributeName, EndOfInput) => self.reconsume_in(State::AfterAttributeName),
            (State::AttributeName, Char('=')) => {
                self.state = State::BeforeAttributeValue;
                Step::Consumed
            }
            (State::AttributeName, Char(c)) => {
                self.push_to_attribute_name(c);
                Step::Consumed
            }

            (State::AfterAttributeName, Char(c)) if is_whitespace(c) => Step::Consumed,
            (State::AfterAttributeName, Char('/')) => {
                self.commit_attribute();
                self.state = State::SelfClosingStartTag;
                Step::Consumed
            }
            (State::AfterAttributeName, Char('=')) => {
                if self.attribute.is_none() {
                    return Err(TokenizeError::MissingAttributeName.into());
                }
                self.state = State::BeforeAttributeValue;
                Step::Consumed
            }
            (State::AfterAttributeName, Char('>')) => return self.emit_tag(sink),
            (State::AfterAttributeName, EndOfInput) => {
                return Err(self.unexpected(input).into())
            }
            (State::AfterAttributeName, Char(_)) => {
                self.start_attribute();
                self.reconsume_in(State::AttributeName)
            }

            (State::BeforeAttributeValue, Char(c)) if is_whitespace(c) => Step::Consumed,
            (State::BeforeAttributeValue, Char('"')) => {
                self.state = State::AttributeValueDoubleQuoted;
                Step::Consumed
            }
            (State::BeforeAttributeValue, Char('\'')) => {
                self.state = State::AttributeValueSingleQuoted;
                Step::Consumed
            }
            (State::BeforeAttributeValue, Char('>')) => return self.emit_tag(sink),
            (State::BeforeAttributeValue, EndOfInput) => {
                return Err(self.unexpected(input).into())
            }
            (State::BeforeAttributeValue, Char(_)) => {
                self.reconsume_in(State::AttributeValueUnquoted)
            }

            (State::AttributeValueDoubleQuoted, Char('"'))
            | (State::AttributeValueSingleQuoted, Char('\'')) => {
                self.commit_attribute();
                self.state = State::AfterAttributeValueQuoted;
                Step::Consumed
            }
            (State::AttributeValueDoubleQuoted, Char('\0'))
            | (State::AttributeValueSingleQuoted, Char('\0'))
            | (State::AttributeValueUnquoted, Char('\0')) => {
                return Err(TokenizeError::NulInAttributeValue.into())
            }
            (State::AttributeValueDoubleQuoted, EndOfInput)
            | (State::AttributeValueSingleQuoted, EndOfInput)
            | (State::AttributeValueUnquoted, EndOfInput)
            | (State::AfterAttributeValueQuoted, EndOfInput) => self.abandon_tag(),
            (State::AttributeValueDoubleQuoted, Char(c))
            | (State::AttributeValueSingleQuoted, Char(c)) => {
                self.push_to_attribute_value(c);
                Step::Consumed
            }

            (State::AttributeValueUnquoted, Char(c)) if is_whitespace(c) => {
                self.commit_attribute();
                self.state = State::BeforeAttributeName;
                Step::Consumed
            }
            (State::AttributeValueUnquoted, Char('>')) => return self.emit_tag(sink),
            (State::AttributeValueUnquoted, Char(c)) => {
                self.push_to_attribute_value(c);
                Step::Consumed
            }

            (State::AfterAttributeValueQuoted, Char(c)) if is_whitespace(c) => {
                self.state = State::BeforeAttributeName;
                Step::Consumed
            }
            (State::AfterAttributeValueQuoted, Char('/')) => {
                self.state = State::SelfClosingStartTag;
                Step::Consumed
            }
            (State::AfterAttributeValueQuoted, Char('>')) => return self.emit_tag(sink),
            (State::AfterAttributeValueQuoted, Char(_)) => {
                self.reconsume_in(State::BeforeAttributeName)
            }

            (State::SelfClosingStartTag, Char('>')) => {
                self.set_self_closing();
                return self.emit_tag(sink);
            }
            (State::SelfClosingStartTag, _) => return Err(self.unexpected(input).into()),
        };

        Ok(step)
    }
}
