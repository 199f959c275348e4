//! Builds a `Document` out of a token stream, styling elements as they are
//! created and laying out flex containers as they are closed.

use super::{Document, ElementData, NodeData, NodeId};
use crate::css::CssEngine;
use crate::error::{Error, TreeError};
use crate::html::{StartTag, Token, TokenSink};
use crate::layout;
use crate::style::ResolvedStyle;

#[derive(Debug)]
pub struct TreeBuilder {
    document: Document,
    /// Never empty: the document root stays at the bottom.
    open_elements: Vec<NodeId>,
    /// The text node that text tokens are appended to, if the last token was
    /// text.
    current_text: Option<NodeId>,
    css: CssEngine,
    finished: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let document = Document::new();
        let root = document.root();
        Self {
            document,
            open_elements: vec![root],
            current_text: None,
            css: CssEngine::new(),
            finished: false,
        }
    }

    /// Creates a builder whose rules start with a user-agent style sheet.
    pub fn with_user_agent_stylesheet(css: &str) -> Self {
        let mut builder = Self::new();
        builder.css.ingest(css);
        builder
    }

    pub fn css(&self) -> &CssEngine {
        &self.css
    }

    /// The number of open elements, the document root included.
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    fn current_node(&self) -> NodeId {
        // The root is never popped, so the stack can't be empty.
        self.open_elements[self.open_elements.len() - 1]
    }

    fn insert_element(&mut self, tag: StartTag) {
        let mut element = ElementData::new(tag.name, tag.attributes);
        {
            let ancestors = self
                .open_elements
                .iter()
                .rev()
                .filter_map(|&id| self.document.element(id))
                .collect::<Vec<_>>();
            element.computed_style = self.css.compute_style(&element, &ancestors);
        }
        element.resolved_style = ResolvedStyle::from_computed(&element.computed_style);
        trace!("<{}> cascaded to {:?}", element.name, element.computed_style);

        let parent = self.current_node();
        let id = self.document.append(parent, NodeData::Element(element));
        if !tag.self_closing {
            self.open_elements.push(id);
        }
    }

    fn close_element(&mut self, name: String) -> Result<(), TreeError> {
        let current = self.current_node();
        let is_match = match self.document.element(current) {
            Some(element) => element.name == name,
            None => false,
        };
        if !is_match {
            return Err(TreeError::MismatchedEndTag {
                expected: self.document.element(current).map(|e| e.name.clone()),
                found: name,
            });
        }

        if name == "style" {
            let css = self.document.text_content(current);
            self.css.ingest(&css);
        }
        layout::layout_node(&mut self.document, current);
        self.open_elements.pop();
        Ok(())
    }

    fn insert_character(&mut self, c: char) {
        let id = match self.current_text {
            Some(id) => id,
            None => {
                let parent = self.current_node();
                let id = self.document.append(parent, NodeData::Text(String::new()));
                self.current_text = Some(id);
                id
            }
        };
        if let NodeData::Text(ref mut text) = self.document[id].data {
            text.push(c);
        }
    }

    fn finish(&mut self) -> Result<(), TreeError> {
        if self.depth() != 1 {
            let open = self.open_elements[1..]
                .iter()
                .filter_map(|&id| self.document.element(id))
                .map(|e| e.name.clone())
                .collect();
            return Err(TreeError::UnclosedElements { open });
        }
        debug!("Document built with {} nodes", self.document.len());
        self.finished = true;
        Ok(())
    }
}

impl TokenSink for TreeBuilder {
    fn process_token(&mut self, token: Token) -> Result<(), Error> {
        if self.finished {
            warn!("Ignoring {:?} after the end of input", token);
            return Ok(());
        }
        trace!("Processing {:?}", token);

        if !matches!(token, Token::Text(..)) {
            self.current_text = None;
        }

        match token {
            Token::Text(c) => self.insert_character(c),
            Token::StartTag(tag) => self.insert_element(tag),
            Token::EndTag { name } => self.close_element(name)?,
            Token::EndOfInput => self.finish()?,
        }
        Ok(())
    }
}
