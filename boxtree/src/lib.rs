#[macro_use]
extern crate boxtree_derive;
#[macro_use]
extern crate log;

pub mod allocator;
pub mod css;
pub mod dom;
pub mod error;
pub mod html;
pub mod http;
pub mod layout;
mod misc;
pub mod style;

pub use app_units::Au;
pub use error::{Error, Result};

use dom::builder::TreeBuilder;
use dom::Document;
use html::tokenizer::Tokenizer;
use http::HttpResponseParser;
use std::io::{self, Read};

/// Configuration of a parse.
#[derive(Debug, Clone)]
pub struct Options {
    /// A style sheet whose rules apply before the ones of the document.
    pub user_agent_stylesheet: Option<String>,
    /// The size of the reads `render_response` does from its transport.
    pub read_buffer_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            user_agent_stylesheet: None,
            read_buffer_size: 4096,
        }
    }
}

impl Options {
    fn tree_builder(&self) -> TreeBuilder {
        match self.user_agent_stylesheet {
            Some(ref css) => TreeBuilder::with_user_agent_stylesheet(css),
            None => TreeBuilder::new(),
        }
    }
}

/// Parses, styles and lays out an HTML document.
pub fn parse_document(html: &str, options: &Options) -> Result<Document> {
    let mut builder = options.tree_builder();
    let mut tokenizer = Tokenizer::new();
    tokenizer.feed(html, &mut builder)?;
    tokenizer.end(&mut builder)?;
    Ok(builder.into_document())
}

/// Reads an HTTP response from `transport` and renders its body.
///
/// Reading stops as soon as the body is complete, so a connection kept alive
/// by the peer is never read past the response. Bodies delimited by the end
/// of the connection are read until `transport` reports end of file.
pub fn render_response<R: Read>(transport: &mut R, options: &Options) -> Result<Document> {
    let mut parser = HttpResponseParser::new();
    let mut buffer = vec![0; options.read_buffer_size.max(1)];
    loop {
        let read = match transport.read(&mut buffer) {
            Ok(0) => {
                parser.finish();
                break;
            }
            Ok(read) => read,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        trace!("Read {} bytes", read);
        parser.feed(&buffer[..read]);
        if parser.is_complete() {
            debug!("Response complete, leaving the transport open");
            break;
        }
    }

    let response = parser.response()?;
    info!(
        "HTTP {} {} with {} body bytes",
        response.status_code,
        response.status_text,
        response.body.len()
    );
    parse_document(&response.text(), options)
}
