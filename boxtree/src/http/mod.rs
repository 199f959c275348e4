//! An incremental HTTP/1.1 response parser.
//!
//! Bytes can be fed in as many pieces as the transport wants; all the state
//! lives in the parser. The connection itself is not our business: the
//! owner of the socket calls `finish()` when the peer closes it.

pub mod chunked;

use self::chunked::ChunkedBodyDecoder;
use crate::error::ProtocolError;

const STATUS_LINE_PREFIX: &str = "HTTP/1.1 ";

/// An ordered header map with case-insensitive lookup.
///
/// Setting a header that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| &**v)
    }

    pub fn set(&mut self, name: String, value: String) {
        match self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (&**n, &**v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    StatusLine,
    StatusLineCrlf,
    HeaderName,
    HeaderValue,
    HeaderLineCrlf,
    HeadersEnd,
    Body,
}

/// How the body is delimited.
#[derive(Debug)]
enum Body {
    Chunked(ChunkedBodyDecoder),
    Length { remaining: usize },
    UntilClose { closed: bool },
}

impl Body {
    fn is_complete(&self) -> bool {
        match *self {
            Body::Chunked(ref decoder) => decoder.is_finished(),
            Body::Length { remaining } => remaining == 0,
            Body::UntilClose { closed } => closed,
        }
    }
}

#[derive(Debug)]
pub struct HttpResponseParser {
    state: State,
    status_line: Vec<u8>,
    header_name: Vec<u8>,
    header_value: Vec<u8>,
    headers: Headers,
    body: Option<Body>,
    body_bytes: Vec<u8>,
}

impl Default for HttpResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `HTTP/1.1 <digits> <rest>`.
fn parse_status_line(line: &str) -> Result<(u16, String), ProtocolError> {
    let malformed = || ProtocolError::MalformedStatusLine(line.to_owned());
    let rest = line.strip_prefix(STATUS_LINE_PREFIX).ok_or_else(malformed)?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(malformed());
    }
    let (code, text) = rest.split_at(digits);
    let text = text.strip_prefix(' ').ok_or_else(malformed)?;
    if text.is_empty() {
        return Err(malformed());
    }
    let code = code.parse().map_err(|_| malformed())?;
    Ok((code, text.to_owned()))
}

impl HttpResponseParser {
    pub fn new() -> Self {
        Self {
            state: State::StatusLine,
            status_line: Vec::new(),
            header_name: Vec::new(),
            header_value: Vec::new(),
            headers: Headers::default(),
            body: None,
            body_bytes: Vec::new(),
        }
    }

    /// Feeds a piece of the response, as it arrived from the transport.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.receive_byte(byte);
        }
    }

    /// Signals that the transport has no more bytes for us.
    pub fn finish(&mut self) {
        match self.body {
            Some(Body::UntilClose { ref mut closed }) => *closed = true,
            Some(ref body) if !body.is_complete() => {
                warn!("Connection closed before the body was complete");
            }
            Some(..) => {}
            None => warn!("Connection closed in the {:?} state", self.state),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.body.as_ref().map_or(false, Body::is_complete)
    }

    /// The headers received so far.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    fn commit_header(&mut self) {
        let name = String::from_utf8_lossy(&self.header_name).into_owned();
        let value = String::from_utf8_lossy(&self.header_value).trim().to_owned();
        trace!("Header {:?}: {:?}", name, value);
        self.headers.set(name, value);
        self.header_name.clear();
        self.header_value.clear();
    }

    fn start_body(&mut self) {
        let chunked = self
            .headers
            .get("Transfer-Encoding")
            .map_or(false, |v| v.eq_ignore_ascii_case("chunked"));
        let body = if chunked {
            Body::Chunked(ChunkedBodyDecoder::new())
        } else if let Some(length) = self
            .headers
            .get("Content-Length")
            .and_then(|v| v.parse::<usize>().ok())
        {
            Body::Length { remaining: length }
        } else {
            Body::UntilClose { closed: false }
        };
        debug!("Response body framing: {:?}", body);
        self.body = Some(body);
    }

    fn receive_byte(&mut self, byte: u8) {
        match self.state {
            State::StatusLine => {
                if byte == b'\r' {
                    self.state = State::StatusLineCrlf;
                } else {
                    self.status_line.push(byte);
                }
            }
            State::StatusLineCrlf => {
                if byte == b'\n' {
                    self.state = State::HeaderName;
                }
            }
            State::HeaderName => match byte {
                b':' => self.state = State::HeaderValue,
                b'\r' => self.state = State::HeadersEnd,
                _ => self.header_name.push(byte),
            },
            State::HeaderValue => {
                if byte == b'\r' {
                    self.commit_header();
                    self.state = State::HeaderLineCrlf;
                } else {
                    self.header_value.push(byte);
                }
            }
            State::HeaderLineCrlf => {
                if byte == b'\n' {
                    self.state = State::HeaderName;
                }
            }
            State::HeadersEnd => {
                if byte == b'\n' {
                    self.state = State::Body;
                    self.start_body();
                }
            }
            State::Body => match self.body {
                Some(Body::Chunked(ref mut decoder)) => {
                    decoder.decode(&[byte], &mut self.body_bytes);
                }
                Some(Body::Length { ref mut remaining }) => {
                    if *remaining > 0 {
                        *remaining -= 1;
                        self.body_bytes.push(byte);
                    }
                }
                Some(Body::UntilClose { closed }) => {
                    if !closed {
                        self.body_bytes.push(byte);
                    }
                }
                None => unreachable!("body framing is decided on entering the Body state"),
            },
        }
    }

    /// Builds the structured response. The body must be complete.
    pub fn response(&self) -> Result<HttpResponse, ProtocolError> {
        if !self.is_complete() {
            return Err(ProtocolError::Incomplete);
        }
        let line = String::from_utf8_lossy(&self.status_line);
        let (status_code, status_text) = parse_status_line(&line)?;
        Ok(HttpResponse {
            status_code,
            status_text,
            headers: self.headers.clone(),
            body: self.body_bytes.clone(),
        })
    }
}
