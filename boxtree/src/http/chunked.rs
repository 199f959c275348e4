//! Decoding of `Transfer-Encoding: chunked` bodies, one byte at a time.
//!
//! The grammar is a repetition of `<hex-size>\r\n<size bytes>\r\n`, ended by
//! a zero-size chunk. The decoder is lenient: non-hex characters in a size
//! line count as zero instead of being rejected, and it never fails.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// Accumulating the hex digits of a chunk size.
    Size,
    /// Waiting for the `\n` ending a size line.
    SizeCrlf,
    /// Copying chunk payload.
    Data,
    /// Waiting for the `\r\n` after a chunk payload.
    DataCrlf,
    Finished,
}

/// What happened as a result of feeding one byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    /// The byte was framing.
    Nothing,
    /// The byte was chunk payload.
    Byte(u8),
    /// The terminating chunk was just seen.
    Finished,
}

#[derive(Debug)]
pub struct ChunkedBodyDecoder {
    state: State,
    remaining: usize,
}

impl Default for ChunkedBodyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_value(byte: u8) -> usize {
    match byte {
        b'0'..=b'9' => (byte - b'0') as usize,
        b'a'..=b'f' => (byte - b'a' + 10) as usize,
        b'A'..=b'F' => (byte - b'A' + 10) as usize,
        _ => 0,
    }
}

impl ChunkedBodyDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Size,
            remaining: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Consumes a single byte of the chunked stream.
    pub fn feed(&mut self, byte: u8) -> DecoderEvent {
        match self.state {
            State::Size => {
                if byte == b'\r' {
                    if self.remaining == 0 {
                        trace!("Terminating chunk");
                        self.state = State::Finished;
                        return DecoderEvent::Finished;
                    }
                    trace!("Chunk of {} bytes", self.remaining);
                    self.state = State::SizeCrlf;
                } else {
                    self.remaining = self
                        .remaining
                        .saturating_mul(16)
                        .saturating_add(hex_value(byte));
                }
                DecoderEvent::Nothing
            }
            State::SizeCrlf => {
                if byte == b'\n' {
                    self.state = State::Data;
                }
                DecoderEvent::Nothing
            }
            State::Data => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.state = State::DataCrlf;
                }
                DecoderEvent::Byte(byte)
            }
            State::DataCrlf => {
                if byte == b'\n' {
                    self.state = State::Size;
                }
                DecoderEvent::Nothing
            }
            State::Finished => DecoderEvent::Nothing,
        }
    }

    /// Feeds a whole slice, appending payload bytes to `out`. Returns whether
    /// the terminating chunk was seen during this call.
    pub fn decode(&mut self, bytes: &[u8], out: &mut Vec<u8>) -> bool {
        let mut finished = false;
        for &byte in bytes {
            match self.feed(byte) {
                DecoderEvent::Nothing => {}
                DecoderEvent::Byte(b) => out.push(b),
                DecoderEvent::Finished => finished = true,
            }
        }
        finished
    }
}
