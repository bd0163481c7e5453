//! UTF-8 decoding across write boundaries
//!
//! A producer may flush in the middle of a multi-byte character. Complete
//! characters are released immediately; an incomplete tail is held until the
//! next chunk arrives.

/// Streaming chunk decoder
#[derive(Debug, Clone, Default)]
pub struct Utf8Stream {
    /// Bytes of an incomplete trailing character (at most 3)
    pending: Vec<u8>,
}

impl Utf8Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a partial character is being held
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Discard a held partial character
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Decode a chunk. Invalid sequences become U+FFFD.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);

        let mut out = String::with_capacity(buf.len());
        let mut rest: &[u8] = &buf;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        None => {
                            // Incomplete character at the end of the chunk
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Release held bytes as replacement characters
    pub fn finish(&mut self) -> String {
        let pending = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&pending).into_owned()
    }
}
