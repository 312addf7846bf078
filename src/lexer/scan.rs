//! Pull-based chunk sources feeding the streaming tokenizer.

use log::debug;

use std::io::{self, Read};
use std::mem;
use std::str;

/// External supplier of text chunks.
///
/// Chunk boundaries are arbitrary: they need not align with token or
/// statement boundaries, and the consumer must not assume they do.
/// `Ok(None)` signals end of input; after that the source is exhausted.
pub trait ChunkSource {
    /// Pull the next chunk of text, or `None` at end of input.
    fn next_chunk(&mut self) -> io::Result<Option<String>>;
}

/// Any infallible iterator over owned text is a chunk source. Handy for
/// in-memory inputs that are already split into chunks.
impl<I: Iterator<Item = String>> ChunkSource for I {
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        Ok(self.next())
    }
}

/// Reads UTF-8 text chunks out of any `Read`.
///
/// Each `next_chunk` performs one successful `read` and yields whatever
/// arrived. A multi-byte character split by a read boundary is held back
/// and prepended to the next chunk, so every yielded chunk is valid UTF-8
/// on its own.
pub struct InputStream<R: Read> {
    /// The reader provided by the client.
    inner: R,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last read.
    carry: Vec<u8>,
    chunk_size: usize,
}

impl<R: Read> InputStream<R> {
    /// Wrap `inner` with the default chunk capacity.
    pub fn new(inner: R) -> InputStream<R> {
        Self::with_capacity(inner, 4096)
    }

    /// Wrap `inner`, reading at most `capacity` bytes per chunk.
    pub fn with_capacity(inner: R, capacity: usize) -> InputStream<R> {
        assert!(capacity > 0);
        InputStream {
            inner,
            carry: Vec::new(),
            chunk_size: capacity,
        }
    }
}

impl<R: Read> ChunkSource for InputStream<R> {
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        let mut data = mem::take(&mut self.carry);
        let start = data.len();
        data.resize(start + self.chunk_size, 0);
        let n = loop {
            match self.inner.read(&mut data[start..]) {
                Ok(n) => break n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        };
        debug!(target: "scanner", "read {} bytes", n);
        data.truncate(start + n);
        if n == 0 {
            return if data.is_empty() {
                Ok(None)
            } else {
                Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream ends inside a multi-byte character",
                ))
            };
        }
        let valid = match str::from_utf8(&data) {
            Ok(_) => data.len(),
            // incomplete trailing sequence: hold it back for the next read
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };
        self.carry = data.split_off(valid);
        let chunk =
            String::from_utf8(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(chunk))
    }
}
